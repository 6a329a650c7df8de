//! Shared image reference shapes

use serde::{Deserialize, Serialize};

/// An image displayed on the public site: URL plus alt text.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImageRef {
    pub url: String,
    #[serde(default)]
    pub alt: String,
}

/// An asset owned by the external media host. `public_id` is the host-side
/// handle used to delete the asset when its owning record goes away.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MediaRef {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub public_id: Option<String>,
}

impl MediaRef {
    pub fn is_set(&self) -> bool {
        self.url.is_some()
    }
}

/// A text fragment with a configurable display color.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StyledText {
    pub text: String,
    #[serde(default = "default_text_color")]
    pub color: String,
}

pub fn default_text_color() -> String {
    "#606161".to_string()
}
