//! Hero Content Model
//!
//! Rotating hero slots on the landing page. Every record is always part of
//! the ordered rotation; there is no inactive side.

use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;

use super::serde_thing;
use crate::ordering::OrderedEntity;
use crate::utils::AppResult;
use crate::utils::validation::{
    MAX_NOTE_LEN, MAX_TITLE_LEN, validate_hex_color, validate_required_text, validate_url,
};

pub type HeroContentId = Thing;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeroMediaType {
    Image,
    Gif,
    Video,
}

/// A styled hero text block with a pixel size tag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeroText {
    #[serde(default)]
    pub text: String,
    #[serde(default = "default_hero_color")]
    pub color: String,
    /// Tailwind-style size tag, e.g. `text-[64px]`
    #[serde(default)]
    pub size: String,
}

fn default_hero_color() -> String {
    "#ffffff".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonActionType {
    Url,
    Scroll,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ButtonAction {
    #[serde(rename = "type")]
    pub kind: ButtonActionType,
    #[serde(default)]
    pub target: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeroButton {
    #[serde(default)]
    pub text: String,
    #[serde(default = "default_button_background")]
    pub background_color: String,
    #[serde(default = "default_hero_color")]
    pub text_color: String,
    pub action: ButtonAction,
}

fn default_button_background() -> String {
    "#FBB859".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeroContent {
    #[serde(default, with = "serde_thing::option", skip_serializing_if = "Option::is_none")]
    pub id: Option<HeroContentId>,
    pub media_type: HeroMediaType,
    pub media_url: String,
    /// Milliseconds the slot stays on screen (images and GIFs)
    #[serde(default = "default_display_duration")]
    pub display_duration: i64,
    pub heading: HeroText,
    #[serde(default)]
    pub subheading: Option<HeroText>,
    #[serde(default)]
    pub description: Option<HeroText>,
    #[serde(default)]
    pub button: Option<HeroButton>,
    #[serde(default)]
    pub sort_order: i64,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
}

fn default_display_duration() -> i64 {
    5000
}

impl OrderedEntity for HeroContent {
    const TABLE: &'static str = "hero_content";
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeroContentCreate {
    pub media_type: HeroMediaType,
    pub media_url: String,
    pub display_duration: Option<i64>,
    pub heading: HeroText,
    pub subheading: Option<HeroText>,
    pub description: Option<HeroText>,
    pub button: Option<HeroButton>,
}

impl HeroContentCreate {
    pub fn validate(&self) -> AppResult<()> {
        validate_required_text(&self.media_url, "media_url", 2048)?;
        validate_url(&self.media_url, "media_url")?;
        validate_hero_text(&self.heading, "heading", true)?;
        if let Some(t) = &self.subheading {
            validate_hero_text(t, "subheading", false)?;
        }
        if let Some(t) = &self.description {
            validate_hero_text(t, "description", false)?;
        }
        if let Some(b) = &self.button {
            validate_hex_color(&b.background_color, "button.background_color")?;
            validate_hex_color(&b.text_color, "button.text_color")?;
        }
        Ok(())
    }

    pub fn into_content(self, sort_order: i64, now: i64) -> HeroContent {
        HeroContent {
            id: None,
            media_type: self.media_type,
            media_url: self.media_url,
            display_duration: self.display_duration.unwrap_or_else(default_display_duration),
            heading: self.heading,
            subheading: self.subheading,
            description: self.description,
            button: self.button,
            sort_order,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeroContentUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_type: Option<HeroMediaType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_duration: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heading: Option<HeroText>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subheading: Option<HeroText>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<HeroText>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub button: Option<HeroButton>,
}

impl HeroContentUpdate {
    pub fn validate(&self) -> AppResult<()> {
        if let Some(url) = &self.media_url {
            validate_required_text(url, "media_url", 2048)?;
            validate_url(url, "media_url")?;
        }
        if let Some(t) = &self.heading {
            validate_hero_text(t, "heading", true)?;
        }
        if let Some(t) = &self.subheading {
            validate_hero_text(t, "subheading", false)?;
        }
        if let Some(t) = &self.description {
            validate_hero_text(t, "description", false)?;
        }
        if let Some(b) = &self.button {
            validate_hex_color(&b.background_color, "button.background_color")?;
            validate_hex_color(&b.text_color, "button.text_color")?;
        }
        Ok(())
    }
}

fn validate_hero_text(text: &HeroText, field: &str, required: bool) -> AppResult<()> {
    if required {
        validate_required_text(&text.text, field, MAX_TITLE_LEN)?;
    } else if text.text.len() > MAX_NOTE_LEN {
        return Err(crate::utils::AppError::validation(format!("{field} is too long")));
    }
    validate_hex_color(&text.color, &format!("{field}.color"))?;
    if !text.size.is_empty() && !is_size_tag(&text.size) {
        return Err(crate::utils::AppError::validation(format!(
            "{field}.size must look like text-[64px]"
        )));
    }
    Ok(())
}

/// `text-[NNpx]` size tags
fn is_size_tag(value: &str) -> bool {
    value
        .strip_prefix("text-[")
        .and_then(|rest| rest.strip_suffix("px]"))
        .is_some_and(|digits| !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_tags() {
        assert!(is_size_tag("text-[64px]"));
        assert!(is_size_tag("text-[8px]"));
        assert!(!is_size_tag("text-[px]"));
        assert!(!is_size_tag("text-64px"));
        assert!(!is_size_tag("text-[64em]"));
    }
}
