//! Event Model

use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;

use super::image_ref::{ImageRef, StyledText, default_text_color};
use super::serde_thing;
use crate::ordering::OrderedEntity;
use crate::utils::AppResult;
use crate::utils::validation::{
    MAX_TITLE_LEN, MAX_NOTE_LEN, validate_hex_color, validate_required_text, validate_url,
};

pub type EventId = Thing;

/// A card on the public events rail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    #[serde(default, with = "serde_thing::option", skip_serializing_if = "Option::is_none")]
    pub id: Option<EventId>,
    pub title: StyledText,
    pub description: StyledText,
    /// Display date, free-form text (e.g. "December 15-17, 2025")
    pub date: StyledText,
    pub cover_image: ImageRef,
    #[serde(default = "default_content_area_color")]
    pub content_area_color: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub sort_order: i64,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
}

fn default_true() -> bool {
    true
}

fn default_content_area_color() -> String {
    "#81C99C".to_string()
}

fn default_date_color() -> String {
    "#FBB859".to_string()
}

impl OrderedEntity for Event {
    const TABLE: &'static str = "event";
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventCreate {
    pub title: StyledText,
    pub description: StyledText,
    pub date: StyledText,
    pub cover_image: ImageRef,
    pub content_area_color: Option<String>,
    pub url: Option<String>,
    pub is_active: Option<bool>,
}

impl EventCreate {
    pub fn validate(&self) -> AppResult<()> {
        validate_styled(&self.title, "title", MAX_TITLE_LEN)?;
        validate_styled(&self.description, "description", MAX_NOTE_LEN)?;
        validate_styled(&self.date, "date", MAX_TITLE_LEN)?;
        validate_required_text(&self.cover_image.url, "cover_image.url", MAX_TITLE_LEN * 10)?;
        validate_url(&self.cover_image.url, "cover_image.url")?;
        if let Some(color) = &self.content_area_color {
            validate_hex_color(color, "content_area_color")?;
        }
        if let Some(url) = &self.url {
            validate_url(url, "url")?;
        }
        Ok(())
    }

    /// Materialize a record; `sort_order` is assigned by the caller via the
    /// ordering manager, never taken from the payload.
    pub fn into_event(self, sort_order: i64, now: i64) -> Event {
        Event {
            id: None,
            title: self.title,
            description: styled_or_default(self.description, default_text_color),
            date: styled_or_default(self.date, default_date_color),
            cover_image: self.cover_image,
            content_area_color: self.content_area_color.unwrap_or_else(default_content_area_color),
            url: self.url.unwrap_or_default(),
            sort_order,
            is_active: self.is_active.unwrap_or(true),
            created_at: now,
            updated_at: now,
        }
    }
}

fn styled_or_default(mut text: StyledText, default_color: fn() -> String) -> StyledText {
    if text.color.is_empty() {
        text.color = default_color();
    }
    text
}

/// Field update; `sort_order` and `is_active` deliberately absent — they
/// change only through the reorder and toggle operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<StyledText>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<StyledText>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<StyledText>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<ImageRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_area_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl EventUpdate {
    pub fn validate(&self) -> AppResult<()> {
        if let Some(t) = &self.title {
            validate_styled(t, "title", MAX_TITLE_LEN)?;
        }
        if let Some(d) = &self.description {
            validate_styled(d, "description", MAX_NOTE_LEN)?;
        }
        if let Some(d) = &self.date {
            validate_styled(d, "date", MAX_TITLE_LEN)?;
        }
        if let Some(img) = &self.cover_image {
            validate_url(&img.url, "cover_image.url")?;
        }
        if let Some(color) = &self.content_area_color {
            validate_hex_color(color, "content_area_color")?;
        }
        if let Some(url) = &self.url {
            validate_url(url, "url")?;
        }
        Ok(())
    }
}

pub(crate) fn validate_styled(text: &StyledText, field: &str, max_len: usize) -> AppResult<()> {
    validate_required_text(&text.text, field, max_len)?;
    if !text.color.is_empty() {
        validate_hex_color(&text.color, &format!("{field}.color"))?;
    }
    Ok(())
}
