//! Page Event Model
//!
//! Full event-page records: richer than the landing cards, with a real
//! calendar date used by the featured/past split.

use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;

use super::event::validate_styled;
use super::image_ref::{ImageRef, StyledText};
use super::serde_thing;
use crate::ordering::OrderedEntity;
use crate::utils::AppResult;
use crate::utils::validation::{MAX_NAME_LEN, MAX_NOTE_LEN, MAX_TITLE_LEN, validate_url};

pub type PageEventId = Thing;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventTime {
    /// e.g. "9:00 AM"
    #[serde(default)]
    pub start: String,
    #[serde(default)]
    pub end: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventLocation {
    #[serde(default)]
    pub venue: String,
    #[serde(default)]
    pub address: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageEvent {
    #[serde(default, with = "serde_thing::option", skip_serializing_if = "Option::is_none")]
    pub id: Option<PageEventId>,
    pub title: StyledText,
    pub description: StyledText,
    /// Display date, free-form text
    pub date: StyledText,
    /// Calendar date in epoch milliseconds; drives the featured/past split
    pub event_date: i64,
    #[serde(default)]
    pub event_time: EventTime,
    #[serde(default)]
    pub location: EventLocation,
    #[serde(default)]
    pub registration_link: String,
    #[serde(default)]
    pub category: String,
    pub cover_image: ImageRef,
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

impl OrderedEntity for PageEvent {
    const TABLE: &'static str = "page_event";
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageEventCreate {
    pub title: StyledText,
    pub description: StyledText,
    pub date: StyledText,
    pub event_date: i64,
    pub event_time: Option<EventTime>,
    pub location: Option<EventLocation>,
    pub registration_link: Option<String>,
    pub category: Option<String>,
    pub cover_image: ImageRef,
    pub is_active: Option<bool>,
}

impl PageEventCreate {
    pub fn validate(&self) -> AppResult<()> {
        validate_styled(&self.title, "title", MAX_TITLE_LEN)?;
        validate_styled(&self.description, "description", MAX_NOTE_LEN * 4)?;
        validate_styled(&self.date, "date", MAX_TITLE_LEN)?;
        validate_url(&self.cover_image.url, "cover_image.url")?;
        if let Some(link) = &self.registration_link {
            validate_url(link, "registration_link")?;
        }
        if let Some(category) = &self.category
            && category.len() > MAX_NAME_LEN
        {
            return Err(crate::utils::AppError::validation("category is too long"));
        }
        Ok(())
    }

    pub fn into_event(self, sort_order: i64, now: i64) -> PageEvent {
        PageEvent {
            id: None,
            title: self.title,
            description: self.description,
            date: self.date,
            event_date: self.event_date,
            event_time: self.event_time.unwrap_or_default(),
            location: self.location.unwrap_or_default(),
            registration_link: self.registration_link.unwrap_or_default(),
            category: self.category.unwrap_or_default(),
            cover_image: self.cover_image,
            sort_order,
            is_active: self.is_active.unwrap_or(true),
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageEventUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<StyledText>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<StyledText>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<StyledText>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_date: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_time: Option<EventTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<EventLocation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<ImageRef>,
}

impl PageEventUpdate {
    pub fn validate(&self) -> AppResult<()> {
        if let Some(t) = &self.title {
            validate_styled(t, "title", MAX_TITLE_LEN)?;
        }
        if let Some(d) = &self.description {
            validate_styled(d, "description", MAX_NOTE_LEN * 4)?;
        }
        if let Some(d) = &self.date {
            validate_styled(d, "date", MAX_TITLE_LEN)?;
        }
        if let Some(img) = &self.cover_image {
            validate_url(&img.url, "cover_image.url")?;
        }
        if let Some(link) = &self.registration_link {
            validate_url(link, "registration_link")?;
        }
        Ok(())
    }
}
