//! Timeline Models
//!
//! Sections are bands on the journey page; phases are the ordered nodes
//! within one section. Phase ordering is partitioned per section.

use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;

use super::serde_thing;
use crate::ordering::OrderedEntity;
use crate::utils::AppResult;
use crate::utils::validation::{
    MAX_DESCRIPTION_LEN, MAX_TITLE_LEN, validate_optional_hex_color, validate_required_text,
    validate_url,
};

pub type TimelineSectionId = Thing;
pub type TimelinePhaseId = Thing;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineSection {
    #[serde(default, with = "serde_thing::option", skip_serializing_if = "Option::is_none")]
    pub id: Option<TimelineSectionId>,
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default = "default_section_background")]
    pub background_color: String,
    #[serde(default = "default_line_color")]
    pub line_color: String,
    #[serde(default = "default_node_color")]
    pub node_color: String,
    #[serde(default = "default_section_text")]
    pub text_color: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub sort_order: i64,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
}

fn default_true() -> bool {
    true
}

fn default_section_background() -> String {
    "#f8fafc".to_string()
}

fn default_line_color() -> String {
    "#e2e8f0".to_string()
}

fn default_node_color() -> String {
    "#81C99C".to_string()
}

fn default_section_text() -> String {
    "#1e293b".to_string()
}

impl OrderedEntity for TimelineSection {
    const TABLE: &'static str = "timeline_section";
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhasePosition {
    Left,
    Right,
    Auto,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelinePhase {
    #[serde(default, with = "serde_thing::option", skip_serializing_if = "Option::is_none")]
    pub id: Option<TimelinePhaseId>,
    pub year: String,
    pub headline: String,
    pub description: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub image_alt: String,
    #[serde(default = "default_phase_background")]
    pub background_color: String,
    #[serde(default = "default_section_text")]
    pub text_color: String,
    #[serde(default = "default_accent")]
    pub accent_color: String,
    #[serde(default = "default_position")]
    pub position: PhasePosition,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub sort_order: i64,
    /// Owning section
    #[serde(with = "serde_thing")]
    pub section: TimelineSectionId,
    #[serde(default)]
    pub expandable: bool,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
}

fn default_phase_background() -> String {
    "#ffffff".to_string()
}

fn default_accent() -> String {
    "#FBB859".to_string()
}

fn default_position() -> PhasePosition {
    PhasePosition::Auto
}

impl OrderedEntity for TimelinePhase {
    const TABLE: &'static str = "timeline_phase";
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineSectionCreate {
    pub title: String,
    pub subtitle: Option<String>,
    pub background_color: Option<String>,
    pub line_color: Option<String>,
    pub node_color: Option<String>,
    pub text_color: Option<String>,
    pub is_active: Option<bool>,
}

impl TimelineSectionCreate {
    pub fn validate(&self) -> AppResult<()> {
        validate_required_text(&self.title, "title", MAX_TITLE_LEN)?;
        validate_optional_hex_color(&self.background_color, "background_color")?;
        validate_optional_hex_color(&self.line_color, "line_color")?;
        validate_optional_hex_color(&self.node_color, "node_color")?;
        validate_optional_hex_color(&self.text_color, "text_color")?;
        Ok(())
    }

    pub fn into_section(self, sort_order: i64, now: i64) -> TimelineSection {
        TimelineSection {
            id: None,
            title: self.title,
            subtitle: self.subtitle.unwrap_or_default(),
            background_color: self.background_color.unwrap_or_else(default_section_background),
            line_color: self.line_color.unwrap_or_else(default_line_color),
            node_color: self.node_color.unwrap_or_else(default_node_color),
            text_color: self.text_color.unwrap_or_else(default_section_text),
            is_active: self.is_active.unwrap_or(true),
            sort_order,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineSectionUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl TimelineSectionUpdate {
    pub fn validate(&self) -> AppResult<()> {
        if let Some(title) = &self.title {
            validate_required_text(title, "title", MAX_TITLE_LEN)?;
        }
        validate_optional_hex_color(&self.background_color, "background_color")?;
        validate_optional_hex_color(&self.line_color, "line_color")?;
        validate_optional_hex_color(&self.node_color, "node_color")?;
        validate_optional_hex_color(&self.text_color, "text_color")?;
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelinePhaseCreate {
    pub year: String,
    pub headline: String,
    pub description: String,
    pub image_url: Option<String>,
    pub image_alt: Option<String>,
    pub background_color: Option<String>,
    pub text_color: Option<String>,
    pub accent_color: Option<String>,
    pub position: Option<PhasePosition>,
    pub is_active: Option<bool>,
    /// Owning section id (plain key or `timeline_section:key`)
    pub section: String,
    pub expandable: Option<bool>,
}

impl TimelinePhaseCreate {
    pub fn validate(&self) -> AppResult<()> {
        validate_required_text(&self.year, "year", 16)?;
        validate_required_text(&self.headline, "headline", MAX_TITLE_LEN)?;
        validate_required_text(&self.description, "description", MAX_DESCRIPTION_LEN)?;
        if let Some(url) = &self.image_url {
            validate_url(url, "image_url")?;
        }
        validate_optional_hex_color(&self.background_color, "background_color")?;
        validate_optional_hex_color(&self.text_color, "text_color")?;
        validate_optional_hex_color(&self.accent_color, "accent_color")?;
        validate_required_text(&self.section, "section", 128)?;
        Ok(())
    }

    pub fn into_phase(self, section: TimelineSectionId, sort_order: i64, now: i64) -> TimelinePhase {
        TimelinePhase {
            id: None,
            year: self.year,
            headline: self.headline,
            description: self.description,
            image_url: self.image_url,
            image_alt: self.image_alt.unwrap_or_default(),
            background_color: self.background_color.unwrap_or_else(default_phase_background),
            text_color: self.text_color.unwrap_or_else(default_section_text),
            accent_color: self.accent_color.unwrap_or_else(default_accent),
            position: self.position.unwrap_or_else(default_position),
            is_active: self.is_active.unwrap_or(true),
            sort_order,
            section,
            expandable: self.expandable.unwrap_or(false),
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelinePhaseUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_alt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accent_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<PhasePosition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expandable: Option<bool>,
}

impl TimelinePhaseUpdate {
    pub fn validate(&self) -> AppResult<()> {
        if let Some(year) = &self.year {
            validate_required_text(year, "year", 16)?;
        }
        if let Some(headline) = &self.headline {
            validate_required_text(headline, "headline", MAX_TITLE_LEN)?;
        }
        if let Some(description) = &self.description {
            validate_required_text(description, "description", MAX_DESCRIPTION_LEN)?;
        }
        if let Some(url) = &self.image_url {
            validate_url(url, "image_url")?;
        }
        validate_optional_hex_color(&self.background_color, "background_color")?;
        validate_optional_hex_color(&self.text_color, "text_color")?;
        validate_optional_hex_color(&self.accent_color, "accent_color")?;
        Ok(())
    }
}

/// Combined public payload: active sections with their active phases.
#[derive(Debug, Serialize)]
pub struct TimelineView {
    pub sections: Vec<TimelineSection>,
    pub phases: Vec<TimelinePhase>,
}
