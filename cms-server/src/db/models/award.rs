//! Award Model

use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;

use super::serde_thing;
use crate::ordering::OrderedEntity;
use crate::utils::AppResult;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, MAX_TITLE_LEN, validate_optional_hex_color,
    validate_optional_text, validate_required_text,
};

pub type AwardId = Thing;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AwardType {
    Gold,
    Silver,
    Bronze,
    Special,
    Achievement,
}

impl AwardType {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "gold" => Some(Self::Gold),
            "silver" => Some(Self::Silver),
            "bronze" => Some(Self::Bronze),
            "special" => Some(Self::Special),
            "achievement" => Some(Self::Achievement),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AwardIcon {
    Trophy,
    Medal,
    Star,
    Heart,
    Certificate,
    Crown,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Award {
    #[serde(default, with = "serde_thing::option", skip_serializing_if = "Option::is_none")]
    pub id: Option<AwardId>,
    pub title: String,
    pub description: String,
    /// Display year, e.g. "2024"
    pub year: String,
    #[serde(default = "default_icon")]
    pub icon_type: AwardIcon,
    #[serde(default = "default_award_type")]
    pub award_type: AwardType,
    #[serde(default)]
    pub state: String,
    #[serde(default = "default_state_color")]
    pub state_color: String,
    #[serde(default)]
    pub organization: String,
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

fn default_icon() -> AwardIcon {
    AwardIcon::Trophy
}

fn default_award_type() -> AwardType {
    AwardType::Achievement
}

fn default_state_color() -> String {
    "#3B82F6".to_string()
}

impl OrderedEntity for Award {
    const TABLE: &'static str = "award";
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AwardCreate {
    pub title: String,
    pub description: String,
    pub year: String,
    pub icon_type: Option<AwardIcon>,
    pub award_type: Option<AwardType>,
    pub state: Option<String>,
    pub state_color: Option<String>,
    pub organization: Option<String>,
    pub is_active: Option<bool>,
}

impl AwardCreate {
    pub fn validate(&self) -> AppResult<()> {
        validate_required_text(&self.title, "title", MAX_TITLE_LEN)?;
        validate_required_text(&self.description, "description", MAX_NOTE_LEN)?;
        validate_required_text(&self.year, "year", 4)?;
        validate_optional_text(&self.state, "state", MAX_NAME_LEN)?;
        validate_optional_hex_color(&self.state_color, "state_color")?;
        validate_optional_text(&self.organization, "organization", MAX_TITLE_LEN)?;
        Ok(())
    }

    pub fn into_award(self, sort_order: i64, now: i64) -> Award {
        Award {
            id: None,
            title: self.title,
            description: self.description,
            year: self.year,
            icon_type: self.icon_type.unwrap_or_else(default_icon),
            award_type: self.award_type.unwrap_or_else(default_award_type),
            state: self.state.unwrap_or_default(),
            state_color: self.state_color.unwrap_or_else(default_state_color),
            organization: self.organization.unwrap_or_default(),
            sort_order,
            is_active: self.is_active.unwrap_or(true),
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AwardUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_type: Option<AwardIcon>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub award_type: Option<AwardType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
}

impl AwardUpdate {
    pub fn validate(&self) -> AppResult<()> {
        if let Some(title) = &self.title {
            validate_required_text(title, "title", MAX_TITLE_LEN)?;
        }
        if let Some(description) = &self.description {
            validate_required_text(description, "description", MAX_NOTE_LEN)?;
        }
        if let Some(year) = &self.year {
            validate_required_text(year, "year", 4)?;
        }
        validate_optional_text(&self.state, "state", MAX_NAME_LEN)?;
        validate_optional_hex_color(&self.state_color, "state_color")?;
        validate_optional_text(&self.organization, "organization", MAX_TITLE_LEN)?;
        Ok(())
    }
}
