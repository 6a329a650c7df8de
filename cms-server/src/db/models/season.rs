//! Season Model
//!
//! A season is one document owning two embedded ordered arrays: board
//! members and highlights. The arrays are the ordering partitions; the whole
//! document is the atomic unit for every mutation that touches them.

use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;
use uuid::Uuid;

use super::image_ref::MediaRef;
use super::serde_thing;
use crate::ordering::{OrderedEntity, Sequenced};
use crate::utils::AppResult;
use crate::utils::validation::{
    MAX_DESCRIPTION_LEN, MAX_NAME_LEN, MAX_TITLE_LEN, validate_academic_year, validate_hex_color,
    validate_optional_text, validate_required_text, validate_url,
};

pub type SeasonId = Thing;

/// Embedded board member. `id` is a server-assigned UUID; embedded records
/// have no table identity of their own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardMember {
    #[serde(default = "new_embedded_id")]
    pub id: String,
    pub name: String,
    pub position: String,
    #[serde(default)]
    pub is_leader: bool,
    #[serde(default)]
    pub avatar: MediaRef,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub profile_url: String,
    #[serde(default)]
    pub sort_order: i64,
}

impl Sequenced for BoardMember {
    fn sort_order(&self) -> i64 {
        self.sort_order
    }
    fn set_sort_order(&mut self, order: i64) {
        self.sort_order = order;
    }
}

/// Embedded season highlight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Highlight {
    #[serde(default = "new_embedded_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: MediaRef,
    #[serde(default)]
    pub sort_order: i64,
}

impl Sequenced for Highlight {
    fn sort_order(&self) -> i64 {
        self.sort_order
    }
    fn set_sort_order(&mut self, order: i64) {
        self.sort_order = order;
    }
}

pub fn new_embedded_id() -> String {
    Uuid::new_v4().to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Season {
    #[serde(default, with = "serde_thing::option", skip_serializing_if = "Option::is_none")]
    pub id: Option<SeasonId>,
    /// `YYYY-YYYY`, unique across seasons
    pub academic_year: String,
    pub theme: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub cover_image: MediaRef,
    #[serde(default = "default_badge_color")]
    pub badge_color: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub sort_order: i64,
    #[serde(default)]
    pub board_members: Vec<BoardMember>,
    #[serde(default)]
    pub highlights: Vec<Highlight>,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
}

fn default_true() -> bool {
    true
}

fn default_badge_color() -> String {
    "#606161".to_string()
}

impl OrderedEntity for Season {
    const TABLE: &'static str = "season";
}

impl Season {
    /// The current leader, falling back to the first member.
    pub fn leader(&self) -> Option<&BoardMember> {
        self.board_members
            .iter()
            .find(|m| m.is_leader)
            .or_else(|| self.board_members.first())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonCreate {
    pub academic_year: String,
    pub theme: String,
    pub description: Option<String>,
    pub badge_color: Option<String>,
    pub is_active: Option<bool>,
    #[serde(default)]
    pub board_members: Vec<BoardMemberCreate>,
    #[serde(default)]
    pub highlights: Vec<HighlightCreate>,
}

impl SeasonCreate {
    pub fn validate(&self) -> AppResult<()> {
        validate_academic_year(&self.academic_year)?;
        validate_required_text(&self.theme, "theme", MAX_TITLE_LEN)?;
        validate_optional_text(&self.description, "description", MAX_DESCRIPTION_LEN)?;
        if let Some(color) = &self.badge_color {
            validate_hex_color(color, "badge_color")?;
        }
        for member in &self.board_members {
            member.validate()?;
        }
        for highlight in &self.highlights {
            highlight.validate()?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub academic_year: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl SeasonUpdate {
    pub fn validate(&self) -> AppResult<()> {
        if let Some(year) = &self.academic_year {
            validate_academic_year(year)?;
        }
        if let Some(theme) = &self.theme {
            validate_required_text(theme, "theme", MAX_TITLE_LEN)?;
        }
        validate_optional_text(&self.description, "description", MAX_DESCRIPTION_LEN)?;
        if let Some(color) = &self.badge_color {
            validate_hex_color(color, "badge_color")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardMemberCreate {
    pub name: String,
    pub position: String,
    pub is_leader: Option<bool>,
    pub bio: Option<String>,
    pub profile_url: Option<String>,
}

impl BoardMemberCreate {
    pub fn validate(&self) -> AppResult<()> {
        validate_required_text(&self.name, "name", MAX_NAME_LEN)?;
        validate_required_text(&self.position, "position", MAX_NAME_LEN)?;
        validate_optional_text(&self.bio, "bio", MAX_DESCRIPTION_LEN)?;
        if let Some(url) = &self.profile_url {
            validate_url(url, "profile_url")?;
        }
        Ok(())
    }

    pub fn into_member(self, sort_order: i64) -> BoardMember {
        let is_leader = self.is_leader.unwrap_or(false);
        BoardMember {
            id: new_embedded_id(),
            // a leader always presents as Team Leader
            position: if is_leader { "Team Leader".to_string() } else { self.position },
            name: self.name,
            is_leader,
            avatar: MediaRef::default(),
            bio: self.bio.unwrap_or_default(),
            profile_url: self.profile_url.unwrap_or_default(),
            sort_order,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardMemberUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_leader: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_url: Option<String>,
}

impl BoardMemberUpdate {
    pub fn validate(&self) -> AppResult<()> {
        if let Some(name) = &self.name {
            validate_required_text(name, "name", MAX_NAME_LEN)?;
        }
        if let Some(position) = &self.position {
            validate_required_text(position, "position", MAX_NAME_LEN)?;
        }
        validate_optional_text(&self.bio, "bio", MAX_DESCRIPTION_LEN)?;
        if let Some(url) = &self.profile_url {
            validate_url(url, "profile_url")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HighlightCreate {
    pub title: String,
    pub url: Option<String>,
    pub description: Option<String>,
}

impl HighlightCreate {
    pub fn validate(&self) -> AppResult<()> {
        validate_required_text(&self.title, "title", MAX_TITLE_LEN)?;
        if let Some(url) = &self.url {
            validate_url(url, "url")?;
        }
        validate_optional_text(&self.description, "description", MAX_DESCRIPTION_LEN)?;
        Ok(())
    }

    pub fn into_highlight(self, sort_order: i64) -> Highlight {
        Highlight {
            id: new_embedded_id(),
            title: self.title,
            url: self.url.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            image: MediaRef::default(),
            sort_order,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HighlightUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl HighlightUpdate {
    pub fn validate(&self) -> AppResult<()> {
        if let Some(title) = &self.title {
            validate_required_text(title, "title", MAX_TITLE_LEN)?;
        }
        if let Some(url) = &self.url {
            validate_url(url, "url")?;
        }
        validate_optional_text(&self.description, "description", MAX_DESCRIPTION_LEN)?;
        Ok(())
    }
}
