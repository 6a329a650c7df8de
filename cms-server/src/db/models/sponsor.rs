//! Sponsor Model
//!
//! Sponsors and partners share one collection and one ordering; the public
//! listing splits them by kind.

use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;

use super::image_ref::ImageRef;
use super::serde_thing;
use crate::ordering::OrderedEntity;
use crate::utils::AppResult;
use crate::utils::validation::{MAX_NAME_LEN, validate_required_text, validate_url};

pub type SponsorId = Thing;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SponsorKind {
    Sponsor,
    Partner,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sponsor {
    #[serde(default, with = "serde_thing::option", skip_serializing_if = "Option::is_none")]
    pub id: Option<SponsorId>,
    pub name: String,
    pub kind: SponsorKind,
    pub logo: ImageRef,
    pub website: String,
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

impl OrderedEntity for Sponsor {
    const TABLE: &'static str = "sponsor";
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SponsorCreate {
    pub name: String,
    pub kind: SponsorKind,
    pub logo: ImageRef,
    pub website: String,
    pub is_active: Option<bool>,
}

impl SponsorCreate {
    pub fn validate(&self) -> AppResult<()> {
        validate_required_text(&self.name, "name", MAX_NAME_LEN)?;
        validate_required_text(&self.logo.url, "logo.url", 2048)?;
        validate_url(&self.logo.url, "logo.url")?;
        validate_required_text(&self.website, "website", 2048)?;
        validate_url(&self.website, "website")?;
        Ok(())
    }

    pub fn into_sponsor(self, sort_order: i64, now: i64) -> Sponsor {
        Sponsor {
            id: None,
            name: self.name,
            kind: self.kind,
            logo: self.logo,
            website: self.website,
            sort_order,
            is_active: self.is_active.unwrap_or(true),
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SponsorUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<SponsorKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<ImageRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

impl SponsorUpdate {
    pub fn validate(&self) -> AppResult<()> {
        if let Some(name) = &self.name {
            validate_required_text(name, "name", MAX_NAME_LEN)?;
        }
        if let Some(logo) = &self.logo {
            validate_url(&logo.url, "logo.url")?;
        }
        if let Some(website) = &self.website {
            validate_required_text(website, "website", 2048)?;
            validate_url(website, "website")?;
        }
        Ok(())
    }
}

/// Public split listing.
#[derive(Debug, Serialize)]
pub struct SponsorsView {
    pub sponsors: Vec<Sponsor>,
    pub partners: Vec<Sponsor>,
}
