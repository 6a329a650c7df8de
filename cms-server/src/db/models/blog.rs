//! Blog Model
//!
//! Posts are recency-sorted, not part of the ordered-collection protocol.
//! View counts are debounced through the [`ViewTracker`] service.
//!
//! [`ViewTracker`]: crate::services::ViewTracker

use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;

use super::serde_thing;
use crate::utils::AppResult;
use crate::utils::validation::{
    MAX_CONTENT_LEN, MAX_NAME_LEN, MAX_NOTE_LEN, MAX_TITLE_LEN, validate_optional_text,
    validate_required_text, validate_url,
};

pub type BlogId = Thing;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlogStatus {
    Draft,
    Published,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Blog {
    #[serde(default, with = "serde_thing::option", skip_serializing_if = "Option::is_none")]
    pub id: Option<BlogId>,
    pub title: String,
    /// URL fragment, unique among posts
    pub slug: String,
    #[serde(default)]
    pub excerpt: String,
    pub content: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub author_name: String,
    #[serde(default)]
    pub featured: bool,
    #[serde(default = "default_status")]
    pub status: BlogStatus,
    #[serde(default)]
    pub views: i64,
    #[serde(default)]
    pub published_at: i64,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
}

fn default_category() -> String {
    "blog".to_string()
}

fn default_status() -> BlogStatus {
    BlogStatus::Published
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogCreate {
    pub title: String,
    pub slug: String,
    pub excerpt: Option<String>,
    pub content: String,
    pub category: Option<String>,
    pub image_url: Option<String>,
    pub author_name: Option<String>,
    pub featured: Option<bool>,
    pub status: Option<BlogStatus>,
}

impl BlogCreate {
    pub fn validate(&self) -> AppResult<()> {
        validate_required_text(&self.title, "title", MAX_TITLE_LEN)?;
        validate_slug(&self.slug)?;
        validate_optional_text(&self.excerpt, "excerpt", MAX_NOTE_LEN)?;
        validate_required_text(&self.content, "content", MAX_CONTENT_LEN)?;
        validate_optional_text(&self.category, "category", MAX_NAME_LEN)?;
        if let Some(url) = &self.image_url {
            validate_url(url, "image_url")?;
        }
        validate_optional_text(&self.author_name, "author_name", MAX_NAME_LEN)?;
        Ok(())
    }

    pub fn into_blog(self, now: i64) -> Blog {
        let status = self.status.unwrap_or_else(default_status);
        Blog {
            id: None,
            title: self.title,
            slug: self.slug,
            excerpt: self.excerpt.unwrap_or_default(),
            content: self.content,
            category: self.category.unwrap_or_else(default_category),
            image_url: self.image_url.unwrap_or_default(),
            author_name: self.author_name.unwrap_or_default(),
            featured: self.featured.unwrap_or(false),
            status,
            views: 0,
            published_at: if matches!(status, BlogStatus::Published) { now } else { 0 },
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<BlogStatus>,
}

impl BlogUpdate {
    pub fn validate(&self) -> AppResult<()> {
        if let Some(title) = &self.title {
            validate_required_text(title, "title", MAX_TITLE_LEN)?;
        }
        if let Some(slug) = &self.slug {
            validate_slug(slug)?;
        }
        validate_optional_text(&self.excerpt, "excerpt", MAX_NOTE_LEN)?;
        if let Some(content) = &self.content {
            validate_required_text(content, "content", MAX_CONTENT_LEN)?;
        }
        validate_optional_text(&self.category, "category", MAX_NAME_LEN)?;
        if let Some(url) = &self.image_url {
            validate_url(url, "image_url")?;
        }
        validate_optional_text(&self.author_name, "author_name", MAX_NAME_LEN)?;
        Ok(())
    }
}

fn validate_slug(slug: &str) -> AppResult<()> {
    validate_required_text(slug, "slug", MAX_TITLE_LEN)?;
    let valid = slug
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
    if !valid {
        return Err(crate::utils::AppError::validation(
            "slug may only contain lowercase letters, digits and dashes",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugs() {
        assert!(validate_slug("spring-hackathon-2024").is_ok());
        assert!(validate_slug("Spring Hackathon").is_err());
        assert!(validate_slug("post/with/slashes").is_err());
    }
}
