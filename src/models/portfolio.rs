use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::filter::Listable;

/// Gallery images per project
pub const MAX_PORTFOLIO_IMAGES: usize = 10;

/// Portfolio project model
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PortfolioProject {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub object_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    pub images: Vec<String>,
    pub categories: Vec<String>,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    pub technologies: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    pub is_published: bool,
    pub featured: bool,
    pub views: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl PortfolioProject {
    /// Server id, whichever of `id` / `_id` the payload carried.
    pub fn record_id(&self) -> Option<&str> {
        self.id.as_deref().or(self.object_id.as_deref())
    }
}

impl Listable for PortfolioProject {
    fn key(&self) -> &str {
        &self.slug
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }

    fn categories(&self) -> Vec<&str> {
        self.categories.iter().map(String::as_str).collect()
    }

    fn status(&self) -> &str {
        if self.is_published {
            "published"
        } else {
            "draft"
        }
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at.or(self.completed_at)
    }

    fn views(&self) -> u64 {
        self.views
    }
}
