use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::filter::Listable;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// Blog post model
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BlogPost {
    /// Mongo `_id`; some deployments also send the `id` virtual
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub object_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    /// HTML body
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    pub author: Author,
    pub category: String,
    pub tags: Vec<String>,
    pub is_published: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    pub views: u64,
    /// Estimated minutes to read
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_time: Option<u32>,
}

impl BlogPost {
    /// Server id, whichever of `id` / `_id` the payload carried.
    pub fn record_id(&self) -> Option<&str> {
        self.id.as_deref().or(self.object_id.as_deref())
    }
}

impl Listable for BlogPost {
    fn key(&self) -> &str {
        &self.slug
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn description(&self) -> &str {
        &self.excerpt
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }

    fn categories(&self) -> Vec<&str> {
        vec![self.category.as_str()]
    }

    fn status(&self) -> &str {
        if self.is_published {
            "published"
        } else {
            "draft"
        }
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at.or(self.published_at)
    }

    fn views(&self) -> u64 {
        self.views
    }
}
