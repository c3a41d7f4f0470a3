use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{non_blank, normalize_list, Draft, ValidationError, Validator};
use crate::catalog::slug::{estimate_read_time, strip_html};
use crate::models::{Author, BlogPost};

pub const DEFAULT_AUTHOR: &str = "U3DEVLAB Team";

/// Request body for POST /api/blog and PUT /api/blog/{slug}
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogDraft {
    pub title: String,
    pub slug: String,
    pub excerpt: String,
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
    pub read_time: Option<u32>,
}

impl Default for BlogDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            slug: String::new(),
            excerpt: String::new(),
            content: String::new(),
            cover_image: None,
            author: Author {
                name: DEFAULT_AUTHOR.to_string(),
                avatar: None,
            },
            category: String::new(),
            tags: Vec::new(),
            is_published: false,
            published_at: None,
            read_time: None,
        }
    }
}

/// Sanitize HTML content using ammonia
fn sanitize_html(html: &str) -> String {
    ammonia::clean(html)
}

impl Draft for BlogDraft {
    type Entity = BlogPost;

    fn title(&self) -> &str {
        &self.title
    }

    fn set_title(&mut self, title: String) {
        self.title = title;
    }

    fn slug(&self) -> &str {
        &self.slug
    }

    fn set_slug(&mut self, slug: String) {
        self.slug = slug;
    }

    fn validate(&self) -> Result<(), ValidationError> {
        let visible_content = strip_html(&self.content);
        Validator::new()
            .text("title", "Title", &self.title, 3)
            .slug(&self.slug)
            .text("excerpt", "Excerpt", &self.excerpt, 10)
            .text("content", "Content", &visible_content, 20)
            .text("category", "Category", &self.category, 1)
            .text("author", "Author name", &self.author.name, 2)
            .finish()
    }

    fn prepare(&mut self, now: DateTime<Utc>) {
        self.title = self.title.trim().to_string();
        self.excerpt = self.excerpt.trim().to_string();
        self.content = sanitize_html(&self.content);
        self.cover_image = non_blank(self.cover_image.take());
        normalize_list(&mut self.tags);
        self.read_time = Some(estimate_read_time(&self.content));
        if self.is_published && self.published_at.is_none() {
            self.published_at = Some(now);
        }
    }

    fn from_entity(post: &BlogPost) -> Self {
        Self {
            title: post.title.clone(),
            slug: post.slug.clone(),
            excerpt: post.excerpt.clone(),
            content: post.content.clone(),
            cover_image: post.cover_image.clone(),
            author: post.author.clone(),
            category: post.category.clone(),
            tags: post.tags.clone(),
            is_published: post.is_published,
            published_at: post.published_at,
            read_time: post.read_time,
        }
    }
}
