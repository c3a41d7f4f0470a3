use chrono::{DateTime, Utc};
use reqwest::Url;
use serde::Serialize;

use super::{non_blank, normalize_list, Draft, ValidationError, Validator};
use crate::models::{PortfolioProject, MAX_PORTFOLIO_IMAGES};

/// Request body for POST /api/portfolio and PUT /api/portfolio/{slug}
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioDraft {
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
}

fn is_http_url(value: &str) -> bool {
    Url::parse(value.trim())
        .map(|url| matches!(url.scheme(), "http" | "https") && url.host().is_some())
        .unwrap_or(false)
}

impl PortfolioDraft {
    /// Adds an image unless the gallery is full. Returns whether it was added.
    pub fn add_image(&mut self, url: impl Into<String>) -> bool {
        if self.images.len() >= MAX_PORTFOLIO_IMAGES {
            return false;
        }
        self.images.push(url.into());
        true
    }

    pub fn remove_image(&mut self, index: usize) -> Option<String> {
        (index < self.images.len()).then(|| self.images.remove(index))
    }
}

impl Draft for PortfolioDraft {
    type Entity = PortfolioProject;

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
        let has_category = self.categories.iter().any(|c| !c.trim().is_empty());
        let website_ok = self
            .website
            .as_deref()
            .map_or(true, |w| w.trim().is_empty() || is_http_url(w));

        Validator::new()
            .text("title", "Title", &self.title, 3)
            .slug(&self.slug)
            .text("description", "Description", &self.description, 10)
            .check(has_category, "categories", "Select at least one category")
            .check(
                self.images.len() <= MAX_PORTFOLIO_IMAGES,
                "images",
                &format!("You can add up to {} images", MAX_PORTFOLIO_IMAGES),
            )
            .check(website_ok, "website", "Website must be a valid http(s) URL")
            .finish()
    }

    fn prepare(&mut self, _now: DateTime<Utc>) {
        self.title = self.title.trim().to_string();
        self.description = self.description.trim().to_string();
        self.content = ammonia::clean(&self.content);
        self.cover_image = non_blank(self.cover_image.take());
        self.client = non_blank(self.client.take());
        self.website = non_blank(self.website.take());
        normalize_list(&mut self.categories);
        normalize_list(&mut self.tags);
        normalize_list(&mut self.technologies);
        self.images.retain(|i| !i.trim().is_empty());
        if self.cover_image.is_none() {
            self.cover_image = self.images.first().cloned();
        }
    }

    fn from_entity(project: &PortfolioProject) -> Self {
        Self {
            title: project.title.clone(),
            slug: project.slug.clone(),
            description: project.description.clone(),
            content: project.content.clone(),
            cover_image: project.cover_image.clone(),
            images: project.images.clone(),
            categories: project.categories.clone(),
            tags: project.tags.clone(),
            client: project.client.clone(),
            completed_at: project.completed_at,
            technologies: project.technologies.clone(),
            website: project.website.clone(),
            is_published: project.is_published,
            featured: project.featured,
        }
    }
}
