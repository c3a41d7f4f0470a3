//! Catalog entities as exchanged with the agency REST API (camelCase JSON).

pub mod blog;
pub mod message;
pub mod portfolio;
pub mod product;
pub mod review;

use serde::{Deserialize, Serialize};

pub use blog::{Author, BlogPost};
pub use message::{Message, MessageStatus};
pub use portfolio::{PortfolioProject, MAX_PORTFOLIO_IMAGES};
pub use product::{EbookDetails, Product, ProductKind, ProductType};
pub use review::{Review, ReviewSummary};

/// List payloads arrive either as a bare array or wrapped in an object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ListEnvelope<T> {
    Bare(Vec<T>),
    Wrapped(WrappedList<T>),
}

#[derive(Debug, Deserialize)]
pub struct WrappedList<T> {
    #[serde(
        alias = "data",
        alias = "posts",
        alias = "projects",
        alias = "products",
        alias = "messages",
        alias = "reviews"
    )]
    pub items: Vec<T>,
}

impl<T> ListEnvelope<T> {
    pub fn into_items(self) -> Vec<T> {
        match self {
            ListEnvelope::Bare(items) => items,
            ListEnvelope::Wrapped(w) => w.items,
        }
    }
}

/// Single-entity payloads, bare or wrapped.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ItemEnvelope<T> {
    Wrapped(WrappedItem<T>),
    Bare(T),
}

#[derive(Debug, Deserialize)]
pub struct WrappedItem<T> {
    #[serde(
        alias = "post",
        alias = "project",
        alias = "product",
        alias = "message",
        alias = "review"
    )]
    pub data: T,
}

impl<T> ItemEnvelope<T> {
    pub fn into_inner(self) -> T {
        match self {
            ItemEnvelope::Wrapped(w) => w.data,
            ItemEnvelope::Bare(item) => item,
        }
    }
}

/// Response for POST /api/upload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    #[serde(alias = "secureUrl", alias = "secure_url")]
    pub url: String,
}

/// Generic success body for DELETE / status updates
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
}
