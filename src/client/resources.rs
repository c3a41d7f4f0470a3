/**
 * Resource Endpoints
 * Typed calls for /api/blog, /api/portfolio, /api/products and /api/messages
 */
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::ApiClient;
use crate::catalog::filter::Listable;
use crate::error::Result;
use crate::models::{
    BlogPost, ItemEnvelope, ListEnvelope, Message, MessageStatus, PortfolioProject, Product,
    ProductType, Review,
};

// ============================================================================
// Resources
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Blog,
    Portfolio,
    Products,
    Messages,
}

impl Resource {
    pub fn segments(&self) -> [&'static str; 2] {
        match self {
            Resource::Blog => ["api", "blog"],
            Resource::Portfolio => ["api", "portfolio"],
            Resource::Products => ["api", "products"],
            Resource::Messages => ["api", "messages"],
        }
    }

    /// Singular noun used in error messages.
    pub fn label(&self) -> &'static str {
        match self {
            Resource::Blog => "blog post",
            Resource::Portfolio => "portfolio project",
            Resource::Products => "product",
            Resource::Messages => "message",
        }
    }

    /// Admin page the forms return to after saving.
    pub fn admin_path(&self) -> &'static str {
        match self {
            Resource::Blog => "/admin/blog",
            Resource::Portfolio => "/admin/portfolio",
            Resource::Products => "/admin/products",
            Resource::Messages => "/admin/messages",
        }
    }
}

/// An entity served by one of the CRUD resources.
pub trait CatalogEntity: DeserializeOwned + Serialize + Listable + Clone + Send + Sync + 'static {
    const RESOURCE: Resource;
}

impl CatalogEntity for BlogPost {
    const RESOURCE: Resource = Resource::Blog;
}

impl CatalogEntity for PortfolioProject {
    const RESOURCE: Resource = Resource::Portfolio;
}

impl CatalogEntity for Product {
    const RESOURCE: Resource = Resource::Products;
}

impl CatalogEntity for Message {
    const RESOURCE: Resource = Resource::Messages;
}

// ============================================================================
// Query Types
// ============================================================================

/// Query parameters for GET /api/products
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_type: Option<ProductType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ReviewQuery<'a> {
    product_id: &'a str,
}

#[derive(Debug, Serialize)]
struct StatusUpdate {
    status: MessageStatus,
}

// ============================================================================
// Generic CRUD
// ============================================================================

impl ApiClient {
    /// GET the whole collection.
    pub async fn list<T: CatalogEntity>(&self) -> Result<Vec<T>> {
        let envelope: ListEnvelope<T> = self
            .get_json(&T::RESOURCE.segments(), T::RESOURCE.label())
            .await?;
        Ok(envelope.into_items())
    }

    /// GET /{resource}/{key}
    pub async fn fetch_one<T: CatalogEntity>(&self, key: &str) -> Result<T> {
        let [api, name] = T::RESOURCE.segments();
        let envelope: ItemEnvelope<T> = self
            .get_json(&[api, name, key], T::RESOURCE.label())
            .await?;
        Ok(envelope.into_inner())
    }

    /// POST a new entity.
    pub async fn create<T, B>(&self, body: &B) -> Result<T>
    where
        T: CatalogEntity,
        B: Serialize + ?Sized,
    {
        let envelope: ItemEnvelope<T> = self
            .send_json(Method::POST, &T::RESOURCE.segments(), body, T::RESOURCE.label())
            .await?;
        let created = envelope.into_inner();
        tracing::info!(resource = T::RESOURCE.label(), key = %created.key(), "created");
        Ok(created)
    }

    /// PUT /{resource}/{key}
    pub async fn update<T, B>(&self, key: &str, body: &B) -> Result<T>
    where
        T: CatalogEntity,
        B: Serialize + ?Sized,
    {
        let [api, name] = T::RESOURCE.segments();
        let envelope: ItemEnvelope<T> = self
            .send_json(Method::PUT, &[api, name, key], body, T::RESOURCE.label())
            .await?;
        tracing::info!(resource = T::RESOURCE.label(), key = %key, "updated");
        Ok(envelope.into_inner())
    }

    /// DELETE /{resource}/{key}
    pub async fn remove<T: CatalogEntity>(&self, key: &str) -> Result<()> {
        let [api, name] = T::RESOURCE.segments();
        self.delete(&[api, name, key], T::RESOURCE.label()).await?;
        tracing::info!(resource = T::RESOURCE.label(), key = %key, "deleted");
        Ok(())
    }

    // ========================================================================
    // Resource-specific calls
    // ========================================================================

    /// GET /api/products?productType=&category=&limit=
    pub async fn list_products(&self, query: &ProductListQuery) -> Result<Vec<Product>> {
        let envelope: ListEnvelope<Product> = self
            .get_json_with_query(&Resource::Products.segments(), query, Resource::Products.label())
            .await?;
        Ok(envelope.into_items())
    }

    /// GET /api/products/reviews?productId=
    pub async fn list_reviews(&self, product_id: &str) -> Result<Vec<Review>> {
        let envelope: ListEnvelope<Review> = self
            .get_json_with_query(
                &["api", "products", "reviews"],
                &ReviewQuery { product_id },
                "review",
            )
            .await?;
        Ok(envelope.into_items())
    }

    /// POST /api/products/reviews
    pub async fn create_review<B: Serialize + ?Sized>(&self, body: &B) -> Result<Review> {
        let envelope: ItemEnvelope<Review> = self
            .send_json(Method::POST, &["api", "products", "reviews"], body, "review")
            .await?;
        Ok(envelope.into_inner())
    }

    /// PATCH /api/messages/{id} with the new inbox status.
    pub async fn set_message_status(&self, id: &str, status: MessageStatus) -> Result<Message> {
        let envelope: ItemEnvelope<Message> = self
            .send_json(
                Method::PATCH,
                &["api", "messages", id],
                &StatusUpdate { status },
                Resource::Messages.label(),
            )
            .await?;
        tracing::info!(id = %id, status = %status, "message status changed");
        Ok(envelope.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_query_serializes_camel_case() {
        let query = ProductListQuery {
            product_type: Some(ProductType::Ebook),
            category: None,
            limit: Some(12),
        };
        let value = serde_json::to_value(&query).unwrap();
        assert_eq!(value, serde_json::json!({ "productType": "ebook", "limit": 12 }));
    }

    #[test]
    fn test_resource_paths() {
        assert_eq!(Resource::Blog.segments(), ["api", "blog"]);
        assert_eq!(<Product as CatalogEntity>::RESOURCE, Resource::Products);
        assert_eq!(Resource::Messages.admin_path(), "/admin/messages");
    }
}
