use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{non_blank, normalize_list, Draft, ValidationError, Validator};
use crate::models::{EbookDetails, Product, ProductKind};

/// Request body for POST /api/products and PUT /api/products/{slug}
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    pub title: String,
    pub slug: String,
    pub description: String,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sale_price: Option<f64>,
    pub category: String,
    pub tags: Vec<String>,
    pub features: Vec<String>,
    pub images: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main_image: Option<String>,
    pub is_published: bool,
    pub is_featured: bool,
    pub stock: u32,
    #[serde(flatten)]
    pub kind: ProductKind,
}

impl ProductDraft {
    pub fn ebook() -> Self {
        Self {
            kind: ProductKind::Ebook(EbookDetails::default()),
            ..Default::default()
        }
    }

    pub fn ebook_details_mut(&mut self) -> Option<&mut EbookDetails> {
        match &mut self.kind {
            ProductKind::Ebook(details) => Some(details),
            ProductKind::Product => None,
        }
    }
}

impl Draft for ProductDraft {
    type Entity = Product;

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
        let price_ok = self.price.is_finite() && self.price >= 0.0;
        let sale_ok = self
            .sale_price
            .map_or(true, |sale| sale.is_finite() && sale >= 0.0);
        let sale_below_price = self
            .sale_price
            .map_or(true, |sale| !price_ok || !sale_ok || sale < self.price);

        let mut v = Validator::new();
        v.text("title", "Title", &self.title, 3)
            .slug(&self.slug)
            .text("description", "Description", &self.description, 10)
            .check(price_ok, "price", "Price must be a number of 0 or more")
            .check(sale_ok, "salePrice", "Sale price must be a number of 0 or more")
            .check(
                sale_below_price,
                "salePrice",
                "Sale price must be lower than the regular price",
            )
            .text("category", "Category", &self.category, 1);

        if let ProductKind::Ebook(details) = &self.kind {
            v.check(
                details.page_count.map_or(false, |n| n > 0),
                "pageCount",
                "Page count is required for ebooks",
            )
            .check(
                details
                    .file_format
                    .as_deref()
                    .map_or(false, |f| !f.trim().is_empty()),
                "fileFormat",
                "File format is required for ebooks",
            );
        }

        v.finish()
    }

    fn prepare(&mut self, _now: DateTime<Utc>) {
        self.title = self.title.trim().to_string();
        self.description = self.description.trim().to_string();
        self.category = self.category.trim().to_string();
        normalize_list(&mut self.tags);
        normalize_list(&mut self.features);
        self.images.retain(|i| !i.trim().is_empty());
        self.main_image = non_blank(self.main_image.take()).or_else(|| self.images.first().cloned());
        if let ProductKind::Ebook(details) = &mut self.kind {
            details.isbn = non_blank(details.isbn.take());
            details.publisher = non_blank(details.publisher.take());
            details.language = non_blank(details.language.take());
            details.file_format = non_blank(details.file_format.take()).map(|f| f.to_uppercase());
        }
    }

    fn from_entity(product: &Product) -> Self {
        Self {
            title: product.title.clone(),
            slug: product.slug.clone(),
            description: product.description.clone(),
            price: product.price,
            sale_price: product.sale_price,
            category: product.category.clone(),
            tags: product.tags.clone(),
            features: product.features.clone(),
            images: product.images.clone(),
            main_image: product.main_image.clone(),
            is_published: product.is_published,
            is_featured: product.is_featured,
            stock: product.stock,
            kind: product.kind.clone(),
        }
    }
}
