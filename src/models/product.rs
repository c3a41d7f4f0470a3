use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::catalog::filter::Listable;

/// Discriminator values used by `?productType=`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductType {
    Product,
    Ebook,
}

impl ProductType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductType::Product => "product",
            ProductType::Ebook => "ebook",
        }
    }
}

impl std::str::FromStr for ProductType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "product" | "shop" => Ok(ProductType::Product),
            "ebook" | "e-book" => Ok(ProductType::Ebook),
            other => Err(format!("unknown product type: {}", other)),
        }
    }
}

/// Ebook-only fields
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EbookDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub isbn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "productType", rename_all = "lowercase")]
pub enum ProductKind {
    #[default]
    Product,
    Ebook(EbookDetails),
}

/// Wire shape behind `ProductKind`: the tag is optional on read.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct KindFields {
    #[serde(default)]
    product_type: Option<String>,
    #[serde(flatten)]
    details: EbookDetails,
}

// A missing or unrecognised `productType` reads as a plain shop item.
impl<'de> Deserialize<'de> for ProductKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let fields = KindFields::deserialize(deserializer)?;
        let kind = match fields.product_type.as_deref().map(str::parse::<ProductType>) {
            Some(Ok(ProductType::Ebook)) => ProductKind::Ebook(fields.details),
            Some(Ok(ProductType::Product)) | None => ProductKind::Product,
            Some(Err(e)) => {
                tracing::debug!(error = %e, "reading product as a shop item");
                ProductKind::Product
            }
        };
        Ok(kind)
    }
}

/// Shop item or ebook
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub object_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sale_price: Option<f64>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_image: Option<String>,
    #[serde(default)]
    pub is_published: bool,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub stock: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub kind: ProductKind,
}

impl Product {
    pub fn record_id(&self) -> Option<&str> {
        self.id.as_deref().or(self.object_id.as_deref())
    }

    /// Price the customer pays: `salePrice ?? price`.
    pub fn effective_price(&self) -> f64 {
        self.sale_price.unwrap_or(self.price)
    }

    pub fn is_on_sale(&self) -> bool {
        matches!(self.sale_price, Some(sale) if sale < self.price)
    }

    /// Whole-percent discount, 0 when not on sale.
    pub fn discount_percent(&self) -> u32 {
        match self.sale_price {
            Some(sale) if self.price > 0.0 && sale < self.price => {
                (((self.price - sale) / self.price) * 100.0).round() as u32
            }
            _ => 0,
        }
    }

    pub fn product_type(&self) -> ProductType {
        match self.kind {
            ProductKind::Product => ProductType::Product,
            ProductKind::Ebook(_) => ProductType::Ebook,
        }
    }

    pub fn ebook(&self) -> Option<&EbookDetails> {
        match &self.kind {
            ProductKind::Ebook(details) => Some(details),
            ProductKind::Product => None,
        }
    }

    /// Ebooks are digital and never run out.
    pub fn in_stock(&self) -> bool {
        match self.kind {
            ProductKind::Ebook(_) => true,
            ProductKind::Product => self.stock > 0,
        }
    }
}

impl Listable for Product {
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
        self.created_at
    }

    fn effective_price(&self) -> Option<f64> {
        Some(Product::effective_price(self))
    }
}
