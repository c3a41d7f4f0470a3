/**
 * Filter/Sort Engine
 * Recomputes the visible view of a fetched collection from the current query
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// What the engine needs to know about a catalog entry.
pub trait Listable {
    /// Identifier used in resource paths (slug, or id for messages).
    fn key(&self) -> &str;
    fn title(&self) -> &str;
    fn description(&self) -> &str;
    fn tags(&self) -> &[String];
    fn categories(&self) -> Vec<&str>;
    fn status(&self) -> &str;
    fn created_at(&self) -> Option<DateTime<Utc>>;

    fn effective_price(&self) -> Option<f64> {
        None
    }

    fn views(&self) -> u64 {
        0
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    #[default]
    Newest,
    Oldest,
    PriceAsc,
    PriceDesc,
    MostViewed,
}

impl std::str::FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "newest" | "latest" => Ok(SortKey::Newest),
            "oldest" => Ok(SortKey::Oldest),
            "price-asc" | "price-low" | "price_asc" => Ok(SortKey::PriceAsc),
            "price-desc" | "price-high" | "price_desc" => Ok(SortKey::PriceDesc),
            "most-viewed" | "popular" | "views" => Ok(SortKey::MostViewed),
            other => Err(format!("unknown sort key: {}", other)),
        }
    }
}

/// Inclusive bounds on `salePrice ?? price`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl PriceRange {
    pub fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    pub fn contains(&self, price: f64) -> bool {
        self.min.map_or(true, |min| price >= min) && self.max.map_or(true, |max| price <= max)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogQuery {
    pub search: Option<String>,
    pub category: Option<String>,
    pub status: Option<String>,
    pub price: PriceRange,
    pub sort: SortKey,
}

impl CatalogQuery {
    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = Some(text.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn price_between(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.price = PriceRange { min, max };
        self
    }

    pub fn sort(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }

    pub fn matches<T: Listable>(&self, item: &T) -> bool {
        matches_search(item, self.search.as_deref())
            && matches_category(item, self.category.as_deref())
            && matches_status(item, self.status.as_deref())
            && matches_price(item, &self.price)
    }
}

/// Filter and sort `items` for display. Never mutates the collection.
pub fn apply<'a, T: Listable>(items: &'a [T], query: &CatalogQuery) -> Vec<&'a T> {
    let mut view: Vec<&T> = items.iter().filter(|item| query.matches(*item)).collect();
    sort(&mut view, query.sort);
    view
}

pub fn sort<T: Listable>(view: &mut [&T], key: SortKey) {
    // sort_by is stable, so ties keep fetch order
    match key {
        SortKey::Newest => view.sort_by(|a, b| {
            cmp_missing_last_by(a.created_at(), b.created_at(), |x, y| y.cmp(x))
        }),
        SortKey::Oldest => view.sort_by(|a, b| {
            cmp_missing_last_by(a.created_at(), b.created_at(), |x, y| x.cmp(y))
        }),
        SortKey::PriceAsc => view.sort_by(|a, b| {
            cmp_missing_last_by(a.effective_price(), b.effective_price(), f64::total_cmp)
        }),
        SortKey::PriceDesc => view.sort_by(|a, b| {
            cmp_missing_last_by(a.effective_price(), b.effective_price(), |x, y| y.total_cmp(x))
        }),
        SortKey::MostViewed => view.sort_by(|a, b| b.views().cmp(&a.views())),
    }
}

/// The filter value, or `None` when it means "no filter" (blank or "all").
fn active_filter(value: Option<&str>) -> Option<&str> {
    match value.map(str::trim) {
        None | Some("") => None,
        Some(v) if v.eq_ignore_ascii_case("all") => None,
        Some(v) => Some(v),
    }
}

fn matches_search<T: Listable>(item: &T, search: Option<&str>) -> bool {
    let needle = match search.map(str::trim) {
        None | Some("") => return true,
        Some(s) => s.to_lowercase(),
    };

    item.title().to_lowercase().contains(&needle)
        || item.description().to_lowercase().contains(&needle)
        || item
            .tags()
            .iter()
            .any(|tag| tag.to_lowercase().contains(&needle))
}

fn matches_category<T: Listable>(item: &T, category: Option<&str>) -> bool {
    match active_filter(category) {
        None => true,
        Some(wanted) => item
            .categories()
            .iter()
            .any(|c| c.trim().to_lowercase() == wanted.to_lowercase()),
    }
}

fn matches_status<T: Listable>(item: &T, status: Option<&str>) -> bool {
    match active_filter(status) {
        None => true,
        Some(wanted) => item.status().eq_ignore_ascii_case(wanted),
    }
}

fn matches_price<T: Listable>(item: &T, range: &PriceRange) -> bool {
    if range.is_unbounded() {
        return true;
    }
    item.effective_price()
        .map_or(false, |price| range.contains(price))
}

fn cmp_missing_last_by<V>(a: Option<V>, b: Option<V>, cmp: impl Fn(&V, &V) -> Ordering) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => cmp(&x, &y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
