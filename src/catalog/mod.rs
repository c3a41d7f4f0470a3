//! Pure catalog helpers: slugs, read time and the filter/sort engine.

pub mod filter;
pub mod slug;

pub use filter::{apply, CatalogQuery, Listable, PriceRange, SortKey};
pub use slug::{estimate_read_time, is_valid_slug, slugify, strip_html};
