//! Multi-strategy product-page extraction for supported retailers.
//!
//! Given the raw markup of a product-detail page, the pipeline cascades
//! through independent strategies — embedded structured data, CSS-selector
//! heuristics, URL-derived fallback — and reconciles their outputs into one
//! [`soletrack_core::ScrapedProduct`]. Strategy parameters (selector tables,
//! hydration-state patterns, URL rules) live in per-retailer
//! [`retailer::RetailerProfile`] tables; the control flow is shared.

mod embedded;
mod normalize;
mod record;
mod selectors;
mod variants;

pub mod error;
pub mod fetch;
pub mod pipeline;
pub mod retailer;

pub use error::ScrapeError;
pub use fetch::build_http_client;
pub use pipeline::{extract_product, ProductScraper};
pub use retailer::Retailer;
