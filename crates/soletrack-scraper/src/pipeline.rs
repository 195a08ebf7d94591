//! The per-request extraction pipeline.
//!
//! One fetch, then three independent passes over the same markup —
//! variants, price/stock, images — each cascading embedded data →
//! CSS selectors → URL/default fallback. The pipeline never fails because
//! a page didn't match any heuristic; it degrades to documented defaults.
//! Only the fetch can error.

use scraper::Html;
use soletrack_core::{PriceSnapshot, ProductVariant, ScrapedProduct};

use crate::embedded::find_embedded_product;
use crate::error::ScrapeError;
use crate::fetch;
use crate::normalize::{
    classify_stock_text, dedup_preserving_order, normalize_image_url, parse_price_value,
};
use crate::record::EmbeddedProduct;
use crate::retailer::{Retailer, RetailerProfile};
use crate::selectors;
use crate::variants::{assemble_variants, default_variant};

/// Scrapes product pages for one retailer.
///
/// Holds no per-request state; one instance serves concurrent requests.
#[derive(Debug, Clone)]
pub struct ProductScraper {
    client: reqwest::Client,
    retailer: Retailer,
    user_agent: String,
}

impl ProductScraper {
    #[must_use]
    pub fn new(client: reqwest::Client, retailer: Retailer, user_agent: impl Into<String>) -> Self {
        Self {
            client,
            retailer,
            user_agent: user_agent.into(),
        }
    }

    /// Fetch `url` and extract a best-effort product record from it.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError`] only for transport failures; extraction
    /// itself always produces a result.
    pub async fn scrape(&self, url: &str) -> Result<ScrapedProduct, ScrapeError> {
        let html = fetch::fetch_page(&self.client, url, &self.user_agent).await?;
        Ok(extract_product(self.retailer.profile(), &html, url))
    }
}

/// Pure extraction over already-fetched markup.
///
/// Deterministic: identical `html` and `url` yield identical output.
#[must_use]
pub fn extract_product(profile: &RetailerProfile, html: &str, url: &str) -> ScrapedProduct {
    let doc = Html::parse_document(html);
    let record = find_embedded_product(html, profile.state_patterns).map(EmbeddedProduct::new);
    if record.is_some() {
        tracing::debug!(retailer = profile.name, url, "found embedded product data");
    }

    ScrapedProduct {
        variants: extract_variants(profile, &doc, record.as_ref(), url),
        price_history: extract_price_history(profile, &doc, record.as_ref()),
        images: extract_images(profile, &doc, record.as_ref()),
    }
}

fn extract_variants(
    profile: &RetailerProfile,
    doc: &Html,
    record: Option<&EmbeddedProduct>,
    url: &str,
) -> Vec<ProductVariant> {
    if let Some(record) = record {
        let variants =
            assemble_variants(&record.colors(), &record.sizes(), record.identifier().as_deref());
        if !variants.is_empty() {
            return variants;
        }
    }

    let colors = selectors::collect_colors(doc, profile);
    let sizes = selectors::collect_sizes(doc, profile);
    let url_identifier = profile.identifier_from_url(url);
    let variants = assemble_variants(&colors, &sizes, url_identifier.as_deref());
    if !variants.is_empty() {
        return variants;
    }

    tracing::warn!(
        retailer = profile.name,
        url,
        "no variant signal found, emitting default variant"
    );
    vec![default_variant(doc, profile, url)]
}

fn extract_price_history(
    profile: &RetailerProfile,
    doc: &Html,
    record: Option<&EmbeddedProduct>,
) -> Vec<PriceSnapshot> {
    if let Some(record) = record {
        if let Some(price) = record.price().as_ref().and_then(parse_price_value) {
            let is_in_stock = record
                .availability()
                .is_none_or(|text| classify_stock_text(&text));
            return vec![PriceSnapshot { price, is_in_stock }];
        }
    }

    if let Some(price) = selectors::find_price(doc, profile) {
        let is_in_stock = selectors::find_stock_status(doc, profile);
        return vec![PriceSnapshot { price, is_in_stock }];
    }

    tracing::warn!(
        retailer = profile.name,
        "no price signal found, emitting unavailable snapshot"
    );
    vec![PriceSnapshot::unavailable()]
}

fn extract_images(
    profile: &RetailerProfile,
    doc: &Html,
    record: Option<&EmbeddedProduct>,
) -> Vec<String> {
    let mut raw = record.map(EmbeddedProduct::images).unwrap_or_default();
    raw.extend(selectors::collect_images(doc, profile));

    let normalized = raw
        .iter()
        .filter_map(|image| normalize_image_url(image, profile.base_url))
        .collect();
    dedup_preserving_order(normalized)
}
