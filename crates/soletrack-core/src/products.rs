//! Domain types shared by the scraper pipeline and the HTTP surface.
//!
//! Field names match the wire format consumed by the downstream price
//! tracker (`color` / `shoe_size` / `unique_identifier`, `price` /
//! `is_in_stock`), so these types serialize directly into API responses.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One purchasable color/size combination of a product.
///
/// `unique_identifier` is the retailer's stable style/product code when one
/// could be discovered, a synthesized `"{color}-{size}"` composite when not,
/// and the `"UNKNOWN"` sentinel as a last resort. It is never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductVariant {
    pub color: String,
    pub shoe_size: String,
    pub unique_identifier: String,
}

/// A single price/stock observation taken at scrape time.
///
/// `price` is always non-negative. When no price signal exists anywhere on
/// the page the pipeline emits `{0, false}` rather than an empty history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceSnapshot {
    pub price: Decimal,
    pub is_in_stock: bool,
}

impl PriceSnapshot {
    /// The snapshot emitted when every price strategy came up empty.
    #[must_use]
    pub fn unavailable() -> Self {
        Self {
            price: Decimal::ZERO,
            is_in_stock: false,
        }
    }
}

/// Aggregate result of one scrape request.
///
/// Constructed once per request and immutable afterwards; nothing here
/// outlives the request. History accrual across time belongs to the
/// downstream tracker, so `price_history` always holds exactly the
/// observations from this one page load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapedProduct {
    pub variants: Vec<ProductVariant>,
    pub price_history: Vec<PriceSnapshot>,
    pub images: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unavailable_snapshot_is_zero_and_out_of_stock() {
        let snapshot = PriceSnapshot::unavailable();
        assert_eq!(snapshot.price, Decimal::ZERO);
        assert!(!snapshot.is_in_stock);
    }

    #[test]
    fn variant_serializes_with_wire_field_names() {
        let variant = ProductVariant {
            color: "White/White/Hyper Pink/Black".to_string(),
            shoe_size: "10".to_string(),
            unique_identifier: "IM6674-101".to_string(),
        };
        let json = serde_json::to_string(&variant).expect("serialize");
        assert!(json.contains("\"shoe_size\":\"10\""));
        assert!(json.contains("\"unique_identifier\":\"IM6674-101\""));
    }

    #[test]
    fn price_serializes_as_number_not_string() {
        let snapshot = PriceSnapshot {
            price: Decimal::new(14_500, 2), // 145.00
            is_in_stock: true,
        };
        let json = serde_json::to_string(&snapshot).expect("serialize");
        let parsed: serde_json::Value = serde_json::from_str(&json).expect("parse");
        assert!(
            parsed["price"].is_number(),
            "price must be a JSON number, got: {json}"
        );
        assert!((parsed["price"].as_f64().unwrap() - 145.0).abs() < 1e-9);
    }

    #[test]
    fn scraped_product_round_trips() {
        let product = ScrapedProduct {
            variants: vec![ProductVariant {
                color: "Red".to_string(),
                shoe_size: "9".to_string(),
                unique_identifier: "ABC123".to_string(),
            }],
            price_history: vec![PriceSnapshot::unavailable()],
            images: vec!["https://static.nike.com/a/images/shoe.png".to_string()],
        };
        let json = serde_json::to_string(&product).expect("serialize");
        let back: ScrapedProduct = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, product);
    }
}
