//! Per-field post-processing: price text parsing, stock-status
//! classification, numeric size extraction, image URL absolutization, and
//! order-preserving deduplication.

use regex::Regex;
use rust_decimal::Decimal;

/// Keywords whose presence (case-insensitive substring) marks a stock or
/// availability string as out-of-stock. Absence of all of them means
/// in-stock.
const OUT_OF_STOCK_KEYWORDS: [&str; 3] = ["out of stock", "sold out", "unavailable"];

/// Parse a price out of free text.
///
/// Currency symbols and thousands separators are stripped, then the first
/// numeric substring is parsed as a decimal. `"$1,234.50"` → `1234.50`.
/// Unparsable text yields `None` so the caller can try its next source —
/// a failed parse is never treated as a zero price.
pub(crate) fn parse_price_text(text: &str) -> Option<Decimal> {
    let cleaned: String = text
        .chars()
        .filter(|c| !matches!(c, '$' | '€' | '£' | ','))
        .collect();
    let number_re = Regex::new(r"\d+(?:\.\d+)?").expect("valid regex");
    let matched = number_re.find(&cleaned)?;
    matched.as_str().parse::<Decimal>().ok()
}

/// Parse a price out of an embedded-record value, which may be a JSON
/// number or a string with currency decoration.
pub(crate) fn parse_price_value(value: &serde_json::Value) -> Option<Decimal> {
    match value {
        serde_json::Value::Number(n) => n.to_string().parse::<Decimal>().ok(),
        serde_json::Value::String(s) => parse_price_text(s),
        _ => None,
    }
}

/// Classify a stock/availability string. Defaults to in-stock unless an
/// out-of-stock keyword appears.
pub(crate) fn classify_stock_text(text: &str) -> bool {
    let lowered = text.to_lowercase();
    !OUT_OF_STOCK_KEYWORDS.iter().any(|kw| lowered.contains(kw))
}

/// Extract the leading numeric size from free text (`"Size 10.5 (M)"` →
/// `"10.5"`). Falls back to the trimmed text itself when no number is
/// present; returns `None` for blank input.
pub(crate) fn extract_size_text(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    let number_re = Regex::new(r"\d+(?:\.\d+)?").expect("valid regex");
    match number_re.find(trimmed) {
        Some(m) => Some(m.as_str().to_string()),
        None => Some(trimmed.to_string()),
    }
}

/// Absolutize an image URL against the retailer's base origin.
///
/// Absolute http(s) URLs pass through, protocol-relative URLs gain
/// `https:`, root-relative paths are prefixed with the origin, and anything
/// else is treated as a path relative to the origin. Blank input is `None`.
pub(crate) fn normalize_image_url(raw: &str, base_url: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        return Some(trimmed.to_string());
    }
    if let Some(rest) = trimmed.strip_prefix("//") {
        return Some(format!("https://{rest}"));
    }
    let base = base_url.trim_end_matches('/');
    if trimmed.starts_with('/') {
        return Some(format!("{base}{trimmed}"));
    }
    Some(format!("{base}/{trimmed}"))
}

/// Split an `srcset`-style value (`"url1 640w, url2 1280w"`) into its URL
/// tokens, dropping the width descriptors.
pub(crate) fn split_srcset(value: &str) -> Vec<String> {
    value
        .split(',')
        .filter_map(|part| part.split_whitespace().next())
        .map(ToString::to_string)
        .collect()
}

/// Remove duplicates while preserving first-seen order.
pub(crate) fn dedup_preserving_order(items: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut out = Vec::with_capacity(items.len());
    for item in items {
        if seen.insert(item.clone()) {
            out.push(item);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    // -----------------------------------------------------------------------
    // parse_price_text / parse_price_value
    // -----------------------------------------------------------------------

    #[test]
    fn price_strips_symbol_and_thousands_separator() {
        assert_eq!(
            parse_price_text("$1,234.50"),
            Some("1234.50".parse().unwrap())
        );
    }

    #[test]
    fn price_plain_number() {
        assert_eq!(parse_price_text("145.00"), Some("145.00".parse().unwrap()));
    }

    #[test]
    fn price_euro_and_pound_symbols() {
        assert_eq!(parse_price_text("€129.99"), Some("129.99".parse().unwrap()));
        assert_eq!(parse_price_text("£85"), Some("85".parse().unwrap()));
    }

    #[test]
    fn price_embedded_in_label_text() {
        assert_eq!(
            parse_price_text("Now: $89.97 (was $120)"),
            Some("89.97".parse().unwrap())
        );
    }

    #[test]
    fn unparsable_price_is_none_not_zero() {
        assert_eq!(parse_price_text("Coming soon"), None);
        assert_eq!(parse_price_text(""), None);
    }

    #[test]
    fn price_value_accepts_json_number_and_string() {
        assert_eq!(
            parse_price_value(&serde_json::json!(145.0)),
            Some("145".parse().unwrap())
        );
        assert_eq!(
            parse_price_value(&serde_json::json!("$145.00")),
            Some("145.00".parse().unwrap())
        );
        assert_eq!(parse_price_value(&serde_json::json!(null)), None);
        assert_eq!(parse_price_value(&serde_json::json!(["145"])), None);
    }

    // -----------------------------------------------------------------------
    // classify_stock_text
    // -----------------------------------------------------------------------

    #[test]
    fn out_of_stock_keywords_mark_unavailable() {
        assert!(!classify_stock_text("Out of Stock"));
        assert!(!classify_stock_text("SOLD OUT"));
        assert!(!classify_stock_text("Currently unavailable"));
    }

    #[test]
    fn absence_of_keywords_defaults_to_in_stock() {
        assert!(classify_stock_text("In Stock"));
        assert!(classify_stock_text("https://schema.org/InStock"));
        assert!(classify_stock_text(""));
        assert!(classify_stock_text("Ships in 2 days"));
    }

    // -----------------------------------------------------------------------
    // extract_size_text
    // -----------------------------------------------------------------------

    #[test]
    fn size_extracts_leading_number() {
        assert_eq!(extract_size_text("Size 10.5 (M)").as_deref(), Some("10.5"));
        assert_eq!(extract_size_text("EU 42").as_deref(), Some("42"));
    }

    #[test]
    fn size_without_number_passes_through_trimmed() {
        assert_eq!(extract_size_text("  XL  ").as_deref(), Some("XL"));
    }

    #[test]
    fn blank_size_is_none() {
        assert_eq!(extract_size_text("   "), None);
    }

    // -----------------------------------------------------------------------
    // normalize_image_url
    // -----------------------------------------------------------------------

    #[test]
    fn absolute_urls_pass_through() {
        assert_eq!(
            normalize_image_url("https://static.nike.com/a/images/shoe.png", "https://www.nike.com")
                .as_deref(),
            Some("https://static.nike.com/a/images/shoe.png")
        );
    }

    #[test]
    fn protocol_relative_gains_https() {
        assert_eq!(
            normalize_image_url("//assets.adidas.com/images/shoe.jpg", "https://www.adidas.com")
                .as_deref(),
            Some("https://assets.adidas.com/images/shoe.jpg")
        );
    }

    #[test]
    fn root_relative_prefixed_with_origin() {
        assert_eq!(
            normalize_image_url("/a/images/shoe.png", "https://www.nike.com").as_deref(),
            Some("https://www.nike.com/a/images/shoe.png")
        );
    }

    #[test]
    fn bare_relative_path_joined_to_origin() {
        assert_eq!(
            normalize_image_url("images/shoe.png", "https://www.nike.com").as_deref(),
            Some("https://www.nike.com/images/shoe.png")
        );
    }

    #[test]
    fn blank_url_is_dropped() {
        assert_eq!(normalize_image_url("   ", "https://www.nike.com"), None);
    }

    // -----------------------------------------------------------------------
    // split_srcset / dedup_preserving_order
    // -----------------------------------------------------------------------

    #[test]
    fn srcset_splits_to_bare_urls() {
        assert_eq!(
            split_srcset("https://c.com/a.jpg 640w, https://c.com/b.jpg 1280w"),
            vec!["https://c.com/a.jpg", "https://c.com/b.jpg"]
        );
    }

    #[test]
    fn srcset_single_url_untouched() {
        assert_eq!(split_srcset("https://c.com/a.jpg"), vec!["https://c.com/a.jpg"]);
    }

    #[test]
    fn dedup_keeps_first_seen_order() {
        let input = vec![
            "b".to_string(),
            "a".to_string(),
            "b".to_string(),
            "c".to_string(),
            "a".to_string(),
        ];
        assert_eq!(dedup_preserving_order(input), vec!["b", "a", "c"]);
    }
}
