//! Strategy 1: embedded structured data.
//!
//! Scans raw markup for JSON-LD product blocks, then for known
//! hydration-state JSON assignments. Malformed JSON at any candidate is
//! skipped, never fatal — an empty result just means "try the next
//! strategy".

use regex::Regex;

/// Extract the first product-shaped JSON object embedded in `html`.
///
/// Search order, first success wins:
/// 1. every `<script type="application/ld+json">` block, accepting the
///    first object (or first element of an array) whose `@type` is
///    `Product`;
/// 2. each hydration-state pattern in `state_patterns`, accepting the
///    first capture that parses as a JSON object.
pub(crate) fn find_embedded_product(
    html: &str,
    state_patterns: &[&str],
) -> Option<serde_json::Value> {
    if let Some(product) = find_jsonld_product(html) {
        return Some(product);
    }
    find_state_object(html, state_patterns)
}

fn find_jsonld_product(html: &str) -> Option<serde_json::Value> {
    let script_re = Regex::new(
        r#"(?is)<script[^>]+type\s*=\s*["']application/ld\+json["'][^>]*>(.*?)</script>"#,
    )
    .expect("valid regex");

    for cap in script_re.captures_iter(html) {
        let json_text = match cap.get(1) {
            Some(m) => m.as_str().trim(),
            None => continue,
        };

        let value: serde_json::Value = match serde_json::from_str(json_text) {
            Ok(v) => v,
            Err(_) => continue,
        };

        match value {
            serde_json::Value::Object(_) if is_product_entity(&value) => return Some(value),
            serde_json::Value::Array(items) => {
                if let Some(item) = items.into_iter().find(is_product_entity_owned) {
                    return Some(item);
                }
            }
            _ => {}
        }
    }

    None
}

fn find_state_object(html: &str, state_patterns: &[&str]) -> Option<serde_json::Value> {
    for pattern in state_patterns {
        let re = Regex::new(pattern).expect("valid regex");
        let Some(cap) = re.captures(html) else {
            continue;
        };
        let Some(json_text) = cap.get(1).map(|m| m.as_str()) else {
            continue;
        };
        match serde_json::from_str::<serde_json::Value>(json_text) {
            Ok(value @ serde_json::Value::Object(_)) => {
                tracing::debug!(pattern, "matched hydration-state product data");
                return Some(value);
            }
            // Non-object top level or malformed capture: keep cascading.
            Ok(_) | Err(_) => continue,
        }
    }
    None
}

/// `@type` may be a plain string or an array of strings.
fn is_product_entity(value: &serde_json::Value) -> bool {
    let Some(type_node) = value.get("@type") else {
        return false;
    };
    if let Some(s) = type_node.as_str() {
        return s.eq_ignore_ascii_case("Product");
    }
    if let Some(arr) = type_node.as_array() {
        return arr
            .iter()
            .filter_map(|v| v.as_str())
            .any(|s| s.eq_ignore_ascii_case("Product"));
    }
    false
}

fn is_product_entity_owned(value: &serde_json::Value) -> bool {
    value.is_object() && is_product_entity(value)
}
