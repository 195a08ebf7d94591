//! Field probes over an embedded product record.
//!
//! The record's schema is retailer- and page-version-dependent, so every
//! field is read opportunistically from an ordered list of aliased key
//! paths: top-level keys, one level of nesting under `product` or `offers`
//! (offers may be a single object or the first element of an array), plus
//! nested variant objects as a secondary color/size source.

use serde_json::Value;

use crate::normalize::dedup_preserving_order;

/// Loosely-typed product record decoded from a structured-data block.
/// Lives only within one extraction call.
#[derive(Debug)]
pub(crate) struct EmbeddedProduct {
    value: Value,
}

impl EmbeddedProduct {
    pub(crate) fn new(value: Value) -> Self {
        Self { value }
    }

    /// The `product` sub-object, when present and actually an object.
    fn product(&self) -> Option<&Value> {
        self.value.get("product").filter(|v| v.is_object())
    }

    /// The `offers` sub-object; an array of offers collapses to its first
    /// element.
    fn offers(&self) -> Option<&Value> {
        let offers = self.value.get("offers")?;
        match offers {
            Value::Array(items) => items.first(),
            Value::Object(_) => Some(offers),
            _ => None,
        }
    }

    /// Retailer style/product code under its common aliases.
    pub(crate) fn identifier(&self) -> Option<String> {
        ["sku", "productID", "mpn"]
            .iter()
            .find_map(|key| scalar_string(self.value.get(key)?))
            .or_else(|| scalar_string(self.product()?.get("articleNumber")?))
    }

    /// All color names discoverable in the record, deduplicated in
    /// first-seen order.
    pub(crate) fn colors(&self) -> Vec<String> {
        let mut colors = Vec::new();

        let sources = [
            self.value.get("color"),
            self.product().and_then(|p| p.get("color")),
            self.product().and_then(|p| p.get("colorName")),
            self.product().and_then(|p| p.get("colors")),
            self.product().and_then(|p| p.get("availableColors")),
            self.value
                .get("itemListElement")
                .and_then(|l| l.as_array())
                .and_then(|l| l.first())
                .and_then(|item| item.get("item"))
                .and_then(|item| item.get("color")),
        ];
        for source in sources.into_iter().flatten() {
            collect_scalars(source, &mut colors);
        }

        // Secondary source: nested variant objects.
        for variant in self.nested_variants() {
            let color = variant
                .get("color")
                .or_else(|| variant.get("colorName"))
                .or_else(|| variant.get("colorway"));
            if let Some(color) = color.and_then(scalar_string) {
                colors.push(color);
            }
        }

        dedup_preserving_order(colors)
    }

    /// All sizes discoverable in the record, deduplicated in first-seen
    /// order.
    pub(crate) fn sizes(&self) -> Vec<String> {
        let mut sizes = Vec::new();
        let sources = [
            self.product().and_then(|p| p.get("sizes")),
            self.product().and_then(|p| p.get("availableSizes")),
            self.product().and_then(|p| p.get("sizeOptions")),
            self.value.get("sizes"),
        ];
        for source in sources.into_iter().flatten() {
            collect_scalars(source, &mut sizes);
        }
        dedup_preserving_order(sizes)
    }

    /// Raw price value (string or number), offers first.
    pub(crate) fn price(&self) -> Option<Value> {
        self.offers()
            .and_then(|o| o.get("price"))
            .or_else(|| self.value.get("price"))
            .or_else(|| self.product().and_then(|p| p.get("price")))
            .filter(|v| !v.is_null())
            .cloned()
    }

    /// Availability text (e.g. `https://schema.org/InStock`, `"in stock"`),
    /// offers first. `None` means the record carries no availability signal.
    pub(crate) fn availability(&self) -> Option<String> {
        self.offers()
            .and_then(|o| o.get("availability"))
            .or_else(|| self.value.get("availability"))
            .or_else(|| self.product().and_then(|p| p.get("availability")))
            .and_then(scalar_string)
    }

    /// All image URLs in the record: string fields, lists of strings, and
    /// nested dict forms keyed `url`/`src`/`image`/`href`.
    pub(crate) fn images(&self) -> Vec<String> {
        let mut images = Vec::new();
        let sources = [
            self.value.get("image"),
            self.value.get("images"),
            self.product().and_then(|p| p.get("images")),
            self.product().and_then(|p| p.get("imageUrls")),
        ];
        for source in sources.into_iter().flatten() {
            collect_image_values(source, &mut images);
        }
        images
    }

    fn nested_variants(&self) -> impl Iterator<Item = &Value> {
        let from_product = self
            .product()
            .and_then(|p| p.get("variants"))
            .and_then(|v| v.as_array())
            .filter(|v| !v.is_empty());
        let list = from_product.or_else(|| {
            self.value
                .get("variants")
                .and_then(|v| v.as_array())
                .filter(|v| !v.is_empty())
        });
        list.map(|v| v.as_slice())
            .unwrap_or_default()
            .iter()
            .filter(|v| v.is_object())
    }
}

/// A scalar JSON value as a non-empty string: strings pass through,
/// numbers are formatted (sizes are often bare numbers in hydration
/// state). Everything else is `None`.
fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Flatten a string-or-list source into `out`.
fn collect_scalars(source: &Value, out: &mut Vec<String>) {
    match source {
        Value::Array(items) => {
            out.extend(items.iter().filter_map(scalar_string));
        }
        _ => {
            if let Some(s) = scalar_string(source) {
                out.push(s);
            }
        }
    }
}

/// Like [`collect_scalars`] but also unwraps image dicts.
fn collect_image_values(source: &Value, out: &mut Vec<String>) {
    match source {
        Value::String(s) if !s.trim().is_empty() => out.push(s.clone()),
        Value::Array(items) => {
            for item in items {
                match item {
                    Value::String(s) if !s.trim().is_empty() => out.push(s.clone()),
                    Value::Object(_) => {
                        let url = item
                            .get("url")
                            .or_else(|| item.get("src"))
                            .or_else(|| item.get("image"))
                            .or_else(|| item.get("href"));
                        if let Some(url) = url.and_then(scalar_string) {
                            out.push(url);
                        }
                    }
                    _ => {}
                }
            }
        }
        _ => {}
    }
}
