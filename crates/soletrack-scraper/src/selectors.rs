//! Strategy 2: CSS-selector heuristics over parsed markup.
//!
//! Applied when the embedded-data strategy yields nothing for a field.
//! Color/size selectors accumulate candidates across every selector in the
//! profile's list; price/stock selectors are first-match-wins.

use rust_decimal::Decimal;
use scraper::{ElementRef, Html, Selector};

use crate::normalize::{
    classify_stock_text, dedup_preserving_order, extract_size_text, parse_price_text, split_srcset,
};
use crate::retailer::RetailerProfile;

/// Read a candidate value from an element: first non-blank attribute in
/// `attrs` order, falling back to the element's text content.
fn attr_or_text(el: ElementRef<'_>, attrs: &[&str]) -> String {
    for attr in attrs {
        if let Some(value) = el.value().attr(attr) {
            let trimmed = value.trim();
            if !trimmed.is_empty() {
                return trimmed.to_string();
            }
        }
    }
    el.text().collect::<String>().trim().to_string()
}

/// Collect candidates across every selector in `selectors`, in
/// selector-list order then document order. Blank and single-character
/// candidates are discarded; duplicates removed preserving encounter order.
fn collect_candidates(doc: &Html, selectors: &[&str], attrs: &[&str]) -> Vec<String> {
    let mut candidates = Vec::new();
    for selector_str in selectors {
        let selector = Selector::parse(selector_str).expect("valid selector");
        for el in doc.select(&selector) {
            let candidate = attr_or_text(el, attrs);
            if candidate.chars().count() > 1 {
                candidates.push(candidate);
            }
        }
    }
    dedup_preserving_order(candidates)
}

/// Color options found via the profile's color swatch selectors.
pub(crate) fn collect_colors(doc: &Html, profile: &RetailerProfile) -> Vec<String> {
    collect_candidates(doc, profile.color_selectors, profile.color_attrs)
}

/// Size options found via the profile's size picker selectors, reduced to
/// their numeric part where one exists.
pub(crate) fn collect_sizes(doc: &Html, profile: &RetailerProfile) -> Vec<String> {
    let raw = collect_candidates(doc, profile.size_selectors, profile.size_attrs);
    dedup_preserving_order(raw.iter().filter_map(|s| extract_size_text(s)).collect())
}

/// First parseable price among the profile's price selectors.
///
/// Selectors are tried in order; a selector whose match doesn't parse as a
/// price is skipped, not treated as zero.
pub(crate) fn find_price(doc: &Html, profile: &RetailerProfile) -> Option<Decimal> {
    for selector_str in profile.price_selectors {
        let selector = Selector::parse(selector_str).expect("valid selector");
        if let Some(el) = doc.select(&selector).next() {
            let text = el.text().collect::<String>();
            if let Some(price) = parse_price_text(&text) {
                return Some(price);
            }
        }
    }
    None
}

/// Stock status from the profile's stock-status selectors. In-stock unless
/// a matched element's text carries an out-of-stock keyword.
pub(crate) fn find_stock_status(doc: &Html, profile: &RetailerProfile) -> bool {
    for selector_str in profile.stock_selectors {
        let selector = Selector::parse(selector_str).expect("valid selector");
        if let Some(el) = doc.select(&selector).next() {
            let text = el.text().collect::<String>();
            if !classify_stock_text(&text) {
                return false;
            }
        }
    }
    true
}

/// Raw image URL candidates from the page, in encounter order:
/// img elements (profile attribute list, srcset values split), then
/// `picture > source`/`picture > img`, then data-attribute containers.
/// Absolutization and dedup happen downstream.
pub(crate) fn collect_images(doc: &Html, profile: &RetailerProfile) -> Vec<String> {
    let mut images = Vec::new();

    for selector_str in profile.image_selectors {
        let selector = Selector::parse(selector_str).expect("valid selector");
        for el in doc.select(&selector) {
            let Some(value) = first_attr(el, profile.image_attrs) else {
                continue;
            };
            push_image_value(&value, &mut images);
        }
    }

    let picture_sel = Selector::parse("picture").expect("valid selector");
    let source_sel = Selector::parse("source").expect("valid selector");
    let img_sel = Selector::parse("img").expect("valid selector");
    for picture in doc.select(&picture_sel) {
        let inner = picture
            .select(&source_sel)
            .next()
            .or_else(|| picture.select(&img_sel).next());
        let Some(inner) = inner else { continue };
        let value = inner
            .value()
            .attr("srcset")
            .or_else(|| inner.value().attr("src"));
        if let Some(value) = value {
            push_image_value(value, &mut images);
        }
    }

    for selector_str in profile.image_container_selectors {
        let selector = Selector::parse(selector_str).expect("valid selector");
        for el in doc.select(&selector) {
            if let Some(value) = first_attr(el, profile.image_container_attrs) {
                images.push(value);
            }
        }
    }

    images
}

/// Heading text used by the default-variant fallback: the first `h1`, else
/// the document `title`.
pub(crate) fn page_heading(doc: &Html) -> Option<String> {
    for selector_str in ["h1", "title"] {
        let selector = Selector::parse(selector_str).expect("valid selector");
        if let Some(el) = doc.select(&selector).next() {
            let text = el.text().collect::<String>().trim().to_string();
            if !text.is_empty() {
                return Some(text);
            }
        }
    }
    None
}

fn first_attr(el: ElementRef<'_>, attrs: &[&str]) -> Option<String> {
    attrs.iter().find_map(|attr| {
        el.value()
            .attr(attr)
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(ToString::to_string)
    })
}

/// Push an attribute value, splitting srcset-style lists into their URLs.
fn push_image_value(value: &str, out: &mut Vec<String>) {
    if value.contains(',') && value.contains(' ') {
        out.extend(split_srcset(value));
    } else {
        out.push(value.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::retailer::{ADIDAS, NIKE};

    // -----------------------------------------------------------------------
    // colors
    // -----------------------------------------------------------------------

    #[test]
    fn colors_read_attrs_before_text() {
        let html = Html::parse_document(
            r#"<button data-testid="colorway-picker" aria-label="White/Black">swatch</button>"#,
        );
        assert_eq!(collect_colors(&html, &NIKE), vec!["White/Black"]);
    }

    #[test]
    fn colors_fall_back_to_element_text() {
        let html =
            Html::parse_document(r#"<div class="color-selector"><button>Volt</button></div>"#);
        assert_eq!(collect_colors(&html, &NIKE), vec!["Volt"]);
    }

    #[test]
    fn colors_deduplicate_across_selectors() {
        // The same swatch matches both the data-testid and data-color selectors.
        let html = Html::parse_document(
            r#"<button data-testid="color-swatch" data-color="Bred"></button>"#,
        );
        assert_eq!(collect_colors(&html, &NIKE), vec!["Bred"]);
    }

    #[test]
    fn single_character_color_candidates_are_discarded() {
        let html = Html::parse_document(r#"<button data-color="X"></button>"#);
        assert!(collect_colors(&html, &NIKE).is_empty());
    }

    #[test]
    fn adidas_colorway_attr_is_read() {
        let html = Html::parse_document(
            r#"<div class="color-picker"><button data-colorway="Core Black"></button></div>"#,
        );
        assert_eq!(collect_colors(&html, &ADIDAS), vec!["Core Black"]);
    }

    // -----------------------------------------------------------------------
    // sizes
    // -----------------------------------------------------------------------

    #[test]
    fn sizes_extract_numeric_part() {
        let html = Html::parse_document(concat!(
            r#"<button data-testid="size-10" aria-label="Size 10"></button>"#,
            r#"<button data-testid="size-10-5" aria-label="Size 10.5"></button>"#,
        ));
        assert_eq!(collect_sizes(&html, &NIKE), vec!["10", "10.5"]);
    }

    #[test]
    fn sizes_without_numbers_keep_text() {
        let html =
            Html::parse_document(r#"<div class="size-selector"><button>XL</button></div>"#);
        assert_eq!(collect_sizes(&html, &NIKE), vec!["XL"]);
    }

    #[test]
    fn sizes_deduplicate_after_numeric_extraction() {
        // "Size 10" and "US 10" both reduce to "10".
        let html = Html::parse_document(concat!(
            r#"<button aria-label="Size 10" data-testid="size-a"></button>"#,
            r#"<button aria-label="US 10" data-testid="size-b"></button>"#,
        ));
        assert_eq!(collect_sizes(&html, &NIKE), vec!["10"]);
    }

    // -----------------------------------------------------------------------
    // price / stock
    // -----------------------------------------------------------------------

    #[test]
    fn price_first_selector_wins() {
        let html = Html::parse_document(concat!(
            r#"<span data-testid="product-price">$145.00</span>"#,
            r#"<span class="price">$9.99</span>"#,
        ));
        assert_eq!(find_price(&html, &NIKE), Some("145.00".parse().unwrap()));
    }

    #[test]
    fn unparsable_price_match_falls_to_next_selector() {
        let html = Html::parse_document(concat!(
            r#"<span data-testid="price-label">See below</span>"#,
            r#"<span class="product-price">$120.00</span>"#,
        ));
        assert_eq!(find_price(&html, &NIKE), Some("120.00".parse().unwrap()));
    }

    #[test]
    fn no_price_elements_yield_none() {
        let html = Html::parse_document("<p>nothing for sale</p>");
        assert_eq!(find_price(&html, &NIKE), None);
    }

    #[test]
    fn stock_defaults_to_true_without_elements() {
        let html = Html::parse_document("<p>plain page</p>");
        assert!(find_stock_status(&html, &NIKE));
    }

    #[test]
    fn sold_out_text_marks_out_of_stock() {
        let html = Html::parse_document(
            r#"<div class="stock-status">Sold Out — notify me</div>"#,
        );
        assert!(!find_stock_status(&html, &NIKE));
    }

    #[test]
    fn neutral_stock_text_stays_in_stock() {
        let html =
            Html::parse_document(r#"<div class="stock-status">Ships within 2 days</div>"#);
        assert!(find_stock_status(&html, &NIKE));
    }

    // -----------------------------------------------------------------------
    // images
    // -----------------------------------------------------------------------

    #[test]
    fn images_read_src_and_lazy_attrs() {
        let html = Html::parse_document(concat!(
            r#"<div class="gallery"><img src="https://c.com/a.jpg"></div>"#,
            r#"<div class="gallery"><img data-lazy-src="https://c.com/b.jpg"></div>"#,
        ));
        assert_eq!(
            collect_images(&html, &NIKE),
            vec!["https://c.com/a.jpg", "https://c.com/b.jpg"]
        );
    }

    #[test]
    fn picture_source_srcset_is_split() {
        let html = Html::parse_document(concat!(
            "<picture>",
            r#"<source srcset="https://c.com/a.jpg 640w, https://c.com/b.jpg 1280w">"#,
            r#"<img src="https://c.com/fallback.jpg">"#,
            "</picture>",
        ));
        assert_eq!(
            collect_images(&html, &NIKE),
            vec!["https://c.com/a.jpg", "https://c.com/b.jpg"]
        );
    }

    #[test]
    fn adidas_container_data_attrs_contribute() {
        let html = Html::parse_document(
            r#"<div data-image-url="https://assets.adidas.com/x.jpg"></div>"#,
        );
        assert_eq!(
            collect_images(&html, &ADIDAS),
            vec!["https://assets.adidas.com/x.jpg"]
        );
    }

    // -----------------------------------------------------------------------
    // page_heading
    // -----------------------------------------------------------------------

    #[test]
    fn heading_prefers_h1_over_title() {
        let html = Html::parse_document(
            "<head><title>Store | Shoe</title></head><body><h1>Pegasus 41 - Volt</h1></body>",
        );
        assert_eq!(page_heading(&html).as_deref(), Some("Pegasus 41 - Volt"));
    }

    #[test]
    fn heading_falls_back_to_title() {
        let html = Html::parse_document("<head><title>Samba OG - Cloud White</title></head>");
        assert_eq!(page_heading(&html).as_deref(), Some("Samba OG - Cloud White"));
    }

    #[test]
    fn heading_none_on_bare_markup() {
        let html = Html::parse_document("<body><p>no headings</p></body>");
        assert_eq!(page_heading(&html), None);
    }
}
