//! Variant assembly from discovered color/size signals, plus the
//! default-variant fallback that keeps the variants list non-empty.

use regex::Regex;
use scraper::Html;
use soletrack_core::ProductVariant;

use crate::retailer::RetailerProfile;
use crate::selectors::page_heading;

/// Build variants from deduplicated color and size lists.
///
/// Strict priority cascade, only one branch fires:
/// - both lists non-empty → full color×size cross product;
/// - colors only → one variant per color, size `"N/A"`;
/// - sizes only → one variant per size, color `"N/A"`;
/// - both empty → empty vec; the caller falls back to [`default_variant`].
///
/// Every variant's identifier is `identifier` when present, else a
/// synthesized composite, so it is never empty.
pub(crate) fn assemble_variants(
    colors: &[String],
    sizes: &[String],
    identifier: Option<&str>,
) -> Vec<ProductVariant> {
    let id_or = |fallback: String| -> String {
        identifier.map_or(fallback, ToString::to_string)
    };

    if !colors.is_empty() && !sizes.is_empty() {
        let mut variants = Vec::with_capacity(colors.len() * sizes.len());
        for color in colors {
            for size in sizes {
                variants.push(ProductVariant {
                    color: color.clone(),
                    shoe_size: size.clone(),
                    unique_identifier: id_or(format!("{color}-{size}")),
                });
            }
        }
        return variants;
    }

    if !colors.is_empty() {
        return colors
            .iter()
            .map(|color| ProductVariant {
                color: color.clone(),
                shoe_size: "N/A".to_string(),
                unique_identifier: id_or(color.clone()),
            })
            .collect();
    }

    sizes
        .iter()
        .map(|size| ProductVariant {
            color: "N/A".to_string(),
            shoe_size: size.clone(),
            unique_identifier: id_or(size.clone()),
        })
        .collect()
}

/// Last-resort variant when no color/size signal exists anywhere.
///
/// The identifier comes from the URL's trailing path segment when it looks
/// like a style code, else the `"UNKNOWN"` sentinel. The color guess is the
/// trailing hyphen-delimited segment of the page heading ("Pegasus 41 -
/// Volt" → "Volt"); size is always `"N/A"`.
pub(crate) fn default_variant(
    doc: &Html,
    profile: &RetailerProfile,
    url: &str,
) -> ProductVariant {
    let identifier = profile
        .identifier_from_url(url)
        .unwrap_or_else(|| "UNKNOWN".to_string());

    let color = page_heading(doc)
        .and_then(|heading| trailing_segment(&heading))
        .unwrap_or_else(|| "N/A".to_string());

    ProductVariant {
        color,
        shoe_size: "N/A".to_string(),
        unique_identifier: identifier,
    }
}

fn trailing_segment(text: &str) -> Option<String> {
    let re = Regex::new(r"-\s*([^-]+)$").expect("valid regex");
    re.captures(text)
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|s| !s.is_empty())
}
