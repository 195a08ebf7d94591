//! Per-retailer parameter tables.
//!
//! The extraction control flow is identical for every retailer; everything
//! that varies — selector lists, base origin, hydration-state patterns, URL
//! conventions — lives in a [`RetailerProfile`].
//! Supporting a new retailer means adding a table, not new code paths.

use regex::Regex;
use url::Url;

/// Supported retailers, addressable by the `/scrape/{retailer}` path slug.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Retailer {
    Nike,
    Adidas,
}

impl Retailer {
    #[must_use]
    pub fn from_slug(slug: &str) -> Option<Self> {
        match slug.to_ascii_lowercase().as_str() {
            "nike" => Some(Self::Nike),
            "adidas" => Some(Self::Adidas),
            _ => None,
        }
    }

    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            Self::Nike => "nike",
            Self::Adidas => "adidas",
        }
    }

    #[must_use]
    pub fn profile(self) -> &'static RetailerProfile {
        match self {
            Self::Nike => &NIKE,
            Self::Adidas => &ADIDAS,
        }
    }
}

/// Product-page path convention, checked against the URL path only
/// (host matching is separate).
#[derive(Debug, Clone, Copy)]
pub enum PathRule {
    /// Path must contain this substring (Nike: `/t/`).
    Contains(&'static str),
    /// Path must end with this suffix (Adidas: `.html`).
    EndsWith(&'static str),
}

/// Everything retailer-specific the shared pipeline consumes.
#[derive(Debug)]
pub struct RetailerProfile {
    pub name: &'static str,
    /// Origin used to absolutize relative image URLs.
    pub base_url: &'static str,
    /// Host suffix a product URL must carry (`nike.com`, `adidas.com`).
    pub host_suffix: &'static str,
    pub path_rule: PathRule,
    /// Strip a `.html` suffix before matching the URL identifier.
    pub url_id_strips_html: bool,
    /// Hydration-state JSON assignments probed after JSON-LD, in order.
    pub state_patterns: &'static [&'static str],
    pub color_selectors: &'static [&'static str],
    pub color_attrs: &'static [&'static str],
    pub size_selectors: &'static [&'static str],
    pub size_attrs: &'static [&'static str],
    pub price_selectors: &'static [&'static str],
    pub stock_selectors: &'static [&'static str],
    pub image_selectors: &'static [&'static str],
    pub image_attrs: &'static [&'static str],
    /// Non-img containers carrying an image URL in a data attribute.
    pub image_container_selectors: &'static [&'static str],
    pub image_container_attrs: &'static [&'static str],
}

impl RetailerProfile {
    /// Whether `url` looks like a product-detail page for this retailer
    /// (host suffix plus path convention). Syntactically invalid URLs fail.
    #[must_use]
    pub fn is_product_url(&self, url: &str) -> bool {
        let Ok(parsed) = Url::parse(url) else {
            return false;
        };
        if !matches!(parsed.scheme(), "http" | "https") {
            return false;
        }
        let Some(host) = parsed.host_str() else {
            return false;
        };
        if host != self.host_suffix && !host.ends_with(&format!(".{}", self.host_suffix)) {
            return false;
        }
        match self.path_rule {
            PathRule::Contains(needle) => parsed.path().contains(needle),
            PathRule::EndsWith(suffix) => parsed.path().ends_with(suffix),
        }
    }

    /// Derive the style/product code from the URL's trailing path segment.
    ///
    /// Nike PDP URLs end in the style code (`/t/{slug}/IM6674-101`); Adidas
    /// URLs end in `{code}.html`. Segments that don't look like a code
    /// (uppercase alphanumerics and hyphens) yield `None`.
    #[must_use]
    pub fn identifier_from_url(&self, url: &str) -> Option<String> {
        let trimmed = url.trim_end_matches('/');
        let last = trimmed.rsplit('/').next()?;
        let candidate = if self.url_id_strips_html {
            last.strip_suffix(".html").unwrap_or(last)
        } else {
            last
        };
        let code_re = Regex::new(r"^[A-Z0-9-]+$").expect("valid regex");
        if code_re.is_match(candidate) {
            Some(candidate.to_string())
        } else {
            None
        }
    }
}

/// Whether `url` is a syntactically valid absolute http(s) URL with a host.
#[must_use]
pub fn is_valid_http_url(url: &str) -> bool {
    match Url::parse(url) {
        Ok(parsed) => {
            matches!(parsed.scheme(), "http" | "https") && parsed.host_str().is_some()
        }
        Err(_) => false,
    }
}

pub static NIKE: RetailerProfile = RetailerProfile {
    name: "nike",
    base_url: "https://www.nike.com",
    host_suffix: "nike.com",
    path_rule: PathRule::Contains("/t/"),
    url_id_strips_html: false,
    state_patterns: &[
        r"(?s)window\.__INITIAL_STATE__\s*=\s*(\{.*?\});",
        r"(?s)window\.__NEXT_DATA__\s*=\s*(\{.*?\});",
        r#"(?s)"product":\s*(\{.*?\})"#,
    ],
    color_selectors: &[
        r#"button[data-testid*="color"]"#,
        r#"button[aria-label*="color"]"#,
        ".color-selector button",
        "[data-color]",
        ".color-swatch",
    ],
    color_attrs: &["aria-label", "data-color", "title"],
    size_selectors: &[
        r#"button[data-testid*="size"]"#,
        r#"button[aria-label*="size"]"#,
        ".size-selector button",
        "[data-size]",
        ".size-option",
    ],
    size_attrs: &["aria-label", "data-size"],
    price_selectors: &[
        r#"[data-testid*="price"]"#,
        ".product-price",
        ".price",
        r#"[itemprop="price"]"#,
    ],
    stock_selectors: &[
        r#"[data-testid*="stock"]"#,
        ".stock-status",
        r#"[aria-label*="stock"]"#,
    ],
    image_selectors: &[
        r#"img[data-testid*="product"]"#,
        ".product-image img",
        ".gallery img",
        "[data-image]",
    ],
    image_attrs: &["src", "data-src", "data-image", "data-lazy-src"],
    image_container_selectors: &[],
    image_container_attrs: &[],
};

pub static ADIDAS: RetailerProfile = RetailerProfile {
    name: "adidas",
    base_url: "https://www.adidas.com",
    host_suffix: "adidas.com",
    path_rule: PathRule::EndsWith(".html"),
    url_id_strips_html: true,
    state_patterns: &[
        r"(?s)window\.__PRELOADED_STATE__\s*=\s*(\{.*?\});",
        r"(?s)window\.__INITIAL_STATE__\s*=\s*(\{.*?\});",
        r#"(?s)"product":\s*(\{.*?\})"#,
        r"(?s)data-product='(\{.*?\})'",
    ],
    color_selectors: &[
        r#"button[data-testid*="color"]"#,
        r#"button[aria-label*="color"]"#,
        ".color-selector button",
        ".color-picker button",
        "[data-color]",
        ".color-swatch",
        r#"[class*="color"] button"#,
    ],
    color_attrs: &["aria-label", "data-color", "data-colorway", "title"],
    size_selectors: &[
        r#"button[data-testid*="size"]"#,
        r#"button[aria-label*="size"]"#,
        ".size-selector button",
        ".size-picker button",
        "[data-size]",
        ".size-option",
        r#"[class*="size"] button"#,
    ],
    size_attrs: &["aria-label", "data-size"],
    price_selectors: &[
        r#"[data-testid*="price"]"#,
        ".product-price",
        ".price",
        ".gl-price",
        r#"[itemprop="price"]"#,
        r#"[class*="price"]"#,
    ],
    stock_selectors: &[
        r#"[data-testid*="stock"]"#,
        ".stock-status",
        r#"[aria-label*="stock"]"#,
        r#"[class*="stock"]"#,
        ".availability",
    ],
    image_selectors: &[
        r#"img[data-testid*="product"]"#,
        ".product-image img",
        ".gallery img",
        ".image-carousel img",
        "[data-image]",
        "[data-src]",
        ".gl-image img",
    ],
    image_attrs: &["src", "data-src", "data-image", "data-lazy-src", "data-srcset"],
    image_container_selectors: &["[data-image-url]", "[data-img-url]"],
    image_container_attrs: &["data-image-url", "data-img-url"],
};
