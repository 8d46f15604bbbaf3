//! HTML parsing infrastructure for product listing extraction.
//!
//! Extraction runs as an ordered cascade of strategies sharing one contract:
//! direct product-link scanning first, then embedded JSON-LD metadata, then
//! generic product-card container matching. The orchestrator short-circuits
//! on the first strategy that yields records.

pub mod container_parser;
pub mod context;
pub mod error;
pub mod json_ld;
pub mod link_parser;
pub mod product_list_parser;
pub mod sku;

pub use container_parser::ContainerMatcher;
pub use context::ParseContext;
pub use error::{ParsingError, ParsingResult};
pub use json_ld::JsonLdParser;
pub use link_parser::LinkProductParser;
pub use product_list_parser::ProductListParser;

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::Html;
use url::Url;

use crate::domain::product::ProductRecord;

/// URL substring identifying a product detail page.
pub const PRODUCT_PATH_MARKER: &str = "/products/";

/// Shared contract for listing extraction strategies.
///
/// Strategies never fail: a page they cannot make sense of yields an empty
/// vector and the orchestrator moves on to the next strategy.
pub trait ExtractStrategy {
    /// Strategy name for log provenance.
    fn name(&self) -> &'static str;

    /// Extract all product records this strategy can find on the page.
    fn extract(&self, html: &Html, context: &ParseContext) -> Vec<ProductRecord>;
}

/// Resolve a possibly-relative href against the base host.
///
/// Already-absolute URLs pass through untouched. Falls back to plain string
/// joining when the base URL itself does not parse.
pub(crate) fn absolutize(base_url: &str, href: &str) -> String {
    if href.starts_with("http") {
        return href.to_string();
    }
    match Url::parse(base_url).and_then(|base| base.join(href)) {
        Ok(joined) => joined.to_string(),
        Err(_) => format!(
            "{}/{}",
            base_url.trim_end_matches('/'),
            href.trim_start_matches('/')
        ),
    }
}

static WHITESPACE_RUNS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("whitespace regex is valid"));

static FILLER_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(Image of|Photo of|Picture of)\s+").expect("filler prefix regex is valid")
});

/// Collapse whitespace runs, trim, and strip a leading filler phrase.
pub(crate) fn normalize_name(raw: &str) -> String {
    let collapsed = WHITESPACE_RUNS.replace_all(raw, " ");
    FILLER_PREFIX
        .replace(collapsed.trim(), "")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_collapses_whitespace_and_strips_filler() {
        assert_eq!(normalize_name("  Image of  Nike  Air\nMax 90 "), "Nike Air Max 90");
        assert_eq!(normalize_name("photo of Adidas Yeezy"), "Adidas Yeezy");
        assert_eq!(normalize_name("Asics Gel-Lyte"), "Asics Gel-Lyte");
    }

    #[test]
    fn absolutize_joins_root_relative_path() {
        assert_eq!(
            absolutize("https://www.kickscrew.com", "/products/abc-123"),
            "https://www.kickscrew.com/products/abc-123"
        );
    }

    #[test]
    fn absolutize_passes_through_absolute_urls() {
        assert_eq!(
            absolutize("https://www.kickscrew.com", "https://cdn.example.com/img.jpg"),
            "https://cdn.example.com/img.jpg"
        );
    }

    #[test]
    fn absolutize_handles_bare_relative_path() {
        assert_eq!(
            absolutize("https://www.kickscrew.com", "products/abc-123"),
            "https://www.kickscrew.com/products/abc-123"
        );
    }
}
