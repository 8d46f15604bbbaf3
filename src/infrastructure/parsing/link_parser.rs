//! Link-based product parser, the primary extraction strategy.
//!
//! Scans product-page anchors and derives the record from curated attributes
//! first (title, image alt), falling back to the anchor's own text and
//! finally to the surrounding text of its parent element.

use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use super::{absolutize, normalize_name, sku, ExtractStrategy, ParseContext, ParsingError,
            ParsingResult, PRODUCT_PATH_MARKER};
use crate::domain::product::ProductRecord;

/// Candidate names shorter than this are discarded as too generic.
const MIN_NAME_LEN: usize = 6;

/// Candidate names at or above this length are whole-page text blobs.
const MAX_NAME_LEN: usize = 100;

pub struct LinkProductParser {
    anchor_selector: Selector,
    img_selector: Selector,
}

impl LinkProductParser {
    pub fn new() -> ParsingResult<Self> {
        let anchor = format!(r#"a[href*="{PRODUCT_PATH_MARKER}"]"#);
        Ok(Self {
            anchor_selector: Selector::parse(&anchor)
                .map_err(|e| ParsingError::invalid_selector(&anchor, e))?,
            img_selector: Selector::parse("img")
                .map_err(|e| ParsingError::invalid_selector("img", e))?,
        })
    }

    /// Parse one product anchor into a record.
    ///
    /// `product_url` is the already-absolutized target of the anchor. Returns
    /// `None` when either the identifier or a usable name cannot be derived.
    pub fn parse_anchor(
        &self,
        anchor: &ElementRef,
        product_url: &str,
        context: &ParseContext,
    ) -> Option<ProductRecord> {
        let product_id = sku::extract_sku_from_url(product_url)?;

        let name = normalize_name(&self.resolve_name(anchor)?);
        if name.is_empty() {
            return None;
        }

        Some(ProductRecord {
            category: context.category.clone(),
            style_name: name,
            product_id,
            url: product_url.to_string(),
            image_url: self.resolve_image(anchor, &context.base_url),
        })
    }

    /// Name cascade: title attribute, nested image alt, anchor text,
    /// parent text minus the anchor's own text.
    fn resolve_name(&self, anchor: &ElementRef) -> Option<String> {
        if let Some(title) = anchor.value().attr("title") {
            let title = title.trim();
            if title.len() >= MIN_NAME_LEN {
                return Some(title.to_string());
            }
        }

        if let Some(img) = anchor.select(&self.img_selector).next() {
            if let Some(alt) = img.value().attr("alt") {
                let alt = alt.trim();
                if alt.len() >= MIN_NAME_LEN {
                    return Some(alt.to_string());
                }
            }
        }

        let own_text = element_text(anchor);
        if own_text.len() >= MIN_NAME_LEN && own_text.len() < MAX_NAME_LEN {
            return Some(own_text);
        }

        if let Some(parent) = anchor.parent().and_then(ElementRef::wrap) {
            let mut parent_text = element_text(&parent);
            if !own_text.is_empty() {
                parent_text = parent_text.replace(&own_text, "").trim().to_string();
            }
            if parent_text.len() >= MIN_NAME_LEN && parent_text.len() < MAX_NAME_LEN {
                return Some(parent_text);
            }
        }

        None
    }

    /// First usable image source on a nested `<img>`, absolutized.
    fn resolve_image(&self, anchor: &ElementRef, base_url: &str) -> String {
        let Some(img) = anchor.select(&self.img_selector).next() else {
            return String::new();
        };
        let element = img.value();
        element
            .attr("src")
            .filter(|src| !src.is_empty())
            .or_else(|| element.attr("data-src").filter(|src| !src.is_empty()))
            .or_else(|| element.attr("data-lazy-src").filter(|src| !src.is_empty()))
            .map(|src| absolutize(base_url, src))
            .unwrap_or_default()
    }
}

impl ExtractStrategy for LinkProductParser {
    fn name(&self) -> &'static str {
        "link_scan"
    }

    fn extract(&self, html: &Html, context: &ParseContext) -> Vec<ProductRecord> {
        let mut records = Vec::new();
        for anchor in html.select(&self.anchor_selector) {
            let Some(href) = anchor.value().attr("href").filter(|h| !h.is_empty()) else {
                continue;
            };
            let product_url = absolutize(&context.base_url, href);
            if let Some(record) = self.parse_anchor(&anchor, &product_url, context) {
                records.push(record);
            } else {
                debug!(href, page = %context.page_url, "anchor skipped, no usable name or id");
            }
        }
        records
    }
}

/// Concatenated text of an element with each fragment trimmed.
fn element_text(element: &ElementRef) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> ParseContext {
        ParseContext::new(
            "Nike",
            "https://www.kickscrew.com/collections/nike?page=1",
            "https://www.kickscrew.com",
        )
    }

    fn parse_first_anchor(markup: &str) -> Option<ProductRecord> {
        let parser = LinkProductParser::new().expect("selectors compile");
        let html = Html::parse_document(markup);
        let ctx = context();
        let mut records = parser.extract(&html, &ctx);
        if records.is_empty() {
            None
        } else {
            Some(records.remove(0))
        }
    }

    #[test]
    fn title_attribute_wins() {
        let record = parse_first_anchor(
            r#"<a href="/products/nike-air-max-90-dn1234-567" title="Nike Air Max 90">
                 <img alt="shoe" src="">
               </a>"#,
        )
        .expect("record extracted");

        assert_eq!(record.style_name, "Nike Air Max 90");
        assert_eq!(record.product_id, "dn1234-567");
        assert_eq!(
            record.url,
            "https://www.kickscrew.com/products/nike-air-max-90-dn1234-567"
        );
        assert_eq!(record.image_url, "");
    }

    #[test]
    fn image_alt_used_when_title_too_short() {
        let record = parse_first_anchor(
            r#"<a href="/products/dz5485-612" title="AJ1">
                 <img alt="Air Jordan 1 Retro High OG" src="/cdn/aj1.jpg">
               </a>"#,
        )
        .expect("record extracted");

        assert_eq!(record.style_name, "Air Jordan 1 Retro High OG");
        assert_eq!(record.image_url, "https://www.kickscrew.com/cdn/aj1.jpg");
    }

    #[test]
    fn anchor_text_used_within_bounds() {
        let record = parse_first_anchor(
            r#"<a href="/products/dz5485-612">Air   Jordan
               1 Retro</a>"#,
        )
        .expect("record extracted");
        assert_eq!(record.style_name, "Air Jordan 1 Retro");
    }

    #[test]
    fn parent_text_minus_anchor_text_within_bounds() {
        let record = parse_first_anchor(
            r#"<div>Adidas Yeezy Boost 350<a href="/products/hq6316-100">more</a></div>"#,
        )
        .expect("record extracted");
        assert_eq!(record.style_name, "Adidas Yeezy Boost 350");
    }

    #[test]
    fn parent_text_rejected_when_remainder_too_long() {
        let filler = "x".repeat(120);
        let markup = format!(
            r#"<div>{filler}<a href="/products/hq6316-100">more</a></div>"#
        );
        assert!(parse_first_anchor(&markup).is_none());
    }

    #[test]
    fn filler_prefix_is_stripped() {
        let record = parse_first_anchor(
            r#"<a href="/products/dn1234-567" title="Image of Nike Air Max 90"></a>"#,
        )
        .expect("record extracted");
        assert_eq!(record.style_name, "Nike Air Max 90");
    }

    #[test]
    fn lazy_image_sources_are_fallbacks() {
        let record = parse_first_anchor(
            r#"<a href="/products/dn1234-567" title="Nike Air Max 90">
                 <img data-lazy-src="/cdn/am90.jpg">
               </a>"#,
        )
        .expect("record extracted");
        assert_eq!(record.image_url, "https://www.kickscrew.com/cdn/am90.jpg");
    }

    #[test]
    fn no_record_without_a_name() {
        assert!(parse_first_anchor(r#"<a href="/products/dn1234-567">ok</a>"#).is_none());
    }

    #[test]
    fn no_record_without_product_path() {
        assert!(
            parse_first_anchor(r#"<a href="/collections/nike" title="Nike collection page"></a>"#)
                .is_none()
        );
    }
}
