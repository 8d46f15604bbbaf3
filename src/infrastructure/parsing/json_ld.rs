//! JSON-LD structured-data parser, the secondary extraction strategy.
//!
//! Reads `script[type="application/ld+json"]` blocks. Machine-curated
//! metadata is authoritative when present, but it is only consulted when the
//! direct link scan found nothing. Blocks that fail to parse are skipped;
//! sibling blocks are still processed.

use scraper::{Html, Selector};
use serde_json::Value;
use tracing::debug;

use super::{absolutize, normalize_name, sku, ExtractStrategy, ParseContext, ParsingError,
            ParsingResult, PRODUCT_PATH_MARKER};
use crate::domain::product::ProductRecord;

const JSON_LD_SELECTOR: &str = r#"script[type="application/ld+json"]"#;

pub struct JsonLdParser {
    script_selector: Selector,
}

impl JsonLdParser {
    pub fn new() -> ParsingResult<Self> {
        Ok(Self {
            script_selector: Selector::parse(JSON_LD_SELECTOR)
                .map_err(|e| ParsingError::invalid_selector(JSON_LD_SELECTOR, e))?,
        })
    }

    /// Parse one JSON-LD item of declared type `Product`.
    fn parse_item(&self, item: &Value, context: &ParseContext) -> Option<ProductRecord> {
        if item.get("@type").and_then(Value::as_str) != Some("Product") {
            return None;
        }

        let name = item.get("name").and_then(Value::as_str).unwrap_or("");
        let url = item.get("url").and_then(Value::as_str).unwrap_or("");
        let image = match item.get("image") {
            Some(Value::Array(entries)) => entries.first().and_then(Value::as_str).unwrap_or(""),
            Some(Value::String(single)) => single.as_str(),
            _ => "",
        };

        let name = normalize_name(name);
        if name.is_empty() || url.is_empty() || !url.contains(PRODUCT_PATH_MARKER) {
            return None;
        }
        let product_id = sku::extract_sku_from_url(url)?;

        Some(ProductRecord {
            category: context.category.clone(),
            style_name: name,
            product_id,
            url: absolutize(&context.base_url, url),
            image_url: if image.is_empty() {
                String::new()
            } else {
                absolutize(&context.base_url, image)
            },
        })
    }
}

impl ExtractStrategy for JsonLdParser {
    fn name(&self) -> &'static str {
        "json_ld"
    }

    fn extract(&self, html: &Html, context: &ParseContext) -> Vec<ProductRecord> {
        let mut records = Vec::new();
        for script in html.select(&self.script_selector) {
            let raw = script.text().collect::<String>();
            let parsed: Value = match serde_json::from_str(raw.trim()) {
                Ok(value) => value,
                Err(e) => {
                    debug!(page = %context.page_url, error = %e, "skipping unparseable JSON-LD block");
                    continue;
                }
            };

            match parsed {
                Value::Array(items) => {
                    records.extend(
                        items
                            .iter()
                            .filter_map(|item| self.parse_item(item, context)),
                    );
                }
                single => {
                    if let Some(record) = self.parse_item(&single, context) {
                        records.push(record);
                    }
                }
            }
        }
        records
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> ParseContext {
        ParseContext::new(
            "Yeezy",
            "https://www.kickscrew.com/collections/adidas-yeezy",
            "https://www.kickscrew.com",
        )
    }

    fn extract(markup: &str) -> Vec<ProductRecord> {
        let parser = JsonLdParser::new().expect("selector compiles");
        parser.extract(&Html::parse_document(markup), &context())
    }

    #[test]
    fn single_product_block_with_image_list() {
        let records = extract(
            r#"<script type="application/ld+json">
                 {"@type": "Product",
                  "name": "Adidas Yeezy 350",
                  "url": "/products/yeezy-boost-350-hq6316-100",
                  "image": ["/cdn/yeezy.jpg", "/cdn/yeezy-2.jpg"]}
               </script>"#,
        );

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].style_name, "Adidas Yeezy 350");
        assert_eq!(records[0].product_id, "hq6316-100");
        assert_eq!(
            records[0].url,
            "https://www.kickscrew.com/products/yeezy-boost-350-hq6316-100"
        );
        assert_eq!(records[0].image_url, "https://www.kickscrew.com/cdn/yeezy.jpg");
    }

    #[test]
    fn list_block_yields_every_product_item() {
        let records = extract(
            r#"<script type="application/ld+json">
                 [{"@type": "Product", "name": "Air Max 90", "url": "/products/dn1234-567"},
                  {"@type": "BreadcrumbList", "name": "ignored", "url": "/products/zz9999-111"},
                  {"@type": "Product", "name": "Air Jordan 1", "url": "/products/dz5485-612"}]
               </script>"#,
        );

        let ids: Vec<&str> = records.iter().map(|r| r.product_id.as_str()).collect();
        assert_eq!(ids, vec!["dn1234-567", "dz5485-612"]);
    }

    #[test]
    fn invalid_block_is_skipped_sibling_still_parsed() {
        let records = extract(
            r#"<script type="application/ld+json">{not valid json</script>
               <script type="application/ld+json">
                 {"@type": "Product", "name": "Air Jordan 1", "url": "/products/dz5485-612"}
               </script>"#,
        );

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].product_id, "dz5485-612");
    }

    #[test]
    fn items_missing_requirements_are_dropped() {
        let records = extract(
            r#"<script type="application/ld+json">
                 [{"@type": "Product", "name": "", "url": "/products/dz5485-612"},
                  {"@type": "Product", "name": "No URL at all"},
                  {"@type": "Product", "name": "Wrong path", "url": "/collections/nike"}]
               </script>"#,
        );
        assert!(records.is_empty());
    }

    #[test]
    fn absolute_urls_pass_through() {
        let records = extract(
            r#"<script type="application/ld+json">
                 {"@type": "Product",
                  "name": "Air Max 90",
                  "url": "https://www.kickscrew.com/products/dn1234-567",
                  "image": "https://cdn.kickscrew.com/am90.jpg"}
               </script>"#,
        );
        assert_eq!(records[0].url, "https://www.kickscrew.com/products/dn1234-567");
        assert_eq!(records[0].image_url, "https://cdn.kickscrew.com/am90.jpg");
    }
}
