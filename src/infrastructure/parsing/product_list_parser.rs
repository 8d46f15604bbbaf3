//! Extraction orchestrator for product listing pages.
//!
//! Runs the strategies in priority order and short-circuits on the first
//! non-empty result: direct link scan, then JSON-LD metadata, then generic
//! container matching. The combined result is deduplicated by product id,
//! first occurrence in scan order wins.

use scraper::Html;
use tracing::debug;

use super::{ContainerMatcher, ExtractStrategy, JsonLdParser, LinkProductParser, ParseContext,
            ParsingResult};
use crate::domain::product::{dedup_by_product_id, ProductRecord};

pub struct ProductListParser {
    base_url: String,
    link_scan: LinkProductParser,
    json_ld: JsonLdParser,
    container_match: ContainerMatcher,
}

impl ProductListParser {
    pub fn new(base_url: &str) -> ParsingResult<Self> {
        Ok(Self {
            base_url: base_url.to_string(),
            link_scan: LinkProductParser::new()?,
            json_ld: JsonLdParser::new()?,
            container_match: ContainerMatcher::new()?,
        })
    }

    /// Extract all products from one listing page.
    ///
    /// Never fails; empty or unparseable markup yields an empty vector,
    /// which the crawl loop reads as the pagination termination signal.
    pub fn extract(
        &self,
        html_content: &str,
        category: &str,
        page_url: &str,
    ) -> Vec<ProductRecord> {
        if html_content.is_empty() {
            return Vec::new();
        }

        let html = Html::parse_document(html_content);
        let context = ParseContext::new(category, page_url, &self.base_url);

        let mut records = self.run(&self.link_scan, &html, &context);
        if records.is_empty() {
            records = self.run(&self.json_ld, &html, &context);
        }
        if records.is_empty() {
            records = self.run(&self.container_match, &html, &context);
        }

        dedup_by_product_id(records)
    }

    fn run<S: ExtractStrategy>(
        &self,
        strategy: &S,
        html: &Html,
        context: &ParseContext,
    ) -> Vec<ProductRecord> {
        let records = strategy.extract(html, context);
        if !records.is_empty() {
            debug!(
                strategy = strategy.name(),
                count = records.len(),
                page = %context.page_url,
                "strategy produced records"
            );
        }
        records
    }
}
