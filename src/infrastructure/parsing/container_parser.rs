//! Generic product-card container matcher, the last-resort strategy.
//!
//! Broad class-based heuristics risk false positives, so this only runs when
//! both the direct link scan and the JSON-LD parser came up empty. Selectors
//! are tried in fixed priority order and the first one that yields any
//! records wins; results are never merged across selectors.

use scraper::{Html, Selector};
use tracing::{debug, warn};

use super::{absolutize, ExtractStrategy, LinkProductParser, ParseContext, ParsingError,
            ParsingResult, PRODUCT_PATH_MARKER};
use crate::domain::product::ProductRecord;

/// Container selectors in priority order, most specific first.
const CONTAINER_SELECTORS: &[&str] = &[
    ".product-item",
    ".grid-item",
    ".product",
    r#"[class*="product"]"#,
    ".card",
    "[data-product]",
    ".item",
];

pub struct ContainerMatcher {
    container_selectors: Vec<Selector>,
    anchor_selector: Selector,
    link_parser: LinkProductParser,
}

impl ContainerMatcher {
    pub fn new() -> ParsingResult<Self> {
        let anchor = format!(r#"a[href*="{PRODUCT_PATH_MARKER}"]"#);
        Ok(Self {
            container_selectors: compile_selectors(CONTAINER_SELECTORS)?,
            anchor_selector: Selector::parse(&anchor)
                .map_err(|e| ParsingError::invalid_selector(&anchor, e))?,
            link_parser: LinkProductParser::new()?,
        })
    }
}

impl ExtractStrategy for ContainerMatcher {
    fn name(&self) -> &'static str {
        "container_match"
    }

    fn extract(&self, html: &Html, context: &ParseContext) -> Vec<ProductRecord> {
        for (i, selector) in self.container_selectors.iter().enumerate() {
            let mut records = Vec::new();
            for container in html.select(selector) {
                for anchor in container.select(&self.anchor_selector) {
                    let Some(href) = anchor.value().attr("href").filter(|h| !h.is_empty())
                    else {
                        continue;
                    };
                    let product_url = absolutize(&context.base_url, href);
                    if let Some(record) =
                        self.link_parser.parse_anchor(&anchor, &product_url, context)
                    {
                        records.push(record);
                    }
                }
            }
            if !records.is_empty() {
                debug!(
                    selector_index = i,
                    count = records.len(),
                    page = %context.page_url,
                    "container selector produced records"
                );
                return records;
            }
        }
        Vec::new()
    }
}

/// Compile selector strings, skipping invalid ones with a warning. Fails
/// only when nothing compiles.
fn compile_selectors(selector_strings: &[&str]) -> ParsingResult<Vec<Selector>> {
    let mut selectors = Vec::new();
    let mut errors = Vec::new();

    for selector_str in selector_strings {
        match Selector::parse(selector_str) {
            Ok(selector) => selectors.push(selector),
            Err(e) => {
                warn!("failed to compile selector '{}': {}", selector_str, e);
                errors.push(format!("'{selector_str}': {e}"));
            }
        }
    }

    if selectors.is_empty() {
        return Err(ParsingError::NoUsableSelectors {
            errors: errors.join(", "),
        });
    }
    Ok(selectors)
}
