//! Category and pagination crawl loop.
//!
//! Sequential, single crawl at a time, with randomized pauses between
//! requests. All accumulation happens in values owned here and returned to
//! the caller; nothing is shared across invocations.

use std::time::Duration;

use anyhow::Result;
use tokio::time::sleep;
use tracing::{debug, info};

use crate::domain::product::ProductRecord;
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::http_client::ProxyClient;
use crate::infrastructure::parsing::ProductListParser;

pub struct Crawler {
    client: ProxyClient,
    parser: ProductListParser,
    config: AppConfig,
}

impl Crawler {
    pub fn new(config: AppConfig) -> Result<Self> {
        Ok(Self {
            client: ProxyClient::from_app_config(&config)?,
            parser: ProductListParser::new(&config.base_url)?,
            config,
        })
    }

    /// Crawl every configured category in order and return the combined
    /// records. Run-level dedup belongs to the persistence step.
    pub async fn scrape_all_categories(&self) -> Vec<ProductRecord> {
        let mut all_products = Vec::new();
        for (i, category) in self.config.categories.iter().enumerate() {
            info!("scraping category: {}", category.label);
            let records = self.scrape_category(&category.slug, &category.label).await;
            info!(
                "category {} finished with {} products",
                category.label,
                records.len()
            );
            all_products.extend(records);

            if i + 1 < self.config.categories.len() {
                sleep(uniform_delay(5.0, 10.0)).await;
            }
        }
        all_products
    }

    /// Crawl one category page by page until a page comes back empty, a
    /// page is short (last page), or the page cap is reached.
    pub async fn scrape_category(&self, slug: &str, label: &str) -> Vec<ProductRecord> {
        let mut collected = Vec::new();
        let mut page = 1u32;

        loop {
            let page_records = self.scrape_page(slug, label, page).await;
            if page_records.is_empty() {
                info!("no more products for {slug} at page {page}");
                break;
            }

            let short_page = page_records.len() < self.config.full_page_threshold;
            collected.extend(page_records);
            if short_page {
                break;
            }

            page += 1;
            if page > self.config.page_limit {
                break;
            }
            sleep(uniform_delay(3.0, 6.0)).await;
        }

        collected
    }

    /// Try the known pagination URL shapes in order; the first one whose
    /// markup yields products wins.
    async fn scrape_page(&self, slug: &str, label: &str, page: u32) -> Vec<ProductRecord> {
        for url in self.page_url_candidates(slug, page) {
            if let Some(markup) = self.client.fetch_page(&url).await {
                let records = self.parser.extract(&markup, label, &url);
                if !records.is_empty() {
                    info!("found {} products at {url}", records.len());
                    return records;
                }
                debug!("no products extracted from {url}");
            }
            sleep(uniform_delay(1.0, 3.0)).await;
        }
        Vec::new()
    }

    fn page_url_candidates(&self, slug: &str, page: u32) -> Vec<String> {
        let base = &self.config.base_url;
        let mut candidates = vec![
            format!("{base}/collections/{slug}?page={page}"),
            format!("{base}/collections/{slug}?p={page}"),
        ];
        if page > 1 {
            candidates.push(format!("{base}/collections/{slug}/{page}"));
        } else {
            candidates.push(format!("{base}/collections/{slug}"));
        }
        candidates
    }
}

fn uniform_delay(min_seconds: f64, max_seconds: f64) -> Duration {
    Duration::from_secs_f64(min_seconds + fastrand::f64() * (max_seconds - min_seconds))
}
