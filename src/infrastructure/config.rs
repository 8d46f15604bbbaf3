//! Crawler configuration.
//!
//! Defaults match the production deployment; an optional JSON file can
//! override any field and the proxy key can always come from the
//! `SCRAPERAPI_KEY` environment variable.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::info;

pub mod defaults {
    pub const BASE_URL: &str = "https://www.kickscrew.com";
    pub const PROXY_ENDPOINT: &str = "http://api.scraperapi.com/";
    pub const MAX_RETRIES: u32 = 3;
    pub const REQUEST_TIMEOUT_SECONDS: u64 = 15;
    /// Hard cap on pages fetched per category.
    pub const PAGE_LIMIT: u32 = 20;
    /// A page with fewer products than this is treated as the last page.
    pub const FULL_PAGE_THRESHOLD: usize = 10;
    pub const OUTPUT_FILE: &str = "kickscrew_products.csv";
}

/// One category to crawl: URL slug plus the label written to every record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub slug: String,
    pub label: String,
}

impl Category {
    fn new(slug: &str, label: &str) -> Self {
        Self {
            slug: slug.to_string(),
            label: label.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Base host; all relative product and image URLs resolve against it.
    pub base_url: String,

    /// Fetching proxy endpoint.
    pub proxy_endpoint: String,

    /// Fetching proxy API key. Empty means not configured.
    pub proxy_api_key: String,

    /// Categories crawled in order.
    pub categories: Vec<Category>,

    pub max_retries: u32,
    pub request_timeout_seconds: u64,
    pub page_limit: u32,
    pub full_page_threshold: usize,
    pub output_file: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::BASE_URL.to_string(),
            proxy_endpoint: defaults::PROXY_ENDPOINT.to_string(),
            proxy_api_key: String::new(),
            categories: vec![
                Category::new("air-jordan", "Air Jordan"),
                Category::new("nike", "Nike"),
                Category::new("adidas", "Adidas"),
                Category::new("adidas-yeezy", "Yeezy"),
                Category::new("new-balance", "New Balance"),
                Category::new("asics", "Asics"),
                Category::new("onitsuka-tiger", "Onitsuka Tiger"),
            ],
            max_retries: defaults::MAX_RETRIES,
            request_timeout_seconds: defaults::REQUEST_TIMEOUT_SECONDS,
            page_limit: defaults::PAGE_LIMIT,
            full_page_threshold: defaults::FULL_PAGE_THRESHOLD,
            output_file: defaults::OUTPUT_FILE.to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a JSON file, falling back to defaults when
    /// the file does not exist. `SCRAPERAPI_KEY` overrides the file value.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if fs::try_exists(path).await.unwrap_or(false) {
            let raw = fs::read_to_string(path)
                .await
                .with_context(|| format!("failed to read config file {}", path.display()))?;
            let config: Self = serde_json::from_str(&raw)
                .with_context(|| format!("failed to parse config file {}", path.display()))?;
            info!("loaded configuration from {}", path.display());
            config
        } else {
            Self::default()
        };
        config.apply_env_overrides();
        Ok(config)
    }

    pub fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var("SCRAPERAPI_KEY") {
            if !key.is_empty() {
                self.proxy_api_key = key;
            }
        }
    }
}
