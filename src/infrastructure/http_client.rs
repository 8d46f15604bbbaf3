//! HTTP client fetching pages through the ScraperAPI proxy.
//!
//! Absence of content (403/404, or all retries exhausted) is not an error:
//! the crawl loop reads it as "no products here" and moves on.

use std::time::Duration;

use anyhow::{anyhow, bail, Result};
use reqwest::{Client, ClientBuilder, StatusCode};
use tokio::time::sleep;
use tracing::{debug, info, warn};

use super::config::AppConfig;

#[derive(Debug, Clone)]
pub struct ProxyClientConfig {
    pub endpoint: String,
    pub api_key: String,
    pub timeout_seconds: u64,
    pub max_retries: u32,
}

enum FetchOutcome {
    Body(String),
    /// 403/404: the page is gone or blocked, retrying cannot help.
    Gone(StatusCode),
    Retryable(StatusCode),
}

pub struct ProxyClient {
    client: Client,
    config: ProxyClientConfig,
}

impl ProxyClient {
    pub fn from_app_config(app_config: &AppConfig) -> Result<Self> {
        if app_config.proxy_api_key.is_empty() {
            bail!("proxy API key is not configured; set SCRAPERAPI_KEY or proxy_api_key");
        }
        Self::with_config(ProxyClientConfig {
            endpoint: app_config.proxy_endpoint.clone(),
            api_key: app_config.proxy_api_key.clone(),
            timeout_seconds: app_config.request_timeout_seconds,
            max_retries: app_config.max_retries,
        })
    }

    pub fn with_config(config: ProxyClientConfig) -> Result<Self> {
        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .gzip(true)
            .build()
            .map_err(|e| anyhow!("failed to build HTTP client: {e}"))?;
        Ok(Self { client, config })
    }

    /// Fetch page markup for `url` through the proxy.
    ///
    /// `None` means no content is available for this URL, whether because
    /// the target returned 403/404 or because every attempt failed.
    pub async fn fetch_page(&self, url: &str) -> Option<String> {
        for attempt in 1..=self.config.max_retries {
            info!("fetching via proxy: {url} (attempt {attempt})");
            match self.fetch_once(url).await {
                Ok(FetchOutcome::Body(body)) => return Some(body),
                Ok(FetchOutcome::Gone(status)) => {
                    warn!(%status, url, "page unavailable, not retrying");
                    return None;
                }
                Ok(FetchOutcome::Retryable(status)) => {
                    warn!(%status, url, "unexpected status");
                }
                Err(e) => {
                    warn!(url, "request failed: {e}");
                }
            }
            if attempt < self.config.max_retries {
                let wait = backoff_delay(attempt);
                debug!("waiting {:.1}s before retry", wait.as_secs_f64());
                sleep(wait).await;
            }
        }
        None
    }

    async fn fetch_once(&self, url: &str) -> Result<FetchOutcome> {
        let response = self
            .client
            .get(&self.config.endpoint)
            .query(&[
                ("api_key", self.config.api_key.as_str()),
                ("url", url),
                ("render", "false"),
            ])
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => Ok(FetchOutcome::Body(response.text().await?)),
            status @ (StatusCode::FORBIDDEN | StatusCode::NOT_FOUND) => {
                Ok(FetchOutcome::Gone(status))
            }
            status => Ok(FetchOutcome::Retryable(status)),
        }
    }
}

/// Randomized backoff growing with the attempt number: uniform(2s, 5s) * attempt.
fn backoff_delay(attempt: u32) -> Duration {
    let base = 2.0 + fastrand::f64() * 3.0;
    Duration::from_secs_f64(base * f64::from(attempt))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_builds_with_custom_config() {
        let client = ProxyClient::with_config(ProxyClientConfig {
            endpoint: "http://api.scraperapi.com/".to_string(),
            api_key: "test-key".to_string(),
            timeout_seconds: 5,
            max_retries: 2,
        });
        assert!(client.is_ok());
    }

    #[test]
    fn missing_api_key_is_rejected() {
        let app_config = AppConfig::default();
        assert!(app_config.proxy_api_key.is_empty());
        assert!(ProxyClient::from_app_config(&app_config).is_err());
    }

    #[test]
    fn backoff_grows_with_attempts_within_bounds() {
        for attempt in 1..=3 {
            let delay = backoff_delay(attempt).as_secs_f64();
            assert!(delay >= 2.0 * f64::from(attempt));
            assert!(delay <= 5.0 * f64::from(attempt));
        }
    }
}
