//! Crawler entry point: crawl every configured category and write the
//! deduplicated result as CSV.

use anyhow::Result;
use tracing::info;

use kickscrew_crawler::application::Crawler;
use kickscrew_crawler::infrastructure::{config::AppConfig, export, logging};

#[tokio::main]
async fn main() -> Result<()> {
    logging::init_logging()?;

    let config_path = std::env::args().nth(1).unwrap_or_else(|| "config.json".to_string());
    let config = AppConfig::load(&config_path).await?;

    let crawler = Crawler::new(config.clone())?;
    let products = crawler.scrape_all_categories().await;

    if products.is_empty() {
        info!("no products were scraped, nothing to save");
        return Ok(());
    }

    let written = export::write_unique_products(&config.output_file, &products)?;
    info!(
        "saved {written} unique products ({} scraped) to {}",
        products.len(),
        config.output_file
    );
    Ok(())
}
