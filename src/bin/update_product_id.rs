//! Post-processing pass: recompute every `product_id` from the record URL
//! using the last-two-token rule and write a new CSV next to the input.
//!
//! This rule deliberately differs from the extraction-time SKU cascade; the
//! two derivations are kept separate on purpose.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use kickscrew_crawler::domain::product::ProductRecord;
use kickscrew_crawler::infrastructure::{export, logging, parsing::sku};

fn main() -> Result<()> {
    logging::init_logging()?;

    let args: Vec<String> = std::env::args().collect();
    let input = args
        .get(1)
        .map(String::as_str)
        .unwrap_or("kickscrew_products.csv");
    let output = updated_path(input)?;

    let products = export::read_products(input)?;
    let updated: Vec<ProductRecord> = products
        .into_iter()
        .map(|record| {
            let product_id = sku::sku_from_last_tokens(&record.url).unwrap_or_default();
            ProductRecord {
                product_id,
                ..record
            }
        })
        .collect();

    export::write_products(&output, &updated)?;
    info!("updated product ids for {} rows, saved to {output}", updated.len());
    Ok(())
}

/// `dir/file.csv` -> `dir/updated_file.csv`.
fn updated_path(input: &str) -> Result<String> {
    let path = Path::new(input);
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .context("input path has no file name")?;
    Ok(path
        .with_file_name(format!("updated_{file_name}"))
        .to_string_lossy()
        .into_owned())
}
