//! CSV persistence for product records.
//!
//! Five columns in record field order (category, style_name, product_id,
//! url, image_url), header row included, no index column.

use std::path::Path;

use anyhow::{Context, Result};

use crate::domain::product::{dedup_by_product_id, ProductRecord};

/// Write records as-is, in order.
pub fn write_products(path: impl AsRef<Path>, records: &[ProductRecord]) -> Result<()> {
    let path = path.as_ref();
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Run-level dedup by `product_id`, then write. Returns the unique count.
pub fn write_unique_products(
    path: impl AsRef<Path>,
    records: &[ProductRecord],
) -> Result<usize> {
    let unique = dedup_by_product_id(records.to_vec());
    write_products(path, &unique)?;
    Ok(unique.len())
}

pub fn read_products(path: impl AsRef<Path>) -> Result<Vec<ProductRecord>> {
    let path = path.as_ref();
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    let mut records = Vec::new();
    for row in reader.deserialize() {
        records.push(row?);
    }
    Ok(records)
}
