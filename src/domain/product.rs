//! Product listing record extracted from collection pages.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// One product row from a listing page.
///
/// Field order is the CSV column order. `url` and `image_url` are always
/// absolute by the time a record is constructed; `image_url` may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub category: String,
    pub style_name: String,
    pub product_id: String,
    pub url: String,
    pub image_url: String,
}

/// Deduplicate records by `product_id`, keeping the first occurrence.
pub fn dedup_by_product_id(records: Vec<ProductRecord>) -> Vec<ProductRecord> {
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|record| seen.insert(record.product_id.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(product_id: &str, style_name: &str) -> ProductRecord {
        ProductRecord {
            category: "Nike".to_string(),
            style_name: style_name.to_string(),
            product_id: product_id.to_string(),
            url: format!("https://www.kickscrew.com/products/{product_id}"),
            image_url: String::new(),
        }
    }

    #[test]
    fn dedup_keeps_first_occurrence() {
        let records = vec![
            record("dn1234-567", "Air Max 90"),
            record("dz5485-612", "Air Jordan 1"),
            record("dn1234-567", "Air Max 90 (duplicate listing)"),
        ];

        let unique = dedup_by_product_id(records);
        assert_eq!(unique.len(), 2);
        assert_eq!(unique[0].style_name, "Air Max 90");
        assert_eq!(unique[1].product_id, "dz5485-612");
    }

    #[test]
    fn dedup_preserves_scan_order() {
        let records = vec![record("b-2", "second"), record("a-1", "first")];
        let unique = dedup_by_product_id(records);
        assert_eq!(unique[0].product_id, "b-2");
        assert_eq!(unique[1].product_id, "a-1");
    }
}
