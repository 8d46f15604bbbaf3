//! Kickscrew category crawler
//!
//! Crawls Kickscrew collection pages through a fetching proxy and extracts
//! product listings with a layered set of parsing strategies: direct product
//! link scanning, embedded JSON-LD metadata, and generic product-card
//! container matching. Results are deduplicated by product id and written
//! as CSV rows.

pub mod application;
pub mod domain;
pub mod infrastructure;
