//! Domain types for the crawler.

pub mod product;

pub use product::ProductRecord;
