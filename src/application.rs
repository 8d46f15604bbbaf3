//! Application layer: the category/pagination crawl loop.

pub mod crawler;

pub use crawler::Crawler;
