//! Infrastructure: configuration, HTTP fetching, HTML parsing, CSV export.

pub mod config;
pub mod export;
pub mod http_client;
pub mod logging;
pub mod parsing;
