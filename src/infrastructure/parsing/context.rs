//! Parsing context threaded through the extraction strategies.

/// Context for one listing page extraction pass.
#[derive(Debug, Clone)]
pub struct ParseContext {
    /// Category label attached to every record, externally supplied.
    pub category: String,

    /// URL of the page being parsed. Not used for extraction itself,
    /// carried for log provenance.
    pub page_url: String,

    /// Base URL for resolving relative links and images.
    pub base_url: String,
}

impl ParseContext {
    pub fn new(category: &str, page_url: &str, base_url: &str) -> Self {
        Self {
            category: category.to_string(),
            page_url: page_url.to_string(),
            base_url: base_url.to_string(),
        }
    }
}
