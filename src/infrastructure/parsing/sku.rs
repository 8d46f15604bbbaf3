//! Product identifier (SKU) derivation from product page URLs.
//!
//! Two independent rules live here on purpose. `extract_sku_from_url` is the
//! priority cascade used by the extraction strategies; `sku_from_last_tokens`
//! is the simpler rule applied by the `update_product_id` post-processor.
//! They are not reconciled and must stay separate functions.

use once_cell::sync::Lazy;
use regex::Regex;

use super::PRODUCT_PATH_MARKER;

/// Exact SKU-shaped token at the end of the slug, e.g. `dz5485-612`.
static TRAILING_SKU: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)([a-z0-9]+-[0-9]+)$").expect("trailing SKU regex is valid")
});

/// SKU-shaped substring anywhere in the slug; the last match wins since
/// trailing style-color tokens are the most specific.
static EMBEDDED_SKU: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)[a-z]+[0-9]+-[0-9]+").expect("embedded SKU regex is valid")
});

/// Characters that cannot appear in a normalized identifier.
static NON_SLUG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9-]").expect("slug sanitizer regex is valid"));

/// Derive a normalized product identifier from a product page URL.
///
/// Priority: exact trailing SKU token, then the last SKU-shaped substring in
/// the slug, then the sanitized slug itself. Returns `None` when the URL does
/// not point at a product page or the final segment sanitizes to nothing.
pub fn extract_sku_from_url(product_url: &str) -> Option<String> {
    if !product_url.contains(PRODUCT_PATH_MARKER) {
        return None;
    }
    let segment = product_url.split('/').next_back().unwrap_or("");

    if let Some(caps) = TRAILING_SKU.captures(segment) {
        return Some(caps[1].to_lowercase());
    }

    if let Some(found) = EMBEDDED_SKU.find_iter(segment).last() {
        return Some(found.as_str().to_lowercase());
    }

    let sanitized = NON_SLUG
        .replace_all(&segment.to_lowercase(), "")
        .into_owned();
    if sanitized.is_empty() {
        None
    } else {
        Some(sanitized)
    }
}

/// Recompute a product id as the last two hyphen-delimited tokens of the
/// final URL path segment. Used only by the post-processing pass.
pub fn sku_from_last_tokens(url: &str) -> Option<String> {
    let segment = url.trim().split('/').next_back().unwrap_or("");
    let tokens: Vec<&str> = segment.split('-').collect();
    if tokens.len() < 2 {
        return None;
    }
    Some(format!(
        "{}-{}",
        tokens[tokens.len() - 2],
        tokens[tokens.len() - 1]
    ))
}
