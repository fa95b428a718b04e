use lazy_static::lazy_static;
use regex::Regex;

use crate::shared::constants::MAX_CATEGORY_TOKEN_LEN;

lazy_static! {
    /// Allow-list for category tokens (names or slugs) coming from clients.
    /// - Valid: "cars", "For Rent", "real-estate", "Dogs & Puppies", "Men's Clothing", "St. Bernard"
    /// - Invalid: "cars.*", "{$ne: null}", "a|b", "(x)"
    pub static ref CATEGORY_TOKEN_REGEX: Regex =
        Regex::new(r"^[\p{L}\p{N}][\p{L}\p{N} _&'.-]*$").unwrap();

    /// Characters that carry no meaning in a full-text search term
    pub static ref SEARCH_TERM_SPLIT_REGEX: Regex = Regex::new(r"[^\p{L}\p{N}]+").unwrap();
}

/// Returns the trimmed token when it is safe to look up as a category name or slug.
pub fn sanitize_category_token(raw: &str) -> Option<&str> {
    let token = raw.trim();
    if token.is_empty() || token.chars().count() > MAX_CATEGORY_TOKEN_LEN {
        return None;
    }
    CATEGORY_TOKEN_REGEX.is_match(token).then_some(token)
}

/// Splits free text into lowercase alphanumeric search terms.
pub fn search_terms(raw: &str) -> Vec<String> {
    SEARCH_TERM_SPLIT_REGEX
        .split(raw)
        .filter(|t| !t.is_empty())
        .map(|t| t.to_lowercase())
        .collect()
}

/// Escapes LIKE wildcards so client input matches literally.
pub fn escape_like(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
