//! Locates and decodes the marketing payload embedded in the page text.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use super::data::MarketingData;
use super::error::ExtractError;

/// Regex for the assignment that embeds the payload as a JSON string
/// literal. The capture is the escaped JSON between the quotes.
#[allow(clippy::expect_used)]
static MARKETING_ASSIGNMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"var marketingCategories = JSON\.parse\("(.+)"\)"#)
        .expect("marketing assignment regex is valid") // Static pattern, safe to panic
});

/// Escape sequence the page uses in place of embedded double quotes.
const ESCAPED_QUOTE: &str = r"\u0022";

/// Replaces every `\u0022` escape sequence with a literal `"`.
///
/// The embedded JSON string literal cannot contain raw double quotes, so the
/// page escapes them all as `\u0022`; this undoes that before parsing.
/// Text without the sequence passes through unchanged.
pub(crate) fn unescape_embedded_quotes(text: &str) -> String {
    text.replace(ESCAPED_QUOTE, "\"")
}

/// Extracts and decodes the marketing payload from raw page text.
///
/// # Errors
///
/// Returns [`ExtractError::PatternNotFound`] if the page does not contain
/// the `marketingCategories` assignment, or [`ExtractError::Parse`] if the
/// unescaped text is not valid JSON. Both are fatal to the run.
pub fn extract_marketing_data(page: &str) -> Result<MarketingData, ExtractError> {
    let captures = MARKETING_ASSIGNMENT
        .captures(page)
        .ok_or(ExtractError::PatternNotFound)?;
    let escaped = &captures[1];
    debug!(payload_len = escaped.len(), "located embedded payload");
    let unescaped = unescape_embedded_quotes(escaped);
    Ok(MarketingData::from_json(&unescaped)?)
}
