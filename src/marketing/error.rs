//! Error types for marketing payload extraction.

use thiserror::Error;

/// Errors that can occur while extracting the embedded marketing payload.
///
/// Both variants are fatal to the run: without the payload there is nothing
/// to enumerate.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The `marketingCategories` assignment was not found in the page text.
    #[error("marketing data assignment not found in page text")]
    PatternNotFound,

    /// The embedded text was not valid JSON after unescaping.
    #[error("marketing data is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}
