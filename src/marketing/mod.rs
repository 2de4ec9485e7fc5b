//! Marketing payload extraction and item enumeration.
//!
//! The marketing page embeds its category data as a JSON string literal
//! inside a `JSON.parse(...)` assignment. This module locates and decodes
//! that payload, models it, and turns it into the flat sequence of download
//! descriptors the download engine consumes.
//!
//! # Pipeline
//!
//! - [`extract_marketing_data`] - page text → [`MarketingData`]
//! - [`select_downloads`] - one item's variants + format policy → chosen
//!   (extension, URL) pairs
//! - [`enumerate`] - [`MarketingData`] + filters → lazy sequence of
//!   [`DownloadDescriptor`]
//!
//! # Example
//!
//! ```
//! use uimg_core::config::{FormatFilter, PositionFilter};
//! use uimg_core::marketing::{enumerate, extract_marketing_data};
//!
//! let page = r#"<script>var marketingCategories = JSON.parse("{}")</script>"#;
//! let data = extract_marketing_data(page).unwrap();
//! let descriptors: Vec<_> =
//!     enumerate(&data, &FormatFilter::Best, &PositionFilter::All).collect();
//! assert!(descriptors.is_empty());
//! ```

mod catalog;
mod data;
mod error;
mod extract;

pub use catalog::{DownloadDescriptor, enumerate, select_downloads};
pub use data::{DownloadVariant, MarketingData, MarketingGroup, MarketingItem};
pub use error::ExtractError;
pub use extract::extract_marketing_data;
