//! uimg Core Library
//!
//! This library provides the core functionality for the uimg tool, which
//! bulk-downloads Ubiquiti marketing images: it fetches the marketing page,
//! extracts the embedded category data, filters the advertised image
//! variants by format and position, and downloads the selection concurrently
//! into a `<directory>/<group>/<filename>` tree.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`marketing`] - Embedded payload extraction, data model, and item
//!   enumeration
//! - [`download`] - Transport/storage capabilities and the concurrent
//!   download engine
//! - [`config`] - Resolved run configuration and selection filters
//! - [`app`] - Run orchestration and exit outcome mapping

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod app;
pub mod config;
pub mod download;
pub mod marketing;

// Re-export commonly used types
pub use app::{MARKETING_URL, ProcessExit, RunError, RunSummary, run, run_with_source};
pub use config::{FormatFilter, PositionFilter, RunConfig};
pub use download::{
    DEFAULT_CONCURRENCY, DownloadEngine, DownloadError, DownloadStats, EngineError, FetchResponse,
    HttpTransport, LocalStorage, Storage, Transport,
};
pub use marketing::{
    DownloadDescriptor, DownloadVariant, ExtractError, MarketingData, MarketingGroup,
    MarketingItem, enumerate, extract_marketing_data, select_downloads,
};
