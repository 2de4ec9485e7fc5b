//! Error types for the download module.
//!
//! These errors stay confined to one descriptor each: the engine reports
//! them and moves on. Only the marketing-page fetch treats them as fatal.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while fetching or storing one download.
#[derive(Debug, Error)]
pub enum DownloadError {
    /// Network-level error (DNS resolution, connection refused, TLS errors, etc.)
    #[error("network error downloading {url}: {source}")]
    Network {
        /// The URL that failed to download.
        url: String,
        /// The underlying network error.
        #[source]
        source: reqwest::Error,
    },

    /// Request timed out before completion.
    #[error("timeout downloading {url}")]
    Timeout {
        /// The URL that timed out.
        url: String,
    },

    /// HTTP error response (anything other than 200).
    #[error("HTTP {status} downloading {url}")]
    HttpStatus {
        /// The URL that returned an error status.
        url: String,
        /// The HTTP status code.
        status: u16,
    },

    /// File system error (directory creation, file write).
    #[error("IO error writing to {path}: {source}")]
    Io {
        /// The file path where the error occurred.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The provided URL is malformed or invalid.
    #[error("invalid URL: {url}")]
    InvalidUrl {
        /// The invalid URL string.
        url: String,
    },

    /// Upstream data supplied a group or filename unusable as a single
    /// path segment (empty, `.`, `..`, or containing a separator).
    #[error("refusing unsafe path segment {segment:?} from {url}")]
    UnsafePath {
        /// The URL whose descriptor carried the segment.
        url: String,
        /// The offending segment.
        segment: String,
    },
}

impl DownloadError {
    /// Creates a network error from a reqwest error.
    pub fn network(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Network {
            url: url.into(),
            source,
        }
    }

    /// Creates a timeout error.
    pub fn timeout(url: impl Into<String>) -> Self {
        Self::Timeout { url: url.into() }
    }

    /// Creates an HTTP status error.
    pub fn http_status(url: impl Into<String>, status: u16) -> Self {
        Self::HttpStatus {
            url: url.into(),
            status,
        }
    }

    /// Creates an IO error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Creates an invalid URL error.
    pub fn invalid_url(url: impl Into<String>) -> Self {
        Self::InvalidUrl { url: url.into() }
    }

    /// Creates an unsafe path segment error.
    pub fn unsafe_path(url: impl Into<String>, segment: impl Into<String>) -> Self {
        Self::UnsafePath {
            url: url.into(),
            segment: segment.into(),
        }
    }
}

// No `From<reqwest::Error>` / `From<std::io::Error>` impls: the variants
// need context (url, path) the source errors don't carry, so the helper
// constructors are the conversion points.
