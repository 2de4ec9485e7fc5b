//! Resolved run configuration and selection filters.
//!
//! The binary resolves CLI arguments into a [`RunConfig`] before handing
//! control to the core; nothing in the library reads process-wide state.

use std::convert::Infallible;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Which file variants of an item to download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatFilter {
    /// Every advertised variant.
    All,
    /// The single best variant, by fixed priority (`png`, `jpg`, `tif`).
    Best,
    /// Exactly the variant with this file extension, if offered.
    Extension(String),
}

impl From<&str> for FormatFilter {
    fn from(value: &str) -> Self {
        match value {
            "all" => Self::All,
            "best" => Self::Best,
            other => Self::Extension(other.to_string()),
        }
    }
}

impl FromStr for FormatFilter {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl fmt::Display for FormatFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Best => f.write_str("best"),
            Self::Extension(ext) => f.write_str(ext),
        }
    }
}

/// Which item positions to include.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PositionFilter {
    /// Items at every position.
    All,
    /// Only items tagged with this position slug (e.g. `front`, `bottom`).
    Slug(String),
}

impl PositionFilter {
    /// Returns true if an item with the given position slug passes the filter.
    #[must_use]
    pub fn matches(&self, position_slug: &str) -> bool {
        match self {
            Self::All => true,
            Self::Slug(slug) => slug == position_slug,
        }
    }
}

impl From<&str> for PositionFilter {
    fn from(value: &str) -> Self {
        match value {
            "all" => Self::All,
            other => Self::Slug(other.to_string()),
        }
    }
}

impl FromStr for PositionFilter {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl fmt::Display for PositionFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Slug(slug) => f.write_str(slug),
        }
    }
}

/// Fully resolved configuration for one run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Base output directory; group subdirectories are created beneath it.
    pub directory: PathBuf,
    /// Variant selection policy.
    pub format: FormatFilter,
    /// Position selection policy.
    pub position: PositionFilter,
    /// Maximum number of downloads in flight at once.
    pub concurrent: usize,
}
