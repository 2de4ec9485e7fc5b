//! Run orchestration: fetch, extract, enumerate, download.
//!
//! [`run`] is the single entry point the binary calls. It takes a resolved
//! [`RunConfig`] plus injected transport and storage capabilities, so the
//! whole pipeline can be exercised end-to-end against mock servers and
//! temporary directories.

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::config::RunConfig;
use crate::download::{DownloadEngine, DownloadError, EngineError, Storage, Transport};
use crate::marketing::{ExtractError, enumerate, extract_marketing_data};

/// The marketing page carrying the embedded category data.
pub const MARKETING_URL: &str = "https://www.ui.com/marketing/";

/// Fatal errors that abort a run.
///
/// Individual download failures are not errors at this level; they are
/// reported per item and counted in the [`RunSummary`].
#[derive(Debug, Error)]
pub enum RunError {
    /// The marketing page could not be fetched.
    #[error("could not fetch marketing page: {0}")]
    Fetch(#[source] DownloadError),

    /// The marketing payload could not be extracted or parsed.
    #[error(transparent)]
    Extract(#[from] ExtractError),

    /// The download engine configuration was invalid.
    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Outcome of a completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Downloads that were written to disk.
    pub completed: usize,
    /// Downloads that failed (HTTP error, transport failure, local IO).
    pub failed: usize,
}

impl RunSummary {
    /// Total number of downloads attempted.
    #[must_use]
    pub fn total(&self) -> usize {
        self.completed + self.failed
    }

    /// Maps the counts to a process exit outcome.
    #[must_use]
    pub fn exit(&self) -> ProcessExit {
        ProcessExit::from_counts(self.completed, self.failed)
    }
}

/// Process exit outcome derived from completion/failure counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessExit {
    /// Every attempted download succeeded (or there was nothing to do).
    Success,
    /// Some downloads succeeded, some failed.
    Partial,
    /// Every attempted download failed.
    Failure,
}

impl ProcessExit {
    /// Determines the exit outcome from completed and failed counts.
    #[must_use]
    pub fn from_counts(completed: usize, failed: usize) -> Self {
        if failed == 0 {
            Self::Success
        } else if completed > 0 {
            Self::Partial
        } else {
            Self::Failure
        }
    }

    /// The process exit code for this outcome. Any failed download yields
    /// a non-zero code.
    #[must_use]
    pub fn code(self) -> i32 {
        match self {
            Self::Success => 0,
            Self::Partial | Self::Failure => 1,
        }
    }
}

/// Runs the full pipeline against the fixed marketing page URL.
///
/// # Errors
///
/// Returns [`RunError`] if the marketing page cannot be fetched, the
/// payload cannot be extracted or parsed, or the engine configuration is
/// invalid. Individual download failures are counted in the summary
/// instead.
pub async fn run(
    config: &RunConfig,
    transport: Arc<dyn Transport>,
    storage: Arc<dyn Storage>,
) -> Result<RunSummary, RunError> {
    run_with_source(MARKETING_URL, config, transport, storage).await
}

/// Runs the full pipeline against an explicit marketing page URL.
///
/// # Errors
///
/// Same as [`run`].
pub async fn run_with_source(
    page_url: &str,
    config: &RunConfig,
    transport: Arc<dyn Transport>,
    storage: Arc<dyn Storage>,
) -> Result<RunSummary, RunError> {
    info!(url = %page_url, "fetching marketing data");

    let page = transport.get(page_url).await.map_err(RunError::Fetch)?;
    if page.status != 200 {
        return Err(RunError::Fetch(DownloadError::http_status(
            page_url,
            page.status,
        )));
    }

    let data = extract_marketing_data(&page.text())?;
    info!(
        groups = data.len(),
        items = data.item_count(),
        format = %config.format,
        position = %config.position,
        "marketing data extracted"
    );

    let engine = DownloadEngine::new(config.concurrent)?;
    let descriptors = enumerate(&data, &config.format, &config.position);
    let stats = engine
        .process(
            descriptors,
            Arc::clone(&transport),
            storage,
            &config.directory,
        )
        .await;

    Ok(RunSummary {
        completed: stats.completed(),
        failed: stats.failed(),
    })
}
