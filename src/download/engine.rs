//! Download engine executing descriptors with a bounded worker pool.
//!
//! `concurrency` worker tasks pull descriptors from a shared bounded
//! channel: at most that many downloads are past the request-issued point
//! at any instant, and a failed descriptor never affects its siblings.
//!
//! # Concurrency Model
//!
//! - `concurrency` workers run as Tokio tasks sharing one receiver
//! - The descriptor sequence is fed through a bounded channel, so
//!   enumeration never runs far ahead of the workers
//! - Workers exit when the channel is closed and drained
//! - Completion order is a function of network timing, not submission order
//! - `process` returns only when every descriptor reached a terminal
//!   outcome (file written or failure reported)

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::{Mutex, mpsc};
use tracing::{debug, info, warn};

use crate::marketing::DownloadDescriptor;

use super::error::DownloadError;
use super::path::safe_segment;
use super::storage::Storage;
use super::transport::Transport;

/// Minimum allowed concurrency value.
const MIN_CONCURRENCY: usize = 1;

/// Maximum allowed concurrency value.
const MAX_CONCURRENCY: usize = 100;

/// Default concurrency if not specified.
pub const DEFAULT_CONCURRENCY: usize = 5;

/// Error type for download engine operations.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Invalid concurrency value provided.
    #[error(
        "invalid concurrency value {value}: must be between {MIN_CONCURRENCY} and {MAX_CONCURRENCY}"
    )]
    InvalidConcurrency {
        /// The invalid value that was provided.
        value: usize,
    },
}

/// Statistics from one engine run.
///
/// Uses atomic counters so concurrent workers can update them without
/// further synchronization.
#[derive(Debug, Default)]
pub struct DownloadStats {
    completed: AtomicUsize,
    failed: AtomicUsize,
}

impl DownloadStats {
    /// Creates a new stats tracker with zero counts.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of successfully completed downloads.
    #[must_use]
    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }

    /// Returns the number of failed downloads.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.failed.load(Ordering::SeqCst)
    }

    /// Returns the total number of descriptors processed.
    #[must_use]
    pub fn total(&self) -> usize {
        self.completed() + self.failed()
    }

    fn increment_completed(&self) {
        self.completed.fetch_add(1, Ordering::SeqCst);
    }

    fn increment_failed(&self) {
        self.failed.fetch_add(1, Ordering::SeqCst);
    }
}

/// Download engine with a worker-pool admission gate.
#[derive(Debug)]
pub struct DownloadEngine {
    /// Configured concurrency limit (worker count).
    concurrency: usize,
}

impl DownloadEngine {
    /// Creates a new download engine with the specified concurrency limit.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConcurrency`] if the value is outside
    /// the valid range (1-100).
    pub fn new(concurrency: usize) -> Result<Self, EngineError> {
        if !(MIN_CONCURRENCY..=MAX_CONCURRENCY).contains(&concurrency) {
            return Err(EngineError::InvalidConcurrency { value: concurrency });
        }

        debug!(concurrency, "creating download engine");

        Ok(Self { concurrency })
    }

    /// Returns the configured concurrency limit.
    #[must_use]
    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Downloads every descriptor, at most `concurrency` in flight at once.
    ///
    /// Each descriptor independently runs request → directory-ensure →
    /// write; a non-200 response, transport failure, or local IO failure
    /// is logged with its URL and cause, counted, and does not affect any
    /// other descriptor. Returns once every descriptor has reached a
    /// terminal outcome.
    pub async fn process<I>(
        &self,
        descriptors: I,
        transport: Arc<dyn Transport>,
        storage: Arc<dyn Storage>,
        output_dir: &Path,
    ) -> DownloadStats
    where
        I: IntoIterator<Item = DownloadDescriptor>,
    {
        let stats = Arc::new(DownloadStats::new());
        let (tx, rx) = mpsc::channel::<DownloadDescriptor>(self.concurrency);
        let rx = Arc::new(Mutex::new(rx));

        let mut workers = Vec::with_capacity(self.concurrency);
        for worker_id in 0..self.concurrency {
            let rx = Arc::clone(&rx);
            let transport = Arc::clone(&transport);
            let storage = Arc::clone(&storage);
            let stats = Arc::clone(&stats);
            let output_dir = output_dir.to_path_buf();

            workers.push(tokio::spawn(async move {
                loop {
                    // Hold the lock only while waiting for the next descriptor
                    let descriptor = { rx.lock().await.recv().await };
                    let Some(descriptor) = descriptor else {
                        break; // Channel closed and drained, exit worker
                    };

                    match download_one(&*transport, &*storage, &descriptor, &output_dir).await {
                        Ok(path) => {
                            debug!(
                                worker_id,
                                url = %descriptor.url,
                                path = %path.display(),
                                "download completed"
                            );
                            stats.increment_completed();
                        }
                        Err(e) => {
                            warn!(worker_id, url = %descriptor.url, error = %e, "download failed");
                            stats.increment_failed();
                        }
                    }
                }
            }));
        }

        // Feed the shared queue; the bounded channel keeps enumeration from
        // running far ahead of the workers
        for descriptor in descriptors {
            if tx.send(descriptor).await.is_err() {
                warn!("all workers exited before the queue drained");
                break;
            }
        }
        // Closing the channel lets drained workers exit
        drop(tx);

        for handle in workers {
            // Worker panics are logged but don't fail the batch
            if let Err(e) = handle.await {
                warn!(error = %e, "download worker panicked");
            }
        }

        info!(
            completed = stats.completed(),
            failed = stats.failed(),
            total = stats.total(),
            "download batch complete"
        );

        // All workers are done, so this is normally the sole reference; fall
        // back to copying the counts if not.
        match Arc::try_unwrap(stats) {
            Ok(stats) => stats,
            Err(arc_stats) => {
                let new_stats = DownloadStats::new();
                new_stats
                    .completed
                    .store(arc_stats.completed(), Ordering::SeqCst);
                new_stats.failed.store(arc_stats.failed(), Ordering::SeqCst);
                new_stats
            }
        }
    }
}

/// Runs one descriptor to a terminal outcome: GET, ensure the group
/// directory, write the file.
async fn download_one(
    transport: &dyn Transport,
    storage: &dyn Storage,
    descriptor: &DownloadDescriptor,
    output_dir: &Path,
) -> Result<PathBuf, DownloadError> {
    // Group and filename come verbatim from upstream data; refuse anything
    // that is not a single normal path segment.
    if !safe_segment(&descriptor.group) {
        return Err(DownloadError::unsafe_path(
            &descriptor.url,
            &descriptor.group,
        ));
    }
    if !safe_segment(&descriptor.filename) {
        return Err(DownloadError::unsafe_path(
            &descriptor.url,
            &descriptor.filename,
        ));
    }

    info!(url = %descriptor.url, "downloading");

    let response = transport.get(&descriptor.url).await?;
    if response.status != 200 {
        return Err(DownloadError::http_status(&descriptor.url, response.status));
    }

    let group_dir = output_dir.join(&descriptor.group);
    storage.ensure_dir(&group_dir).await?;

    let file_path = group_dir.join(&descriptor.filename);
    storage.write_file(&file_path, &response.body).await?;

    Ok(file_path)
}
