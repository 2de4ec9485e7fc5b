//! Concurrent download engine and its transport/storage capabilities.
//!
//! The engine feeds download descriptors through a bounded channel to a
//! pool of worker tasks. HTTP and filesystem access go through the
//! [`Transport`] and [`Storage`] capability traits so the scheduler can be
//! exercised against instrumented fakes; [`HttpTransport`] and
//! [`LocalStorage`] are the production implementations.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use std::sync::Arc;
//! use uimg_core::download::{DownloadEngine, HttpTransport, LocalStorage};
//! use uimg_core::marketing::DownloadDescriptor;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let engine = DownloadEngine::new(5)?;
//! let descriptors = vec![DownloadDescriptor {
//!     group: "banners".to_string(),
//!     filename: "a.png".to_string(),
//!     url: "https://example.com/a.png".to_string(),
//! }];
//! let stats = engine
//!     .process(
//!         descriptors,
//!         Arc::new(HttpTransport::new()),
//!         Arc::new(LocalStorage),
//!         Path::new("./images"),
//!     )
//!     .await;
//! println!("Completed: {}, Failed: {}", stats.completed(), stats.failed());
//! # Ok(())
//! # }
//! ```

mod constants;
mod engine;
mod error;
mod path;
mod storage;
mod transport;

pub use engine::{DEFAULT_CONCURRENCY, DownloadEngine, DownloadStats, EngineError};
pub use error::DownloadError;
pub use storage::{LocalStorage, Storage};
pub use transport::{FetchResponse, HttpTransport, Transport};
