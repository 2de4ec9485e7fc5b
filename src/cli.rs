//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::Parser;

use uimg_core::DEFAULT_CONCURRENCY;

/// Download Ubiquiti marketing images.
///
/// Fetches the marketing page, extracts the embedded category data, and
/// downloads the selected image variants into `<directory>/<group>/`.
#[derive(Parser, Debug)]
#[command(name = "uimg")]
#[command(author, version, about)]
pub struct Args {
    /// Output directory
    #[arg(default_value = ".")]
    pub directory: PathBuf,

    /// Format (e.g. png, jpg, tif, ai, all, best)
    #[arg(short, long, default_value = "best")]
    pub format: String,

    /// Position (e.g. front, bottom, all)
    #[arg(short, long, default_value = "front")]
    pub position: String,

    /// Number of concurrent downloads (1-100)
    #[arg(short, long, default_value_t = DEFAULT_CONCURRENCY as u8, value_parser = clap::value_parser!(u8).range(1..=100))]
    pub concurrent: u8,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,
}
