//! CLI entry point for the uimg tool.

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::{debug, info, warn};
use uimg_core::{
    FormatFilter, HttpTransport, LocalStorage, PositionFilter, ProcessExit, RunConfig, Storage,
    Transport, run,
};

mod cli;

use cli::Args;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Determine log level based on verbose/quiet flags
    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt().with_env_filter(filter).init();

    debug!(?args, "CLI arguments parsed");

    let config = RunConfig {
        directory: args.directory,
        format: FormatFilter::from(args.format.as_str()),
        position: PositionFilter::from(args.position.as_str()),
        concurrent: usize::from(args.concurrent),
    };

    let transport: Arc<dyn Transport> = Arc::new(HttpTransport::new());
    let storage: Arc<dyn Storage> = Arc::new(LocalStorage);

    let summary = run(&config, transport, storage).await?;

    info!(
        completed = summary.completed,
        failed = summary.failed,
        total = summary.total(),
        "run complete"
    );

    match summary.exit() {
        ProcessExit::Success => Ok(()),
        exit => {
            warn!(failed = summary.failed, "some downloads failed");
            std::process::exit(exit.code());
        }
    }
}
