//! Tracing setup: concise console output plus a detailed append-only log file.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{Layer, fmt};

/// Install the global subscriber.
///
/// The console shows bare messages at INFO (DEBUG with `verbose`, or whatever
/// `RUST_LOG` asks for). The log file records everything from DEBUG up with
/// timestamps and levels. If the log file cannot be opened, logging continues
/// on the console only.
pub fn init(log_file: &Path, verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let console = fmt::layer()
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .with_level(verbose)
        .with_filter(console_filter);

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .ok()
        .map(|file| {
            fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(false)
                .with_filter(LevelFilter::DEBUG)
        });

    let file_missing = file.is_none();

    // Fails only if a subscriber is already installed.
    let _ = tracing_subscriber::registry()
        .with(console)
        .with(file)
        .try_init();

    if file_missing {
        tracing::warn!("Could not open log file {}", log_file.display());
    }
}
