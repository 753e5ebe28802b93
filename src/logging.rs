//! Tracing setup.
//!
//! The chat screen owns the terminal, so the interactive mode logs to a file.
//! One-shot commands log to stderr.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result, anyhow};
use tracing_subscriber::EnvFilter;

/// Environment variable holding a tracing filter, e.g. `askchat=debug`.
pub const LOG_ENV: &str = "ASKCHAT_LOG";

pub enum LogDestination {
    Stderr,
    File(PathBuf),
}

/// `<data_local_dir>/askchat/askchat.log`, falling back to the temp dir.
pub fn default_log_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("askchat")
        .join("askchat.log")
}

fn default_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

pub fn init(verbose: u8, destination: LogDestination) -> Result<()> {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    let installed = match destination {
        LogDestination::Stderr => builder.with_writer(std::io::stderr).try_init(),
        LogDestination::File(path) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("failed to open log file {}", path.display()))?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
    };

    installed.map_err(|e| anyhow!("failed to install tracing subscriber: {e}"))
}
