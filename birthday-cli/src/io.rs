//! File I/O for native CLI

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use birthday_core::CardContent;

/// Load card content from a JSON file
pub fn load_content(path: &Path) -> Result<CardContent> {
    let canonical = path
        .canonicalize()
        .with_context(|| format!("Failed to resolve path: {}", path.display()))?;

    CardContent::load(&canonical)
        .with_context(|| format!("Failed to load card: {}", canonical.display()))
}

/// Get the local data directory for the card, creating it if needed
pub fn data_dir() -> Result<PathBuf> {
    let base = dirs::data_local_dir().context("Could not find local data directory")?;
    let data_dir = base.join("birthday-card");

    if !data_dir.exists() {
        fs::create_dir_all(&data_dir)
            .with_context(|| format!("Failed to create {}", data_dir.display()))?;
    }

    Ok(data_dir)
}

/// Send tracing output to `birthday.log` in the data directory.
///
/// The terminal belongs to the UI, so nothing is logged to stdout. Keep the
/// returned guard alive until exit or buffered lines are lost.
pub fn init_logging(level: Option<&str>) -> Result<(WorkerGuard, PathBuf)> {
    let dir = data_dir()?;
    let appender = tracing_appender::rolling::never(&dir, "birthday.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = match level {
        Some(level) => EnvFilter::try_new(level)
            .with_context(|| format!("Invalid log level: {level}"))?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();

    Ok((guard, dir.join("birthday.log")))
}
