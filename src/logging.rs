//! File logging. The terminal belongs to the UI, so nothing goes to stderr.

use anyhow::{Context, Result};
use std::fs::File;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Install the global subscriber writing to `path`.
///
/// `RUST_LOG` wins over `level` when set.
pub fn init(path: &Path, level: &str) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
    }
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;

    build_subscriber(file, level)?
        .try_init()
        .context("Failed to install tracing subscriber")?;
    Ok(())
}

pub fn build_subscriber(
    log_file: File,
    level: &str,
) -> Result<impl tracing::Subscriber + Send + Sync> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level)
            .with_context(|| format!("Invalid log level '{}'", level))?,
    };

    let fmt_layer = fmt::layer()
        .with_ansi(false)
        .with_writer(Arc::new(log_file));

    Ok(tracing_subscriber::registry().with(fmt_layer).with(env_filter))
}
