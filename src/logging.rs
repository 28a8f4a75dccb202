//! Log subscriber setup.
//!
//! The terminal belongs to the user interface while the game runs, so logs only go to a file and
//! only when one is configured.

use std::{fs::File, sync::Mutex};

use color_eyre::eyre::{eyre, Result};
use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// Installs the global log subscriber if a log file is configured.
///
/// The filter is read from `RUST_LOG` when set and falls back to the configured log level.
///
/// # Errors
///
/// This function may return errors if:
/// - The log file cannot be created
/// - The configured log level is not a valid filter
/// - A global subscriber is already installed
pub fn init(config: &Config) -> Result<()> {
    let Some(path) = &config.log_file else {
        return Ok(());
    };

    let file = File::create(path)?;
    let filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&config.log_level))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|err| eyre!("failed to install log subscriber: {err}"))
}
