//! Logging setup for ledgerlens.
//!
//! A batch run logs to stderr only: reports go to files and stdout stays
//! reserved for the final outcome lines. The level defaults to `info` and
//! can be overridden with `RUST_LOG`.
//!
//! ```no_run
//! ledgerlens::logging::init().expect("Failed to initialize logging");
//! tracing::info!("run started");
//! ```

use anyhow::{Context as _, Result};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _};

/// Initializes the logging system with console output.
///
/// # Errors
///
/// Returns error if the env filter cannot be constructed.
pub fn init() -> Result<()> {
    // Default to INFO, allow override with RUST_LOG
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .context("Failed to create env filter")?;

    let stderr_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .init();

    Ok(())
}
