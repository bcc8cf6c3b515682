//! Logging setup
//!
//! The runtime emits `tracing` events (faults at `debug`, halts at `error`,
//! array allocation and finalizers at `trace`). Nothing is printed unless a
//! subscriber is installed; [`init_logging`] installs a stderr `fmt`
//! subscriber filtered by `DAFNY_LOG`.
//!
//! ## Usage
//!
//! ```bash
//! DAFNY_LOG=dafny_runtime=trace ./program
//! ```

use crate::config::RuntimeConfig;
use std::sync::Once;
use tracing_subscriber::EnvFilter;

static LOGGING_INIT: Once = Once::new();

/// Install the global subscriber. Safe to call multiple times (idempotent).
///
/// If the host already installed a subscriber, that one is kept.
pub fn init_logging() {
    LOGGING_INIT.call_once(|| {
        let config = RuntimeConfig::from_env();
        let filter = EnvFilter::try_new(&config.log_filter).unwrap_or_else(|_| EnvFilter::new("warn"));
        let installed = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
        if installed.is_err() {
            tracing::debug!("subscriber already installed; keeping it");
        }
    });
}
