//! `tracing` subscriber setup.

use std::sync::Once;

use tracing_subscriber::EnvFilter;

static LOGGING_INIT_ONCE: Once = Once::new();

/// Installs a formatting subscriber filtered by `RUST_LOG`.
///
/// Safe to call more than once. If the application already installed a
/// global subscriber, that one is kept.
pub fn init() {
    LOGGING_INIT_ONCE.call_once(|| {
        let installed = tracing_subscriber::fmt()
            .with_target(false)
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
        if installed.is_err() {
            tracing::debug!("a global tracing subscriber is already installed");
        }
    });
}
