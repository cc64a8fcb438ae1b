//! Tracing subscriber initialization.

use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

/// Initialize the global tracing subscriber.
///
/// Filtering comes from `RUST_LOG` (default `info`). Calling this more
/// than once is harmless; later calls are ignored.
pub fn init_tracing(service_name: &'static str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let result = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();

    if result.is_ok() {
        info!(service_name = service_name, "Tracing initialized");
    }
}
