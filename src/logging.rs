//! Logging setup.

use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_FILTER: &str = "info,tariff_dashboard=debug";

/// Install the global `tracing` subscriber. `RUST_LOG` overrides the default filter.
pub fn init() {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let _ = fmt()
        .with_env_filter(env)
        .with_target(false)
        .try_init();
}
