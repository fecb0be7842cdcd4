//! Tracing subscriber setup.

use crate::config::{LogFormat, PropsConfig};
use tracing_subscriber::EnvFilter;

/// Default filter used when `RUST_LOG` is unset.
const DEFAULT_FILTER: &str = "info";

/// Installs a global fmt subscriber honouring `RUST_LOG`.
///
/// Returns `false` if a global subscriber was already installed, in which
/// case nothing changes.
pub fn init_tracing(config: &PropsConfig) -> bool {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    install(config.log_format, filter)
}

/// Installs a global fmt subscriber with an explicit filter directive.
///
/// Invalid directives fall back to the default filter.
pub fn init_tracing_with_filter(config: &PropsConfig, directives: &str) -> bool {
    let filter = EnvFilter::try_new(directives).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    install(config.log_format, filter)
}

fn install(format: LogFormat, filter: EnvFilter) -> bool {
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);

    match format {
        LogFormat::Pretty => builder.try_init().is_ok(),
        LogFormat::Json => builder.json().try_init().is_ok(),
    }
}
