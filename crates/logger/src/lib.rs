//! Process-wide tracing setup shared by the server and the static exporter.

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str =
    "backend_api=debug,server=info,dashboard_engine=debug,generate_dashboard=info,settings_loader=debug,tower_http=debug";

/// Installs the global fmt subscriber. `RUST_LOG` overrides `default_filter`.
///
/// Calling it twice is harmless: the second install is ignored.
pub fn init(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    if tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .is_err()
    {
        tracing::debug!("tracing subscriber already installed");
    }
}

pub fn init_default() {
    init(DEFAULT_FILTER);
}
