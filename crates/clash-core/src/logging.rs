//! Tracing initialization.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::ObservabilityConfig;

static INIT: Once = Once::new();

/// Initialize structured logging with the default configuration.
///
/// Reads the `CLASH_LOG` environment variable for filter directives,
/// e.g. `CLASH_LOG=clash_grouping=debug`.
/// Falls back to `clash=info` if `CLASH_LOG` is not set or is invalid.
///
/// Idempotent: only the first call installs a subscriber.
pub fn init_tracing() {
    init_tracing_with_config(&ObservabilityConfig::default());
}

/// Initialize structured logging, falling back to the configured filter
/// when `CLASH_LOG` is unset.
pub fn init_tracing_with_config(config: &ObservabilityConfig) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env("CLASH_LOG")
            .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
        install(filter, config.json);
    });
}

/// Initialize with an explicit filter string (for testing or embedding).
pub fn init_tracing_with_filter(filter: &str) {
    INIT.call_once(|| {
        install(EnvFilter::new(filter), false);
    });
}

fn install(filter: EnvFilter, json: bool) {
    let registry = tracing_subscriber::registry().with(filter);
    // A host may already own the global subscriber; keep theirs.
    let result = if json {
        registry
            .with(fmt::layer().json().with_target(true).with_thread_ids(true))
            .try_init()
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .try_init()
    };
    if result.is_err() {
        tracing::debug!("global tracing subscriber already installed");
    }
}
