//! Tracing subscriber setup.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::ObservabilityConfig;

static INIT: Once = Once::new();

/// Environment variable holding per-target log directives.
pub const LOG_ENV_VAR: &str = "ATEC_LOG";

/// Initialize the ATEC tracing/logging system.
///
/// Reads `ATEC_LOG` for per-target levels, e.g. `ATEC_LOG=atec_recommend=debug,atec_storage=warn`.
/// Falls back to `observability.log_level` applied to the `atec` crates when unset or invalid.
/// Emits JSON lines when `observability.json_logs` is set.
///
/// Idempotent: only the first call installs a subscriber, and a subscriber
/// installed elsewhere (e.g. by [`init_tracing_with_filter`]) is kept.
pub fn init_tracing(config: &ObservabilityConfig) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new(default_directives(&config.log_level)));

        let installed = if config.json_logs {
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .json()
                        .with_target(true)
                        .with_thread_ids(true)
                        .with_file(true)
                        .with_line_number(true),
                )
                .with(filter)
                .try_init()
        } else {
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_thread_ids(true)
                        .with_file(true)
                        .with_line_number(true),
                )
                .with(filter)
                .try_init()
        };

        if let Err(e) = installed {
            tracing::debug!(error = %e, "global subscriber already set, keeping it");
        }
    });
}

/// Initialize tracing with a custom filter string (for tests or embedding).
/// Returns without effect if a subscriber is already installed.
pub fn init_tracing_with_filter(filter: &str) {
    let filter = EnvFilter::new(filter);
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_test_writer()
        .try_init();
}

fn default_directives(level: &str) -> String {
    ["atec_core", "atec_storage", "atec_recommend"]
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}
