//! Tracing setup: structured logging with span definitions and event types.

pub mod events;
pub mod spans;

use std::sync::Once;

use effort_core::config::ObservabilityConfig;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable holding the log filter directives.
pub const LOG_ENV_VAR: &str = "EFFORT_LOG";

static INIT: Once = Once::new();

/// Initialize the tracing subscriber with default settings.
///
/// Reads `EFFORT_LOG` for per-crate levels, e.g.
/// `EFFORT_LOG=effort_training=debug,effort_storage=warn`.
/// Falls back to `info`. Idempotent.
pub fn init_tracing() {
    init_tracing_with_config(&ObservabilityConfig::default());
}

/// Initialize tracing from config. `EFFORT_LOG` still wins over
/// `log_level` when set. Idempotent; later calls are ignored.
pub fn init_tracing_with_config(config: &ObservabilityConfig) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .or_else(|_| EnvFilter::try_new(&config.log_level))
            .unwrap_or_else(|_| EnvFilter::new("info"));

        let layer = fmt::layer()
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true);

        // A host process may already own the global subscriber.
        if config.json_logs {
            tracing_subscriber::registry()
                .with(layer.json())
                .with(filter)
                .try_init()
                .ok();
        } else {
            tracing_subscriber::registry()
                .with(layer)
                .with(filter)
                .try_init()
                .ok();
        }
    });
}
