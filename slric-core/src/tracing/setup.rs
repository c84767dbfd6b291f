//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Environment variable holding the log filter directives.
pub const LOG_ENV_VAR: &str = "SLRIC_LOG";

/// Filter used when `SLRIC_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "slric=info";

/// Initialize the SLRIC tracing/logging system.
///
/// Reads `SLRIC_LOG` for per-module log levels.
/// Format: `SLRIC_LOG=slric_analysis::direct=debug,slric_analysis::indirect=info`
///
/// Falls back to `slric=info` if `SLRIC_LOG` is not set or is invalid.
/// Calling it more than once is a no-op.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        // A subscriber installed by the host application wins.
        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .with(filter)
            .try_init();
    });
}
