//! Process-wide tracing setup for hosts embedding the engine.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::EngineError;

/// Directives used when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_DIRECTIVES: &str = "info,durak_engine=info";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES))
}

/// Install a JSON subscriber filtered by `RUST_LOG`.
///
/// Fails with `EngineError::Config` when the host already installed a
/// global subscriber; the existing one stays in place.
pub fn init_tracing() -> Result<(), EngineError> {
    let json = fmt::layer()
        .with_target(false)
        .with_file(false)
        .with_line_number(false)
        .with_ansi(false)
        .json()
        .flatten_event(true)
        .with_current_span(false);

    tracing_subscriber::registry()
        .with(env_filter())
        .with(json)
        .try_init()
        .map_err(|e| EngineError::config(format!("Tracing already initialised: {e}")))
}
