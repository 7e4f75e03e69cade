//! Logging initialization.
//!
//! Sink selection belongs to the host; this helper is for standalone
//! embedding and tests. The configured `loggingLevel` becomes the default
//! filter, overridable via the `EMITTER_LOG` environment variable.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LogLevel;

/// Environment variable for logging configuration.
pub const LOG_ENV_VAR: &str = "EMITTER_LOG";

/// Initialize a `tracing` subscriber. No-op when one is already set.
pub fn init(level: Option<LogLevel>) {
    let fallback = level.map_or("info", |l| l.as_filter_directive());
    let filter = tracing_subscriber::EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}
