//! Logging initialization for the command-line tool
//!
//! - Default: human-readable, colored logs on stderr
//! - `json`: structured JSON logs for log collectors
//!
//! The filter is read from `TREND_LOG` (e.g. `TREND_LOG=trend_forecast=debug`)
//! and defaults to `info`.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable holding the log filter directives
pub const LOG_ENV_VAR: &str = "TREND_LOG";

/// Install the global tracing subscriber
pub fn init_logging(json: bool) {
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .with_env_var(LOG_ENV_VAR)
        .from_env_lossy();

    if json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_ansi(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}
