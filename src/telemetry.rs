//! Logging initialization.
//!
//! Controlled by two environment variables:
//! - `GLASSTOCK_LOG`: an `EnvFilter` directive, default `warn`
//!   (e.g. `info`, `glasstock=debug`).
//! - `GLASSTOCK_LOG_FORMAT`: `json` for JSON events on stderr; anything
//!   else gives human-readable lines on stderr.
//!
//! Stdout is reserved for command output.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt as _;
use tracing_subscriber::util::SubscriberInitExt as _;

/// Env var holding the filter directive.
pub const LOG_ENV: &str = "GLASSTOCK_LOG";

/// Env var selecting the output format.
pub const LOG_FORMAT_ENV: &str = "GLASSTOCK_LOG_FORMAT";

const DEFAULT_DIRECTIVE: &str = "warn";

/// Build the filter from `GLASSTOCK_LOG`, falling back to `warn` when unset
/// or invalid.
#[must_use]
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE))
}

/// `true` when `GLASSTOCK_LOG_FORMAT` asks for JSON.
#[must_use]
pub fn json_requested() -> bool {
    std::env::var(LOG_FORMAT_ENV).is_ok_and(|v| v.eq_ignore_ascii_case("json"))
}

/// Install the global subscriber. Call once, at the start of `main`.
///
/// A second call is ignored.
pub fn init() {
    let registry = tracing_subscriber::registry().with(env_filter());
    let result = if json_requested() {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_span_events(tracing_subscriber::fmt::format::FmtSpan::CLOSE),
            )
            .try_init()
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false),
            )
            .try_init()
    };
    if let Err(e) = result {
        eprintln!("warning: logging already initialized: {e}");
    }
}
