//! Logging setup.

use tracing_subscriber::EnvFilter;

/// Environment variable with the log filter, checked before `RUST_LOG`.
pub const LOG_ENV: &str = "ONCALL_LOG";

/// Environment variable routing user-facing messages through `tracing`.
pub const DEBUG_ENV: &str = "ONCALL_DEBUG";

const DEFAULT_FILTER: &str = "warn";

/// Default when `ONCALL_DEBUG` is set, so `msg_print!` and `msg_info!`
/// events are not filtered out.
const DEBUG_FILTER: &str = "info";

/// Builds the filter from `ONCALL_LOG`, then `RUST_LOG`, then the default.
pub fn env_filter() -> EnvFilter {
    let directives = std::env::var(LOG_ENV)
        .or_else(|_| std::env::var(EnvFilter::DEFAULT_ENV))
        .ok();
    filter_from(directives.as_deref(), std::env::var(DEBUG_ENV).is_ok())
}

/// Filter from explicit `directives`, falling back to `info` in debug mode
/// and `warn` otherwise. Invalid directives also fall back.
pub fn filter_from(directives: Option<&str>, debug: bool) -> EnvFilter {
    let fallback = if debug { DEBUG_FILTER } else { DEFAULT_FILTER };
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(fallback))
}

/// Installs the global subscriber. Logs go to stderr so tables stay clean.
pub fn init_logging() {
    let verbose = std::env::var(LOG_ENV).is_ok();

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .with_thread_ids(verbose)
        .init();
}
