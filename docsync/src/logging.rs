//! Diagnostic tracing for the docsync tools.
//!
//! # Separation of Concerns
//!
//! - **Tracing (this module)**: Dev diagnostics, output to stderr. Not part of
//!   the tools' product output.
//!
//! - **Console lines** (`Created docs for ...`, `GPT output written to ...`):
//!   Product output on stdout. Always printed, unaffected by log filters.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::io::env::process_env;

/// Tool-specific filter variable, checked before `RUST_LOG`.
pub const LOG_ENV: &str = "DOCSYNC_LOG";

/// Used when neither variable is set. The workspace crates report missing
/// sources and failed requests at `warn`; the HTTP stack only on errors.
pub const DEFAULT_DIRECTIVES: &str = "warn,reqwest=error,hyper_util=error";

/// Pick the filter directives: `DOCSYNC_LOG`, then `RUST_LOG`, then the
/// default. Blank values count as unset.
pub fn filter_directives(lookup: impl Fn(&str) -> Option<String>) -> String {
    [LOG_ENV, "RUST_LOG"]
        .into_iter()
        .filter_map(&lookup)
        .find(|value| !value.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_DIRECTIVES.to_string())
}

/// Initialize tracing subscriber for diagnostic logging.
///
/// Output: stderr, compact format, no timestamps or targets. Invalid
/// directives fall back to [`DEFAULT_DIRECTIVES`].
///
/// # Example
/// ```bash
/// DOCSYNC_LOG=docsync=debug doc-updater
/// ```
pub fn init() {
    let filter = EnvFilter::try_new(filter_directives(process_env))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .without_time()
                .with_target(false)
                .compact(),
        )
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::env::map_env;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        map_env(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn tool_variable_wins_over_rust_log() {
        let lookup = vars(&[(LOG_ENV, "docsync=debug"), ("RUST_LOG", "trace")]);
        assert_eq!(filter_directives(lookup), "docsync=debug");
    }

    #[test]
    fn rust_log_is_the_fallback() {
        assert_eq!(filter_directives(vars(&[("RUST_LOG", "info")])), "info");
        assert_eq!(
            filter_directives(vars(&[(LOG_ENV, "  "), ("RUST_LOG", "info")])),
            "info"
        );
    }

    #[test]
    fn default_applies_when_unset() {
        assert_eq!(filter_directives(vars(&[])), DEFAULT_DIRECTIVES);
        assert!(EnvFilter::try_new(DEFAULT_DIRECTIVES).is_ok());
    }
}
