//! Logging setup for the command line tool.
//!
//! Diagnostics are emitted with `tracing` and written to stderr so they
//! never mix with the rendered tree on stdout.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable holding an `EnvFilter` directive.
pub const LOG_ENV: &str = "FILETREE_LOG";

/// Install the global subscriber.
///
/// `FILETREE_LOG` wins when set; otherwise the level is `debug` with
/// `verbose` and `warn` without. Calling this twice is a no-op.
pub fn init_logging(verbose: bool) {
    let filter = build_env_filter(verbose);
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .try_init();
}

fn build_env_filter(verbose: bool) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_env(LOG_ENV) {
        return filter;
    }
    EnvFilter::new(default_level(verbose))
}

fn default_level(verbose: bool) -> &'static str {
    if verbose { "debug" } else { "warn" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_level() {
        assert_eq!(default_level(false), "warn");
        assert_eq!(default_level(true), "debug");
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init_logging(false);
        init_logging(true);
    }
}
