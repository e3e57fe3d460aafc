#![deny(missing_docs)]
//! Logging for the knowledge cards crates.
//!
//! Core, engine and host log through the `cards_*` macros below so the
//! message loop, card sources and poller share one facade. The host binary
//! installs the real backend; tests call [`initialize_for_tests`].

use log::LevelFilter;
use simplelog::{ColorChoice, CombinedLogger, ConfigBuilder, TermLogger, TerminalMode};

/// HTTP and runtime crates whose debug output drowns out card events.
pub const NOISY_TARGETS: [&str; 5] = ["hyper", "hyper_util", "reqwest", "rustls", "wiremock"];

/// Environment variable read by [`initialize_for_tests`], e.g. `CARDS_TEST_LOG=trace`.
pub const TEST_LOG_ENV: &str = "CARDS_TEST_LOG";

/// Debug-level card event (load results, stale responses, poll counts).
#[macro_export]
macro_rules! cards_debug {
    ($($arg:tt)*) => {{
        log::debug!($($arg)*);
    }};
}

/// Info-level card event.
#[macro_export]
macro_rules! cards_info {
    ($($arg:tt)*) => {{
        log::info!($($arg)*);
    }};
}

/// Warning for a recoverable failure: a failed load, an unknown card id, a bad catalog entry.
#[macro_export]
macro_rules! cards_warn {
    ($($arg:tt)*) => {{
        log::warn!($($arg)*);
    }};
}

/// Error the host cannot recover from locally, such as an unwritable page.
#[macro_export]
macro_rules! cards_error {
    ($($arg:tt)*) => {{
        log::error!($($arg)*);
    }};
}

/// Level for test runs: `CARDS_TEST_LOG` when it parses, otherwise debug.
pub fn test_level(env_value: Option<&str>) -> LevelFilter {
    env_value
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(LevelFilter::Debug)
}

/// Installs a terminal logger for tests, with [`NOISY_TARGETS`] silenced.
///
/// Safe to call from every test; only the first call installs anything.
pub fn initialize_for_tests() {
    let level = test_level(std::env::var(TEST_LOG_ENV).ok().as_deref());

    let mut builder = ConfigBuilder::new();
    for target in NOISY_TARGETS {
        builder.add_filter_ignore_str(target);
    }

    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        builder.build(),
        TerminalMode::Stderr,
        ColorChoice::Never,
    )]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_reads_override_or_defaults_to_debug() {
        assert_eq!(test_level(None), LevelFilter::Debug);
        assert_eq!(test_level(Some("warn")), LevelFilter::Warn);
        assert_eq!(test_level(Some(" TRACE ")), LevelFilter::Trace);
        assert_eq!(test_level(Some("loud")), LevelFilter::Debug);
    }

    #[test]
    fn repeated_initialization_is_harmless() {
        initialize_for_tests();
        initialize_for_tests();
        cards_info!("logger installed once");
    }
}
