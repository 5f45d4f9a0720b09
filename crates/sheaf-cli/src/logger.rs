//! Logging infrastructure for the sheaf CLI.
//!
//! Library crates only emit `tracing` events; this module installs the
//! subscriber that prints them.
//!
//! # Example
//!
//! ```rust,no_run
//! use sheaf_cli::logger::init_logger;
//! use tracing::{debug, info};
//!
//! init_logger(false, false, false);
//!
//! info!("Processing stylesheets");
//! debug!("Removed directive from {}", "main.css");
//! ```

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used with `--verbose`
pub const VERBOSE_FILTER: &str =
    "sheaf_cli=debug,sheaf_css=debug,sheaf_plugin_css=debug,sheaf_config=debug";
/// Filter used with `--quiet`
pub const QUIET_FILTER: &str = "error";
/// Filter used when `RUST_LOG` is unset
pub const DEFAULT_FILTER: &str =
    "sheaf_cli=info,sheaf_css=info,sheaf_plugin_css=info,sheaf_config=info";

/// Initialize the tracing subscriber with the specified options.
///
/// The logging level is determined in this order:
/// 1. `--verbose` flag: DEBUG for sheaf crates
/// 2. `--quiet` flag: ERROR only
/// 3. `RUST_LOG` environment variable
/// 4. Default: INFO for sheaf crates
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    init_logger_with_filter(filter_for(verbose, quiet), no_color);
}

/// Initialize logger with custom environment filter.
pub fn init_logger_with_filter(filter: EnvFilter, no_color: bool) {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color && should_use_colors())
        .compact();

    // A second initialization (e.g. from tests) keeps the first subscriber
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}

fn filter_for(verbose: bool, quiet: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else if quiet {
        EnvFilter::new(QUIET_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }
}

/// Check if colored output should be enabled.
///
/// `NO_COLOR` disables colors, `FORCE_COLOR` forces them; otherwise the
/// stderr terminal decides.
pub fn should_use_colors() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }

    if std::env::var_os("FORCE_COLOR").is_some() {
        return true;
    }

    console::Term::stderr().features().colors_supported()
}
