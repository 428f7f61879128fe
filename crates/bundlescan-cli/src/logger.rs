//! Logging setup for the bundlescan CLI.
//!
//! Library crates only emit `tracing` events; this module installs the
//! subscriber that prints them.
//!
//! # Example
//!
//! ```rust,no_run
//! use bundlescan_cli::logger::init_logger;
//! use tracing::info;
//!
//! init_logger(false, false, false, None);
//! info!("Starting analysis");
//! ```

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used with `--verbose`.
pub const VERBOSE_FILTER: &str = "bundlescan_cli=debug,bundlescan_graph=debug,bundlescan_config=debug";

/// Filter used with `--quiet`.
pub const QUIET_FILTER: &str = "error";

/// Filter used when nothing else is configured.
pub const DEFAULT_FILTER: &str = "bundlescan_cli=info,bundlescan_graph=info,bundlescan_config=warn";

/// Pick the filter directive string.
///
/// The level is determined in this order:
/// 1. `--verbose`: debug for bundlescan crates
/// 2. `--quiet`: errors only
/// 3. `RUST_LOG`
/// 4. `settings.log_level` from the configuration file
/// 5. [`DEFAULT_FILTER`]
pub fn filter_directives(verbose: bool, quiet: bool, configured: Option<&str>) -> String {
    if verbose {
        return VERBOSE_FILTER.to_string();
    }
    if quiet {
        return QUIET_FILTER.to_string();
    }
    std::env::var("RUST_LOG")
        .ok()
        .filter(|value| !value.trim().is_empty())
        .or_else(|| configured.map(String::from))
        .unwrap_or_else(|| DEFAULT_FILTER.to_string())
}

/// Initialize the tracing subscriber.
///
/// Must be called once, before any logging occurs. Output goes to stderr so
/// stdout stays clean for reports.
///
/// # Arguments
///
/// * `verbose` - Enable debug-level logging (overrides `quiet`)
/// * `quiet` - Only show error-level logs
/// * `no_color` - Disable colored output
/// * `configured` - `settings.log_level` from the configuration, if any
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool, configured: Option<&str>) {
    let directives = filter_directives(verbose, quiet, configured);
    let filter = EnvFilter::try_new(&directives).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color)
        .compact();

    // a second initialization (tests running commands in-process) is ignored
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
