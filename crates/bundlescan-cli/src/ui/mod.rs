//! Terminal output: status messages, report rendering and formatting.
//!
//! Status messages go to stderr. Reports and plans go to stdout so they can
//! be piped.
//!
//! # Examples
//!
//! ```no_run
//! use bundlescan_cli::ui;
//!
//! ui::init_colors(false);
//! ui::success("No duplicated assets");
//! ui::warning("2 diagnostics recorded");
//! ```

use std::sync::atomic::{AtomicBool, Ordering};

mod format;
mod messages;

pub use format::{
    format_duration, is_structural, print_diagnostics, print_plan, print_report, print_statistics,
    render_plan, render_report,
};
pub use messages::{error, info, success, warning};

static COLORS: AtomicBool = AtomicBool::new(true);

/// Check if color output should be enabled.
///
/// Respects NO_COLOR and FORCE_COLOR environment variables, falls back to
/// terminal capability detection.
pub fn should_use_color() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if std::env::var_os("FORCE_COLOR").is_some() {
        return true;
    }
    console::user_attended_stderr()
}

/// Initialize color support. Call once from `main` before printing.
pub fn init_colors(no_color: bool) {
    let enabled = !no_color && should_use_color();
    COLORS.store(enabled, Ordering::Relaxed);
    console::set_colors_enabled(enabled);
    console::set_colors_enabled_stderr(enabled);
}

pub(crate) fn colors_enabled() -> bool {
    COLORS.load(Ordering::Relaxed)
}
