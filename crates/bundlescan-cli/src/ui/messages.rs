//! Status message functions for terminal output.

use owo_colors::{OwoColorize, Style};

/// `style` when colors are enabled, otherwise a plain style.
pub(crate) fn paint(style: Style) -> Style {
    if super::colors_enabled() {
        style
    } else {
        Style::new()
    }
}

/// Print a success message to stderr.
pub fn success(message: &str) {
    eprintln!("{} {}", "✓".style(paint(Style::new().green().bold())), message);
}

/// Print an info message to stderr.
pub fn info(message: &str) {
    eprintln!("{} {}", "ℹ".style(paint(Style::new().blue().bold())), message);
}

/// Print a warning message to stderr.
pub fn warning(message: &str) {
    eprintln!(
        "{} {}",
        "⚠".style(paint(Style::new().yellow().bold())),
        message.style(paint(Style::new().yellow()))
    );
}

/// Print an error message to stderr.
pub fn error(message: &str) {
    eprintln!(
        "{} {}",
        "✗".style(paint(Style::new().red().bold())),
        message.style(paint(Style::new().red()))
    );
}
