//! Terminal UI utilities for status messages and formatted output.
//!
//! # Examples
//!
//! ```no_run
//! use sheaf_cli::ui;
//!
//! ui::info("Processing stylesheets...");
//! ui::success("Done");
//! ```

mod format;
mod messages;

pub use format::{SummaryEntry, format_duration, format_size, print_css_summary};
pub use messages::{error, info, success, warning};

use owo_colors::{OwoColorize, Style};
use std::fmt::Display;
use std::sync::atomic::{AtomicBool, Ordering};

static COLORS: AtomicBool = AtomicBool::new(true);

/// Check if running in a CI environment.
pub fn is_ci() -> bool {
    ["CI", "GITHUB_ACTIONS", "GITLAB_CI", "CIRCLECI", "TRAVIS"]
        .iter()
        .any(|var| std::env::var_os(var).is_some())
}

/// Apply `--no-color`, `NO_COLOR` and `FORCE_COLOR` to every colored message.
pub fn init_colors(no_color: bool) {
    let enabled = !no_color && crate::logger::should_use_colors();
    COLORS.store(enabled, Ordering::Relaxed);
}

pub fn colors_enabled() -> bool {
    COLORS.load(Ordering::Relaxed)
}

/// Render `text` with `style`, or plain when colors are off
pub(crate) fn paint(text: impl Display, style: Style) -> String {
    if colors_enabled() {
        text.style(style).to_string()
    } else {
        text.to_string()
    }
}

/// Clear the terminal when requested and stderr is an interactive terminal.
///
/// Returns whether the screen was cleared.
pub fn clear_screen(requested: bool) -> bool {
    if !requested || is_ci() || !console::user_attended_stderr() {
        return false;
    }

    match console::Term::stderr().clear_screen() {
        Ok(()) => true,
        Err(e) => {
            tracing::debug!(error = %e, "failed to clear screen");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_screen_not_requested() {
        assert!(!clear_screen(false));
    }

    #[test]
    fn test_paint_plain_without_colors() {
        init_colors(true);
        assert!(!colors_enabled());
        assert_eq!(paint("ok", Style::new().green().bold()), "ok");
    }
}
