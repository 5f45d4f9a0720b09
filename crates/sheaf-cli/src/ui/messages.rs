//! Status message functions for terminal output.

use owo_colors::Style;

use super::paint;

/// Print a success message to stderr.
///
/// ```no_run
/// use sheaf_cli::ui::success;
///
/// success("Processed 4 stylesheets");
/// ```
pub fn success(message: &str) {
    eprintln!("{} {}", paint("✓", Style::new().green().bold()), message);
}

/// Print an info message to stderr.
pub fn info(message: &str) {
    eprintln!("{} {}", paint("ℹ", Style::new().blue().bold()), message);
}

/// Print a warning message to stderr.
pub fn warning(message: &str) {
    eprintln!(
        "{} {}",
        paint("⚠", Style::new().yellow().bold()),
        paint(message, Style::new().yellow())
    );
}

/// Print an error message to stderr.
pub fn error(message: &str) {
    eprintln!(
        "{} {}",
        paint("✗", Style::new().red().bold()),
        paint(message, Style::new().red())
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_messages() {
        success("Success message");
        info("Info message");
        warning("Warning message");
        error("Error message");
    }
}
