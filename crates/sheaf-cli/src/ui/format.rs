//! Formatting utilities for sizes, durations, and processing summaries.

use console::Term;
use owo_colors::Style;
use std::time::Duration;

use super::paint;

/// One processed stylesheet in the summary table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryEntry {
    /// Output path relative to the output directory
    pub name: String,
    pub input_bytes: u64,
    pub output_bytes: u64,
    /// Directives and comments removed from the document
    pub removed: usize,
    pub duration: Duration,
}

/// Format file size in human-readable format.
///
/// ```
/// use sheaf_cli::ui::format_size;
///
/// assert_eq!(format_size(0), "0 B");
/// assert_eq!(format_size(500), "500 B");
/// assert_eq!(format_size(1024), "1.00 KB");
/// assert_eq!(format_size(1_048_576), "1.00 MB");
/// ```
pub fn format_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];

    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut size = bytes as f64;
    let mut unit_idx = 0;

    while size >= 1024.0 && unit_idx < UNITS.len() - 1 {
        size /= 1024.0;
        unit_idx += 1;
    }

    if unit_idx == 0 {
        format!("{} {}", size as u64, UNITS[unit_idx])
    } else {
        format!("{:.2} {}", size, UNITS[unit_idx])
    }
}

/// Format duration in human-readable format.
///
/// ```
/// use std::time::Duration;
/// use sheaf_cli::ui::format_duration;
///
/// assert_eq!(format_duration(Duration::from_millis(50)), "50ms");
/// assert_eq!(format_duration(Duration::from_millis(1500)), "1.50s");
/// assert_eq!(format_duration(Duration::from_secs(90)), "1m 30s");
/// ```
pub fn format_duration(duration: Duration) -> String {
    let total_ms = duration.as_millis();

    if total_ms < 1000 {
        format!("{}ms", total_ms)
    } else if total_ms < 60_000 {
        format!("{:.2}s", duration.as_secs_f64())
    } else {
        let secs = duration.as_secs();
        format!("{}m {}s", secs / 60, secs % 60)
    }
}

/// Print a table of processed stylesheets to stderr.
pub fn print_css_summary(entries: &[SummaryEntry], elapsed: Duration) {
    let term = Term::stderr();
    let width = (term.size().1 as usize).clamp(20, 80);

    eprintln!("\n{}", paint("CSS Summary", Style::new().bold().underline()));
    eprintln!("{}", "─".repeat(width));

    for entry in entries {
        let removed = if entry.removed > 0 {
            format!(" -{}", entry.removed)
        } else {
            String::new()
        };

        eprintln!(
            "  {} {} {} {}{}",
            paint("▸", Style::new().blue()),
            paint(&entry.name, Style::new().bright_white().bold()),
            paint(format_size(entry.output_bytes), Style::new().dimmed()),
            paint(
                format!("({})", format_duration(entry.duration)),
                Style::new().dimmed()
            ),
            paint(removed, Style::new().yellow())
        );
    }

    eprintln!("{}", "─".repeat(width));

    let input: u64 = entries.iter().map(|e| e.input_bytes).sum();
    let output: u64 = entries.iter().map(|e| e.output_bytes).sum();

    eprintln!(
        "  {} {} → {} in {}",
        paint("Total:", Style::new().bold()),
        format_size(input),
        paint(format_size(output), Style::new().green()),
        paint(format_duration(elapsed), Style::new().green())
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size_bytes() {
        assert_eq!(format_size(1), "1 B");
        assert_eq!(format_size(1023), "1023 B");
    }

    #[test]
    fn test_format_size_larger_units() {
        assert_eq!(format_size(1536), "1.50 KB");
        assert_eq!(format_size(1_572_864), "1.50 MB");
        assert_eq!(format_size(2_147_483_648), "2.00 GB");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_millis(0)), "0ms");
        assert_eq!(format_duration(Duration::from_millis(999)), "999ms");
        assert_eq!(format_duration(Duration::from_millis(1000)), "1.00s");
        assert_eq!(format_duration(Duration::from_secs(125)), "2m 5s");
    }

    #[test]
    fn test_print_css_summary() {
        let entries = vec![
            SummaryEntry {
                name: "main.css".to_string(),
                input_bytes: 2_048,
                output_bytes: 1_900,
                removed: 1,
                duration: Duration::from_millis(3),
            },
            SummaryEntry {
                name: "theme/dark.css".to_string(),
                input_bytes: 512,
                output_bytes: 512,
                removed: 0,
                duration: Duration::from_millis(1),
            },
        ];

        print_css_summary(&entries, Duration::from_millis(5));
        print_css_summary(&[], Duration::ZERO);
    }
}
