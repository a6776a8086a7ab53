//! Terminal output utilities
//!
//! Provides consistent formatting for CLI output.

use clap::ValueEnum;
use owo_colors::OwoColorize;

/// How command results are written to stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable, colored when stdout is a terminal
    #[default]
    Text,
    /// Pretty-printed JSON, nothing else on stdout
    Json,
}

impl OutputFormat {
    /// Whether decorations (spinners, headers) should be shown
    #[must_use]
    pub fn is_text(self) -> bool {
        self == OutputFormat::Text
    }
}

/// Status message helpers
pub struct Status;

impl Status {
    /// Print an error message
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Print a warning message
    pub fn warning(message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print an info message
    pub fn info(message: &str) {
        println!("{} {}", "ℹ".blue(), message);
    }

    /// Print a header
    pub fn header(message: &str) {
        println!();
        println!("{}", message.bold());
        println!("{}", "─".repeat(console::measure_text_width(message)));
    }
}

/// Format a duration for display
pub fn format_duration(duration: std::time::Duration) -> String {
    let secs = duration.as_secs_f32();
    if secs < 1.0 {
        format!("{:.0}ms", secs * 1000.0)
    } else if secs < 60.0 {
        format!("{secs:.1}s")
    } else {
        let mins = (secs / 60.0).floor();
        let remaining_secs = secs % 60.0;
        format!("{mins}m {remaining_secs:.0}s")
    }
}

/// Format a count with singular/plural
pub fn format_count(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{count} {singular}")
    } else {
        format!("{count} {plural}")
    }
}

/// Format a nutrient amount with one decimal and its unit
pub fn format_amount(value: f64, unit: &str) -> String {
    format!("{value:.1} {unit}")
}

/// Shorten `text` to `width` columns, marking the cut with an ellipsis
pub fn fit_width(text: &str, width: usize) -> String {
    console::truncate_str(text, width, "…").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_format_duration_ms() {
        let d = Duration::from_millis(500);
        assert_eq!(format_duration(d), "500ms");
    }

    #[test]
    fn test_format_duration_secs() {
        let d = Duration::from_secs_f32(5.5);
        assert_eq!(format_duration(d), "5.5s");
    }

    #[test]
    fn test_format_duration_mins() {
        let d = Duration::from_secs(125);
        assert_eq!(format_duration(d), "2m 5s");
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(1, "result", "results"), "1 result");
        assert_eq!(format_count(0, "result", "results"), "0 results");
        assert_eq!(format_count(5, "page", "pages"), "5 pages");
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(46.5, "g"), "46.5 g");
        assert_eq!(format_amount(74.0, "mg"), "74.0 mg");
    }

    #[test]
    fn test_fit_width() {
        assert_eq!(fit_width("Banana", 20), "Banana");
        let cut = fit_width("Chicken, broilers or fryers, breast, meat only, cooked, roasted", 20);
        assert_eq!(console::measure_text_width(&cut), 20);
        assert!(cut.ends_with('…'));
    }

    #[test]
    fn test_output_format_values() {
        assert_eq!(OutputFormat::from_str("json", true).unwrap(), OutputFormat::Json);
        assert!(OutputFormat::default().is_text());
    }
}
