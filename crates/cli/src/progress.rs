//! Progress indicators
//!
//! Spinners go to stderr and are hidden when stderr is not a terminal or the
//! output format is not text, so piped JSON stays clean.

use crate::output::OutputFormat;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Create a spinner for indeterminate progress
pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
        .template("{spinner:.blue} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

/// Spinner for `format`; a hidden bar when nobody would see it
pub fn spinner_for(format: OutputFormat, message: &str) -> ProgressBar {
    if format.is_text() && console::Term::stderr().is_term() {
        spinner(message)
    } else {
        ProgressBar::hidden()
    }
}

/// Finish a progress bar with a success message
pub fn finish_success(pb: &ProgressBar, message: &str) {
    pb.finish_with_message(format!("✓ {message}"));
}

/// Finish a progress bar with an error message
pub fn finish_error(pb: &ProgressBar, message: &str) {
    pb.finish_with_message(format!("✗ {message}"));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spinner_creation() {
        let pb = spinner("Searching...");
        finish_success(&pb, "done");
        assert!(pb.is_finished());
    }

    #[test]
    fn test_json_spinner_is_hidden() {
        let pb = spinner_for(OutputFormat::Json, "Searching...");
        assert!(pb.is_hidden());
        finish_error(&pb, "failed");
    }
}
