//! Progress spinner shown while an RPC is in flight

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Create a spinner with the given message
///
/// Returns `None` if quiet mode is enabled.
pub fn create_spinner(message: &str, quiet: bool) -> Option<ProgressBar> {
    if quiet {
        return None;
    }
    let style = ProgressStyle::default_spinner()
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
        .template("{spinner:.blue} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(style);
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    Some(spinner)
}

/// Clear the spinner so the rendered output starts on a clean line
pub fn finish_spinner(spinner: Option<ProgressBar>) {
    if let Some(s) = spinner {
        s.finish_and_clear();
    }
}
