use std::time::{Duration, Instant};

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Spinner showing the current verification status line.
pub struct VerifyProgress {
    bar: ProgressBar,
    start_time: Instant,
}

impl VerifyProgress {
    pub fn new(quiet: bool) -> Self {
        let bar = if quiet { ProgressBar::hidden() } else { ProgressBar::new_spinner() };
        if let Ok(spinner) = ProgressStyle::default_spinner().template("  {spinner:.magenta} {msg} {elapsed:.dim}") {
            bar.set_style(spinner);
        }
        bar.enable_steady_tick(Duration::from_millis(120));
        Self {
            bar,
            start_time: Instant::now(),
        }
    }

    pub fn set_status(&self, message: &str) {
        self.bar.set_message(message.to_string());
    }

    pub fn finish_success(&self) {
        self.bar.finish_and_clear();
        if !self.bar.is_hidden() {
            eprintln!(
                "  {} Verified in {}",
                style("✓").green(),
                format_elapsed(self.start_time.elapsed().as_millis() as u64)
            );
        }
    }

    /// Clear the spinner; the caller reports the error.
    pub fn abandon(&self) {
        self.bar.finish_and_clear();
    }
}

fn format_elapsed(ms: u64) -> String {
    let secs = ms / 1000;
    let mins = secs / 60;
    let remaining_secs = secs % 60;
    if mins > 0 {
        format!("{}m{}s", mins, remaining_secs)
    } else {
        format!("{}s", secs)
    }
}
