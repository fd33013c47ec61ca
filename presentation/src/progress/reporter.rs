//! Progress reporting for generation and translation requests

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use qgen_application::ports::progress::GenerationProgress;
use qgen_domain::QuotaCheck;
use std::sync::Mutex;
use std::time::Duration;

/// Spinner shown while the generator is working
pub struct ProgressReporter {
    spinner: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg} {elapsed:.dim}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl GenerationProgress for ProgressReporter {
    fn on_quota_checked(&self, check: &QuotaCheck) {
        if check.warning {
            eprintln!("{} {}", "!".yellow().bold(), check.reason);
        }
    }

    fn on_request_start(&self, label: &str) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::spinner_style());
        pb.set_message(format!("{}...", label));
        pb.enable_steady_tick(Duration::from_millis(100));

        if let Ok(mut spinner) = self.spinner.lock() {
            *spinner = Some(pb);
        }
    }

    fn on_request_complete(&self, success: bool) {
        let Some(pb) = self.spinner.lock().ok().and_then(|mut s| s.take()) else {
            return;
        };
        if success {
            pb.finish_with_message(format!("{} Response received", "v".green()));
        } else {
            pb.finish_with_message(format!("{} Request failed", "x".red()));
        }
    }

    fn on_questions_added(&self, count: usize) {
        eprintln!("{} Stored {} question(s)", "->".cyan(), count);
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl GenerationProgress for SimpleProgress {
    fn on_quota_checked(&self, check: &QuotaCheck) {
        if check.warning {
            eprintln!("! {}", check.reason);
        }
    }

    fn on_request_start(&self, label: &str) {
        eprintln!("{} {}...", "->".cyan(), label.bold());
    }

    fn on_request_complete(&self, success: bool) {
        if success {
            eprintln!("  {} done", "v".green());
        } else {
            eprintln!("  {} failed", "x".red());
        }
    }
}
