//! Progress indicators for backend requests

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Create a spinner for indeterminate operations
pub fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .expect("Failed to create spinner template")
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

/// Spinner, or a hidden bar when progress display is turned off
pub fn spinner_if(enabled: bool, message: &str) -> ProgressBar {
    if enabled {
        create_spinner(message)
    } else {
        let pb = ProgressBar::hidden();
        pb.set_message(message.to_string());
        pb
    }
}

/// Progress for loading the resource lists into the registry
pub struct FetchProgress {
    pb: ProgressBar,
    total: usize,
    done: usize,
}

impl FetchProgress {
    pub fn new(enabled: bool, total: usize) -> Self {
        Self {
            pb: spinner_if(enabled, "Loading resources"),
            total,
            done: 0,
        }
    }

    pub fn start(&self, resource: &str) {
        self.pb.set_message(format!(
            "[{}/{}] Fetching {}",
            self.done + 1,
            self.total,
            resource
        ));
    }

    pub fn finish_step(&mut self, resource: &str, count: usize) {
        self.done += 1;
        self.pb.println(format!("  ✓ {} {}", count, resource));
    }

    pub fn fail_step(&mut self, resource: &str, error: &str) {
        self.done += 1;
        self.pb.println(format!("  ✗ {}: {}", resource, error));
    }

    pub fn finish(&self) {
        self.pb.finish_and_clear();
    }
}

/// Helper to run a function with a spinner and show result
pub fn with_spinner_result<F, T, E>(
    enabled: bool,
    message: &str,
    success_msg: &str,
    f: F,
) -> Result<T, E>
where
    F: FnOnce() -> Result<T, E>,
    E: std::fmt::Display,
{
    let pb = spinner_if(enabled, message);
    match f() {
        Ok(result) => {
            pb.finish_with_message(format!("✓ {}", success_msg));
            Ok(result)
        }
        Err(e) => {
            pb.finish_with_message(format!("✗ Failed: {}", e));
            Err(e)
        }
    }
}
