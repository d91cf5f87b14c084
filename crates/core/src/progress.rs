//! Progress Reporting
//!
//! Capability interface through which long-running work (such as a resource
//! rescan) reports progress and asks questions. Hosts implement it for their
//! own UI; implementations must accept calls from any thread and do their own
//! marshaling to a UI thread if they have one.

use std::sync::atomic::{AtomicU32, Ordering};
use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Progress and prompt facade used by background tasks
pub trait ProgressUiProvider: Send + Sync {
    /// Whether the user asked to stop the current task
    fn is_cancel_requested(&self) -> bool;

    /// Set the description of the current step
    fn report_description(&self, description: &str);

    /// Set the final result text of the task
    fn report_result(&self, result: &str);

    /// Set the maximum value of the progress range
    fn set_progress_max(&self, max: u32);

    /// Set the current progress value, clamped to `max - 1`
    fn report_progress(&self, value: u32);

    /// Current progress value
    fn progress(&self) -> u32;

    /// Ask a yes/no question; returns true for yes
    fn confirm(&self, title: &str, message: &str) -> bool;
}

/// Headless provider that reports through `tracing`
pub struct LogProgress {
    max: AtomicU32,
    value: AtomicU32,
    description: Mutex<String>,
    result: Mutex<Option<String>>,
    cancel: CancellationToken,
    confirm_answer: bool,
}

impl LogProgress {
    /// Create a provider whose prompts are answered with `confirm_answer`
    pub fn new(confirm_answer: bool) -> Self {
        Self {
            max: AtomicU32::new(0),
            value: AtomicU32::new(0),
            description: Mutex::new(String::new()),
            result: Mutex::new(None),
            cancel: CancellationToken::new(),
            confirm_answer,
        }
    }

    /// Token that cancels the task this provider reports for
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Request cancellation
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Last description reported
    pub fn description(&self) -> String {
        self.description.lock().clone()
    }

    /// Result reported at the end of the task, if any
    pub fn result(&self) -> Option<String> {
        self.result.lock().clone()
    }

    /// Maximum of the progress range
    pub fn max(&self) -> u32 {
        self.max.load(Ordering::Relaxed)
    }
}

impl Default for LogProgress {
    fn default() -> Self {
        Self::new(false)
    }
}

impl ProgressUiProvider for LogProgress {
    fn is_cancel_requested(&self) -> bool {
        self.cancel.is_cancelled()
    }

    fn report_description(&self, description: &str) {
        debug!("{}", description);
        *self.description.lock() = description.to_string();
    }

    fn report_result(&self, result: &str) {
        info!("{}", result);
        *self.result.lock() = Some(result.to_string());
    }

    fn set_progress_max(&self, max: u32) {
        self.max.store(max, Ordering::Relaxed);
        self.value.store(0, Ordering::Relaxed);
    }

    fn report_progress(&self, value: u32) {
        let max = self.max.load(Ordering::Relaxed);
        let clamped = if max == 0 { 0 } else { value.min(max - 1) };
        self.value.store(clamped, Ordering::Relaxed);
    }

    fn progress(&self) -> u32 {
        self.value.load(Ordering::Relaxed)
    }

    fn confirm(&self, title: &str, message: &str) -> bool {
        info!("{}: {} -> {}", title, message, if self.confirm_answer { "yes" } else { "no" });
        self.confirm_answer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_clamped() {
        let progress = LogProgress::default();
        progress.set_progress_max(10);
        progress.report_progress(4);
        assert_eq!(progress.progress(), 4);

        progress.report_progress(25);
        assert_eq!(progress.progress(), 9);

        progress.set_progress_max(0);
        progress.report_progress(3);
        assert_eq!(progress.progress(), 0);
    }

    #[test]
    fn test_cancel_from_other_thread() {
        let progress = std::sync::Arc::new(LogProgress::default());
        assert!(!progress.is_cancel_requested());

        let token = progress.cancel_token();
        std::thread::spawn(move || token.cancel()).join().unwrap();

        assert!(progress.is_cancel_requested());
    }

    #[test]
    fn test_description_and_confirm() {
        let progress = LogProgress::new(true);
        progress.report_description("Scanning values-fr");
        progress.report_result("12 resources");

        assert_eq!(progress.description(), "Scanning values-fr");
        assert_eq!(progress.result().as_deref(), Some("12 resources"));
        assert!(progress.confirm("Rescan", "Discard pending changes?"));
    }
}
