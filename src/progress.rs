//! Terminal progress reporting
//!
//! Shows scan progress as an `indicatif` bar on stderr. Prompts are answered
//! from configuration since the CLI never blocks on input.

use indicatif::{ProgressBar, ProgressStyle};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use r_droid_res_core::ProgressUiProvider;

/// Progress bar backed provider
pub struct TerminalProgress {
    bar: ProgressBar,
    cancel: CancellationToken,
    confirm_answer: bool,
}

impl TerminalProgress {
    /// Create a provider; `hidden` suppresses drawing (e.g. for JSON output)
    pub fn new(confirm_answer: bool, hidden: bool) -> Self {
        let bar = if hidden {
            ProgressBar::hidden()
        } else {
            ProgressBar::new(0)
        };
        let style = ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        bar.set_style(style);

        Self {
            bar,
            cancel: CancellationToken::new(),
            confirm_answer,
        }
    }

    /// Cancel the running scan on Ctrl-C
    pub fn cancel_on_ctrl_c(&self) {
        let token = self.cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupted, cancelling scan");
                token.cancel();
            }
        });
    }

    /// Remove the bar from the terminal
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl ProgressUiProvider for TerminalProgress {
    fn is_cancel_requested(&self) -> bool {
        self.cancel.is_cancelled()
    }

    fn report_description(&self, description: &str) {
        self.bar.set_message(description.to_string());
    }

    fn report_result(&self, result: &str) {
        self.bar.set_message(result.to_string());
        info!("{}", result);
    }

    fn set_progress_max(&self, max: u32) {
        self.bar.set_length(u64::from(max));
        self.bar.set_position(0);
    }

    fn report_progress(&self, value: u32) {
        let max = self.bar.length().unwrap_or(0);
        self.bar.set_position(u64::from(value).min(max.saturating_sub(1)));
    }

    fn progress(&self) -> u32 {
        u32::try_from(self.bar.position()).unwrap_or(u32::MAX)
    }

    fn confirm(&self, title: &str, message: &str) -> bool {
        self.bar.suspend(|| {
            warn!("{}: {} ({})", title, message, if self.confirm_answer { "yes" } else { "no" });
        });
        self.confirm_answer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hidden_progress() {
        let progress = TerminalProgress::new(true, true);
        progress.set_progress_max(3);
        progress.report_progress(1);
        assert_eq!(progress.progress(), 1);

        progress.report_progress(3);
        assert_eq!(progress.progress(), 2);
        assert!(progress.confirm("Invalid resource folder", "Skip it?"));
        assert!(!progress.is_cancel_requested());
    }
}
