//! Live transfer progress rendering.
//!
//! One progress line per active transfer, single writer: only the fetch
//! engine driving the transfer updates its line. Fields left to right:
//! channel label, spinner, elapsed time, transfer rate, bytes, the
//! scrolling target indicator and a free-text status message.

use std::borrow::Cow;
use std::time::Duration;

use console::Style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::download::TransferTask;
use crate::output::target::TargetIndicator;

/// Steady tick interval; keeps spinner and indicator moving between chunks.
const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Pulse glyph scrolled across the target filename.
const PULSE: &str = "|=|";

/// Template when the server reported a total size.
const TEMPLATE_SIZED: &str =
    "{prefix:.magenta} {spinner:.yellow} | {elapsed_precise} | {bytes_per_sec} | {bytes}/{total_bytes} | {target} | {msg:.red}";

/// Template for indeterminate totals: bytes only, never a percentage.
const TEMPLATE_INDETERMINATE: &str =
    "{prefix:.magenta} {spinner:.yellow} | {elapsed_precise} | {bytes_per_sec} | {bytes} | {target} | {msg:.red}";

/// Handle for the progress line of one transfer.
pub struct TransferBar {
    bar: ProgressBar,
}

impl TransferBar {
    /// Open a progress line for the given task.
    ///
    /// A hidden bar is returned when `visible` is false; all updates
    /// become no-ops without changing the call sites.
    pub fn open(task: &TransferTask, visible: bool) -> Self {
        let bar = if !visible {
            ProgressBar::hidden()
        } else {
            match task.expected_size {
                Some(total) => ProgressBar::new(total),
                None => ProgressBar::no_length(),
            }
        };

        let target_text = task
            .destination_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let indicator = TargetIndicator::new(target_text, PULSE)
            .with_styles(Style::new().magenta(), Style::new().green().bold());

        let template = if task.expected_size.is_some() {
            TEMPLATE_SIZED
        } else {
            TEMPLATE_INDETERMINATE
        };
        bar.set_style(
            ProgressStyle::with_template(template)
                .unwrap()
                .with_key("target", indicator),
        );
        bar.set_prefix(task.label.clone());
        bar.enable_steady_tick(TICK_INTERVAL);

        Self { bar }
    }

    /// Advance the byte counter by a chunk's length.
    pub fn advance(&self, delta: u64) {
        self.bar.inc(delta);
    }

    /// Update the free-text status message.
    pub fn set_message(&self, message: impl Into<Cow<'static, str>>) {
        self.bar.set_message(message);
    }

    /// Finalize the line: freeze the total at the bytes actually received,
    /// swap in the terminal message and stop the animation.
    pub fn finish(&self, final_message: impl Into<Cow<'static, str>>) {
        self.bar.set_length(self.bar.position());
        self.bar.set_message(final_message);
        self.bar.finish();
    }

    /// Leave the line as-is for an aborted transfer.
    pub fn abandon(&self) {
        self.bar.abandon();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::path::PathBuf;
    use url::Url;

    fn task() -> TransferTask {
        TransferTask::new(
            "L1-Energy".to_string(),
            Url::parse("http://powermeter.fritz.box/emeter/0/em_data.csv").unwrap(),
            PathBuf::from("L1-em_data.csv"),
        )
    }

    #[test]
    fn test_advance_accumulates_position() {
        let bar = TransferBar::open(&task(), false);
        bar.set_message("retrieving data...");
        bar.advance(1000);
        bar.advance(24);
        assert_eq!(bar.bar.position(), 1024);
        assert_eq!(bar.bar.message(), "retrieving data...");
    }

    #[test]
    fn test_finish_freezes_total_at_received_bytes() {
        let bar = TransferBar::open(&task(), false);
        bar.advance(5678);
        bar.finish("we are done");
        assert!(bar.bar.is_finished());
        assert_eq!(bar.bar.length(), Some(5678));
        assert_eq!(bar.bar.message(), "we are done");
    }
}
