//! Run statistics reporting.

use console::style;
use indicatif::HumanBytes;

use crate::download::TaskStatus;

/// Outcome counters across one run.
#[derive(Debug, Default)]
pub struct RunStats {
    pub finished: u64,
    pub failed: u64,
    pub cancelled: u64,
    pub bytes_transferred: u64,
}

impl RunStats {
    /// Record the terminal outcome of one transfer.
    pub fn record(&mut self, status: TaskStatus, bytes: u64) {
        match status {
            TaskStatus::Finished => self.finished += 1,
            TaskStatus::Cancelled => self.cancelled += 1,
            TaskStatus::Failed => self.failed += 1,
            // A transfer always reaches a terminal state before recording
            TaskStatus::Pending | TaskStatus::InProgress => self.failed += 1,
        }
        self.bytes_transferred += bytes;
    }

    pub fn total(&self) -> u64 {
        self.finished + self.failed + self.cancelled
    }
}

/// Print statistics for the whole run.
pub fn print_run_stats(stats: &RunStats) {
    println!();
    println!("{}", style("═".repeat(50)).dim());
    println!("{}", style("Run Statistics:").bold());
    println!("  Channels:   {}", stats.total());
    println!("  Downloaded: {}", style(stats.finished).green());
    if stats.failed > 0 {
        println!("  Failed:     {}", style(stats.failed).red());
    }
    if stats.cancelled > 0 {
        println!("  Cancelled:  {}", style(stats.cancelled).red());
    }
    println!("  Received:   {}", HumanBytes(stats.bytes_transferred));
    println!("{}", style("═".repeat(50)).dim());
}
