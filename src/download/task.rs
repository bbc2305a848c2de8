//! Transfer task state tracking.

use std::path::PathBuf;

use url::Url;

/// Lifecycle state of a transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    Pending,
    InProgress,
    Finished,
    Cancelled,
    Failed,
}

impl TaskStatus {
    /// Terminal states accept no further transitions or byte advances.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            TaskStatus::Finished | TaskStatus::Cancelled | TaskStatus::Failed
        )
    }
}

/// One in-flight or completed download.
///
/// Created by the orchestrator per configured channel and mutated only by
/// the fetch engine while the transfer runs.
#[derive(Debug)]
pub struct TransferTask {
    /// Human-readable channel name, display only.
    pub label: String,

    /// Fully-resolved source URL.
    pub source_url: Url,

    /// Final on-disk path.
    pub destination_path: PathBuf,

    /// Total bytes if the server reported a Content-Length.
    pub expected_size: Option<u64>,

    transferred_bytes: u64,
    status: TaskStatus,
}

impl TransferTask {
    /// Create a new pending task.
    pub fn new(label: String, source_url: Url, destination_path: PathBuf) -> Self {
        Self {
            label,
            source_url,
            destination_path,
            expected_size: None,
            transferred_bytes: 0,
            status: TaskStatus::Pending,
        }
    }

    /// Bytes received so far. Monotone, never decreases.
    pub fn transferred_bytes(&self) -> u64 {
        self.transferred_bytes
    }

    pub fn status(&self) -> TaskStatus {
        self.status
    }

    /// Mark the task as running.
    pub fn start(&mut self) {
        if self.status == TaskStatus::Pending {
            self.status = TaskStatus::InProgress;
        }
    }

    /// Advance the byte counter. Ignored once a terminal state is reached.
    pub fn advance(&mut self, delta: u64) {
        if !self.status.is_terminal() {
            self.transferred_bytes += delta;
        }
    }

    /// Transition into a terminal state. The first terminal transition wins.
    pub fn complete(&mut self, status: TaskStatus) {
        debug_assert!(status.is_terminal());
        if !self.status.is_terminal() {
            self.status = status;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task() -> TransferTask {
        TransferTask::new(
            "L1-Energy".to_string(),
            Url::parse("http://powermeter.fritz.box/emeter/0/em_data.csv").unwrap(),
            PathBuf::from("L1-em_data.csv"),
        )
    }

    #[test]
    fn test_advance_accumulates() {
        let mut t = task();
        t.start();
        t.advance(1000);
        t.advance(24);
        assert_eq!(t.transferred_bytes(), 1024);
        assert_eq!(t.status(), TaskStatus::InProgress);
    }

    #[test]
    fn test_terminal_state_ignores_advances() {
        let mut t = task();
        t.start();
        t.advance(500);
        t.complete(TaskStatus::Finished);
        t.advance(500);
        assert_eq!(t.transferred_bytes(), 500);
        assert_eq!(t.status(), TaskStatus::Finished);
    }

    #[test]
    fn test_first_terminal_transition_wins() {
        let mut t = task();
        t.start();
        t.complete(TaskStatus::Cancelled);
        t.complete(TaskStatus::Failed);
        assert_eq!(t.status(), TaskStatus::Cancelled);
    }

    #[test]
    fn test_start_only_from_pending() {
        let mut t = task();
        t.complete(TaskStatus::Failed);
        t.start();
        assert_eq!(t.status(), TaskStatus::Failed);
    }
}
