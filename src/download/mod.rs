//! Download module for channel CSV transfers.
//!
//! This module provides:
//! - Transfer task state tracking
//! - The streaming fetch engine with atomic replace-on-success

pub mod fetcher;
pub mod task;

pub use fetcher::fetch_channel;
pub use task::{TaskStatus, TransferTask};
