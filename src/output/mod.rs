//! Output module for console output and progress.
//!
//! Provides:
//! - Colored console output
//! - The live transfer progress line
//! - The scrolling target indicator
//! - Run statistics reporting

pub mod console;
pub mod progress;
pub mod stats;
pub mod target;

pub use console::{
    print_banner, print_config_summary, print_error, print_info, print_success, print_warning,
};
pub use progress::TransferBar;
pub use stats::{print_run_stats, RunStats};
pub use target::TargetIndicator;
