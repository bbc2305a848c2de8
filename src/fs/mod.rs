//! File system utilities.
//!
//! Provides:
//! - Backup and temp path derivation for atomic replacement
//! - Filename sanitizing

pub mod paths;

pub use paths::{backup_path, sanitize_filename, temp_path};
