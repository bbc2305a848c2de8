//! Destination path handling.
//!
//! A transfer never writes the final path directly: bytes stream into
//! `<dest>.temp` and a pre-existing destination is moved to `<dest>.bak`
//! first. Only a successful transfer renames the temp file into place.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Suffix for the single-generation backup of a pre-existing destination.
const BACKUP_SUFFIX: &str = ".bak";

/// Suffix for the in-flight temp file.
const TEMP_SUFFIX: &str = ".temp";

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(suffix);
    PathBuf::from(name)
}

/// Path a pre-existing destination is moved to before writing.
pub fn backup_path(destination: &Path) -> PathBuf {
    with_suffix(destination, BACKUP_SUFFIX)
}

/// Path the streamed bytes are written to before the atomic rename.
pub fn temp_path(destination: &Path) -> PathBuf {
    with_suffix(destination, TEMP_SUFFIX)
}

/// Sanitize a configured filename, rejecting anything that could escape
/// the data directory.
pub fn sanitize_filename(filename: &str) -> Result<String> {
    let trimmed = filename.trim();

    if trimmed.is_empty() {
        return Err(Error::InvalidFilename("empty filename".to_string()));
    }

    if trimmed.contains('\0') {
        return Err(Error::InvalidFilename(filename.to_string()));
    }

    if trimmed.contains('/') || trimmed.contains('\\') {
        return Err(Error::InvalidFilename(filename.to_string()));
    }

    if trimmed == "." || trimmed == ".." {
        return Err(Error::InvalidFilename(filename.to_string()));
    }

    // Replace characters that are reserved on common filesystems
    let sanitized: String = trimmed
        .chars()
        .map(|c| match c {
            ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c => c,
        })
        .collect();

    Ok(sanitized)
}
