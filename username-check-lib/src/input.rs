//! Input list loading.
//!
//! Reads the newline-delimited username file, trimming whitespace and
//! discarding empty lines. A missing or unreadable file is a run-level
//! abort: it surfaces before any network or output-file activity.

use crate::error::UsernameCheckError;
use std::path::Path;

/// Load usernames from a newline-delimited text file.
///
/// Whitespace is stripped from each line and empty lines are skipped.
/// Duplicates are kept: they are independent work items.
///
/// # Errors
///
/// Returns `FileError` if the file does not exist or cannot be read.
pub async fn load_usernames<P: AsRef<Path>>(
    path: P,
) -> Result<Vec<String>, UsernameCheckError> {
    let path = path.as_ref();

    let contents = tokio::fs::read_to_string(path).await.map_err(|e| {
        UsernameCheckError::file_error(
            path.to_string_lossy(),
            format!("Failed to read usernames file: {}", e),
        )
    })?;

    let usernames: Vec<String> = contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect();

    tracing::debug!(count = usernames.len(), path = %path.display(), "loaded usernames");

    Ok(usernames)
}
