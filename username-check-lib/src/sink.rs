//! Concurrency-safe result persistence.
//!
//! One append target per non-Error category, each behind its own async
//! mutex so unrelated categories never serialize against each other.
//! The `Error` category has no file: those results exist only in the
//! aggregate counts.

use crate::error::UsernameCheckError;
use crate::types::{Category, CheckConfig};
use std::path::{Path, PathBuf};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

/// Durable append targets for classified usernames.
///
/// Created once per run, before any concurrent work begins; creation
/// truncates all three files, establishing a clean run boundary. The
/// sink owns the file handles for the run's lifetime.
pub struct ResultSink {
    available: CategoryStream,
    blacklisted: CategoryStream,
    taken: CategoryStream,
}

/// One output stream plus its lock. The lock is held only for the
/// duration of a single append-and-flush.
struct CategoryStream {
    path: PathBuf,
    file: Mutex<File>,
}

impl CategoryStream {
    async fn create(path: &Path) -> Result<Self, UsernameCheckError> {
        // File::create truncates any previous contents.
        let file = File::create(path).await.map_err(|e| {
            UsernameCheckError::file_error(
                path.to_string_lossy(),
                format!("Failed to create output file: {}", e),
            )
        })?;
        Ok(Self {
            path: path.to_path_buf(),
            file: Mutex::new(file),
        })
    }

    async fn append_line(&self, username: &str) -> Result<(), UsernameCheckError> {
        let mut file = self.file.lock().await;
        let line = format!("{}\n", username);
        file.write_all(line.as_bytes()).await.map_err(|e| {
            UsernameCheckError::file_error(
                self.path.to_string_lossy(),
                format!("Failed to write result: {}", e),
            )
        })?;
        file.flush().await.map_err(|e| {
            UsernameCheckError::file_error(
                self.path.to_string_lossy(),
                format!("Failed to flush result: {}", e),
            )
        })?;
        Ok(())
    }
}

impl ResultSink {
    /// Open (and truncate) the output files named in `config`.
    pub async fn create(config: &CheckConfig) -> Result<Self, UsernameCheckError> {
        Ok(Self {
            available: CategoryStream::create(&config.output_available).await?,
            blacklisted: CategoryStream::create(&config.output_blacklisted).await?,
            taken: CategoryStream::create(&config.output_taken).await?,
        })
    }

    /// Append `username` to the stream for `category`.
    ///
    /// `Category::Error` produces no file line and always succeeds.
    /// A write failure is non-fatal to the run: the caller logs it,
    /// drops the line, and keeps the item counted.
    pub async fn record(
        &self,
        username: &str,
        category: Category,
    ) -> Result<(), UsernameCheckError> {
        match category {
            Category::Available => self.available.append_line(username).await,
            Category::Blacklisted => self.blacklisted.append_line(username).await,
            Category::Taken => self.taken.append_line(username).await,
            Category::Error => Ok(()),
        }
    }

    /// Paths of the three output files, for end-of-run reporting.
    pub fn paths(&self) -> [&Path; 3] {
        [
            &self.available.path,
            &self.blacklisted.path,
            &self.taken.path,
        ]
    }
}
