//! Directory scanner port
//!
//! Filesystem access needed by the directory watcher, kept behind a trait so
//! the watch loop can be driven by an in-memory fake in tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to list {path}: {message}")]
    List { path: PathBuf, message: String },

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Size and timestamps of a file
#[derive(Debug, Clone, PartialEq)]
pub struct FileStat {
    pub size: u64,
    pub modified: Option<DateTime<Utc>>,
    pub created: Option<DateTime<Utc>>,
}

#[async_trait]
pub trait DirectoryScanner: Send + Sync {
    /// Create `dir` (and parents) if missing. Returns true when it was created.
    async fn ensure_dir(&self, dir: &Path) -> Result<bool, ScanError>;

    /// Entries directly in `dir` whose name matches `*.*`
    async fn list_files(&self, dir: &Path) -> Result<Vec<PathBuf>, ScanError>;

    async fn stat(&self, path: &Path) -> Result<FileStat, ScanError>;

    /// File content as UTF-8 text
    async fn read_to_string(&self, path: &Path) -> Result<String, ScanError>;
}
