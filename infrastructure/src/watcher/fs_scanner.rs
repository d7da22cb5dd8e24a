//! Filesystem implementation of [`DirectoryScanner`]

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use localcrew_application::{DirectoryScanner, FileStat, ScanError};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Scans a local directory for files whose name contains an extension
#[derive(Debug, Clone, Copy, Default)]
pub struct FsDirectoryScanner;

impl FsDirectoryScanner {
    pub fn new() -> Self {
        Self
    }
}

/// Regular files from glob results, sorted. Bad entries are logged and skipped.
fn collect_files<E: std::fmt::Display>(
    dir: &Path,
    entries: impl IntoIterator<Item = Result<PathBuf, E>>,
) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for entry in entries {
        match entry {
            Ok(path) if path.is_file() => files.push(path),
            Ok(_) => {}
            Err(e) => warn!("Skipping unreadable entry in {}: {}", dir.display(), e),
        }
    }
    files.sort();
    files
}

#[async_trait]
impl DirectoryScanner for FsDirectoryScanner {
    async fn ensure_dir(&self, dir: &Path) -> Result<bool, ScanError> {
        if tokio::fs::metadata(dir).await.is_ok_and(|m| m.is_dir()) {
            return Ok(false);
        }
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|source| ScanError::CreateDir {
                path: dir.to_path_buf(),
                source,
            })?;
        debug!("Created watch directory {}", dir.display());
        Ok(true)
    }

    async fn list_files(&self, dir: &Path) -> Result<Vec<PathBuf>, ScanError> {
        let list_error = |message: String| ScanError::List {
            path: dir.to_path_buf(),
            message,
        };

        let dir_str = dir
            .to_str()
            .ok_or_else(|| list_error("path is not valid UTF-8".to_string()))?;
        let pattern = Path::new(&glob::Pattern::escape(dir_str)).join("*.*");
        let entries = glob::glob(&pattern.to_string_lossy())
            .map_err(|e| list_error(e.to_string()))?;

        Ok(collect_files(dir, entries))
    }

    async fn stat(&self, path: &Path) -> Result<FileStat, ScanError> {
        let metadata = tokio::fs::metadata(path)
            .await
            .map_err(|source| ScanError::Read {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(FileStat {
            size: metadata.len(),
            modified: metadata.modified().ok().map(DateTime::<Utc>::from),
            created: metadata.created().ok().map(DateTime::<Utc>::from),
        })
    }

    async fn read_to_string(&self, path: &Path) -> Result<String, ScanError> {
        tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ScanError::Read {
                path: path.to_path_buf(),
                source,
            })
    }
}
