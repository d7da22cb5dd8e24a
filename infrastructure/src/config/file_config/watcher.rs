//! Directory watcher configuration from TOML (`[watcher]` section)

use super::expand_tilde;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Raw watcher configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileWatcherConfig {
    /// Directory to watch (`~` is expanded)
    pub dir: String,
    /// Seconds between scans
    pub poll_interval_secs: u64,
}

impl Default for FileWatcherConfig {
    fn default() -> Self {
        Self {
            dir: "~/Documents/Inbox".to_string(),
            poll_interval_secs: 5,
        }
    }
}

impl FileWatcherConfig {
    pub fn resolved_dir(&self) -> PathBuf {
        expand_tilde(&self.dir)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }
}
