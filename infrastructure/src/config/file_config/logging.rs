//! Logging configuration from TOML (`[logging]` section)

use super::expand_tilde;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw logging configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// JSONL file receiving one line per tool invocation
    pub invocation_log: Option<String>,
}

impl FileLoggingConfig {
    pub fn invocation_log_path(&self) -> Option<PathBuf> {
        self.invocation_log.as_deref().map(expand_tilde)
    }
}
