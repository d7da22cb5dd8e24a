//! Prompt store configuration from TOML (`[prompts]` section)

use super::expand_tilde;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw prompt store configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilePromptsConfig {
    /// Root directory holding `<tool_type>/<variant>.yml` templates
    pub dir: String,
}

impl Default for FilePromptsConfig {
    fn default() -> Self {
        Self {
            dir: "prompts".to_string(),
        }
    }
}

impl FilePromptsConfig {
    pub fn resolved_dir(&self) -> PathBuf {
        expand_tilde(&self.dir)
    }
}
