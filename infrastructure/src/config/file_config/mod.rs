//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod logging;
mod ollama;
mod output;
mod prompts;
mod watcher;

pub use logging::FileLoggingConfig;
pub use ollama::FileOllamaConfig;
pub use output::FileOutputConfig;
pub use prompts::FilePromptsConfig;
pub use watcher::FileWatcherConfig;

use localcrew_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Generation backend settings
    pub ollama: FileOllamaConfig,
    /// Prompt template location
    pub prompts: FilePromptsConfig,
    /// Directory watcher settings
    pub watcher: FileWatcherConfig,
    /// Invocation log settings
    pub logging: FileLoggingConfig,
    /// Output settings
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        let ollama = &self.ollama;

        for (field, value) in [
            ("ollama.generation_model", &ollama.generation_model),
            ("ollama.embedding_model", &ollama.embedding_model),
        ] {
            if value.trim().is_empty() {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::EmptyModelName,
                    format!("{} cannot be empty", field),
                ));
            }
        }

        if !(ollama.base_url.starts_with("http://") || ollama.base_url.starts_with("https://")) {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::InvalidBaseUrl,
                format!(
                    "ollama.base_url must start with http:// or https:// (got '{}')",
                    ollama.base_url
                ),
            ));
        }

        if !(0.0..=2.0).contains(&ollama.temperature) {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::TemperatureOutOfRange,
                format!(
                    "ollama.temperature {} is outside 0.0-2.0",
                    ollama.temperature
                ),
            ));
        }

        if ollama.request_timeout_secs == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::ZeroRequestTimeout,
                "ollama.request_timeout_secs cannot be 0",
            ));
        }

        if self.watcher.poll_interval_secs == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::ZeroPollInterval,
                "watcher.poll_interval_secs cannot be 0",
            ));
        }

        issues
    }
}

/// Expand a leading `~` to the home directory
pub fn expand_tilde(path: &str) -> PathBuf {
    match path.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => match dirs::home_dir() {
            Some(home) => home.join(rest.trim_start_matches('/')),
            None => PathBuf::from(path),
        },
        _ => PathBuf::from(path),
    }
}
