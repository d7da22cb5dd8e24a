//! Ollama configuration from TOML (`[ollama]` section)

use localcrew_application::GenerationSettings;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw Ollama backend configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOllamaConfig {
    /// Base URL of the Ollama HTTP API
    pub base_url: String,
    /// Default model for text generation
    pub generation_model: String,
    /// Default model for embeddings
    pub embedding_model: String,
    /// Sampling temperature used when a call does not set one
    pub temperature: f64,
    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
    /// Query the backend for its models at startup
    pub auto_detect_models: bool,
}

impl Default for FileOllamaConfig {
    fn default() -> Self {
        let settings = GenerationSettings::default();
        Self {
            base_url: "http://localhost:11434".to_string(),
            generation_model: settings.default_model,
            embedding_model: settings.embedding_model,
            temperature: settings.temperature,
            request_timeout_secs: 120,
            auto_detect_models: settings.auto_detect_models,
        }
    }
}

impl FileOllamaConfig {
    pub fn to_settings(&self) -> GenerationSettings {
        GenerationSettings {
            default_model: self.generation_model.clone(),
            embedding_model: self.embedding_model.clone(),
            temperature: self.temperature,
            auto_detect_models: self.auto_detect_models,
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
