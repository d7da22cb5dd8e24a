//! Generation and embedding request value objects

use crate::core::error::DomainError;
use serde::Serialize;
use serde_json::{Map, Value};

/// Keys owned by [`GenerationRequest`] that caller options may not override
const RESERVED_KEYS: [&str; 4] = ["model", "prompt", "temperature", "stream"];

/// Caller-supplied generation options.
///
/// `temperature` overrides the client default; everything in `extra` is
/// forwarded to the backend verbatim unless it collides with a reserved key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerationOptions {
    pub temperature: Option<f64>,
    pub extra: Map<String, Value>,
}

impl GenerationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

/// A single-shot, non-streaming generation request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationRequest {
    model: String,
    prompt: String,
    temperature: f64,
    stream: bool,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl GenerationRequest {
    /// Build a request for an already-resolved model.
    ///
    /// Fails only when `model` is empty; resolution must happen first.
    pub fn new(
        model: impl Into<String>,
        prompt: impl Into<String>,
        temperature: f64,
    ) -> Result<Self, DomainError> {
        let model = model.into();
        if model.trim().is_empty() {
            return Err(DomainError::InvalidModel(model));
        }
        Ok(Self {
            model,
            prompt: prompt.into(),
            temperature,
            stream: false,
            extra: Map::new(),
        })
    }

    /// Merge extra backend options, skipping reserved keys
    pub fn with_extra(mut self, extra: &Map<String, Value>) -> Self {
        for (key, value) in extra {
            if !RESERVED_KEYS.contains(&key.as_str()) {
                self.extra.insert(key.clone(), value.clone());
            }
        }
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    pub fn is_streaming(&self) -> bool {
        self.stream
    }

    pub fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }
}

/// Embedding request for a resolved model
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmbeddingRequest {
    pub model: String,
    pub prompt: String,
}

impl EmbeddingRequest {
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_rejects_empty_model() {
        assert!(GenerationRequest::new("", "hi", 0.7).is_err());
        assert!(GenerationRequest::new("   ", "hi", 0.7).is_err());
    }

    #[test]
    fn test_serializes_flat_non_streaming_payload() {
        let mut extra = Map::new();
        extra.insert("top_p".to_string(), json!(0.9));
        let request = GenerationRequest::new("llama3:8b", "Say hi", 0.3)
            .unwrap()
            .with_extra(&extra);

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "model": "llama3:8b",
                "prompt": "Say hi",
                "temperature": 0.3,
                "stream": false,
                "top_p": 0.9
            })
        );
    }

    #[test]
    fn test_extra_cannot_override_reserved_keys() {
        let mut extra = Map::new();
        extra.insert("model".to_string(), json!("other"));
        extra.insert("stream".to_string(), json!(true));
        extra.insert("temperature".to_string(), json!(1.5));
        let request = GenerationRequest::new("llama3", "p", 0.7)
            .unwrap()
            .with_extra(&extra);

        assert_eq!(request.model(), "llama3");
        assert!(!request.is_streaming());
        assert_eq!(request.temperature(), 0.7);
        assert!(request.extra().is_empty());
    }

    #[test]
    fn test_options_builder() {
        let options = GenerationOptions::new()
            .with_temperature(0.2)
            .with_option("num_ctx", 4096);
        assert_eq!(options.temperature, Some(0.2));
        assert_eq!(options.extra["num_ctx"], json!(4096));
    }
}
