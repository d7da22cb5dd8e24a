//! Ollama HTTP API wire types
//!
//! | Endpoint | Method | Body | Reply |
//! |----------|--------|------|-------|
//! | `/api/tags` | GET | – | [`TagsResponse`] |
//! | `/api/generate` | POST | `GenerationRequest` (flat JSON, `stream: false`) | [`GenerateResponse`] |
//! | `/api/embeddings` | POST | `EmbeddingRequest` | [`EmbeddingResponse`] |
//!
//! Request bodies are the domain request types, which serialize to exactly
//! the JSON Ollama expects.

use localcrew_domain::ModelDescriptor;
use serde::Deserialize;
use serde_json::{Map, Value};

/// Response from `/api/tags`
#[derive(Debug, Clone, Deserialize)]
pub struct TagsResponse {
    #[serde(default)]
    pub models: Vec<TagModel>,
}

/// One entry of `/api/tags`
#[derive(Debug, Clone, Deserialize)]
pub struct TagModel {
    pub name: String,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub digest: Option<String>,
    #[serde(default)]
    pub modified_at: Option<String>,
    #[serde(default)]
    pub details: TagDetails,
}

/// `details` block of a model entry
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TagDetails {
    #[serde(default)]
    pub family: Option<String>,
    #[serde(default)]
    pub families: Option<Vec<String>>,
    /// format, parameter_size, quantization_level, ...
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl From<TagModel> for ModelDescriptor {
    fn from(model: TagModel) -> Self {
        let mut descriptor = ModelDescriptor::new(model.name)
            .with_families(model.details.families.unwrap_or_default());
        descriptor.family = model.details.family;

        if let Some(size) = model.size {
            descriptor = descriptor.with_detail("size", size);
        }
        if let Some(digest) = model.digest {
            descriptor = descriptor.with_detail("digest", digest);
        }
        if let Some(modified_at) = model.modified_at {
            descriptor = descriptor.with_detail("modified_at", modified_at);
        }
        for (key, value) in model.details.other {
            if !value.is_null() {
                descriptor = descriptor.with_detail(key, value);
            }
        }
        descriptor
    }
}

/// Response from `/api/generate` (non-streaming)
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub response: String,
    #[serde(default)]
    pub done: bool,
}

/// Response from `/api/embeddings`
#[derive(Debug, Clone, Deserialize)]
pub struct EmbeddingResponse {
    #[serde(default)]
    pub embedding: Vec<f32>,
}
