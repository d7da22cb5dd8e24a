//! Generation gateway port
//!
//! Defines the interface for talking to a local generation backend.
//! Adapters turn transport problems into [`GatewayError`]; the application
//! layer decides what a failure means for the caller.

use async_trait::async_trait;
use localcrew_domain::{EmbeddingRequest, GenerationRequest, ModelDescriptor};
use thiserror::Error;

/// Errors that can occur during gateway operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timeout")]
    Timeout,
}

/// Gateway for the generation backend
///
/// This port defines how the application layer communicates with the model
/// server. Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait GenerationGateway: Send + Sync {
    /// Models the backend currently serves
    async fn list_models(&self) -> Result<Vec<ModelDescriptor>, GatewayError>;

    /// Single non-streaming completion
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GatewayError>;

    /// Embedding vector for the request's text
    async fn embed(&self, request: &EmbeddingRequest) -> Result<Vec<f32>, GatewayError>;
}
