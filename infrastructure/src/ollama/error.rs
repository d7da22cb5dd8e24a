//! Error types for the Ollama adapter

use localcrew_application::GatewayError;
use thiserror::Error;

/// Result type alias for Ollama operations
pub type Result<T> = std::result::Result<T, OllamaError>;

/// Errors that can occur when talking to an Ollama server
#[derive(Error, Debug)]
pub enum OllamaError {
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),

    #[error("Ollama not reachable at {url}: {message}")]
    NotAvailable { url: String, message: String },

    #[error("Request timeout")]
    Timeout,

    #[error("Model not found: {0}")]
    ModelNotFound(String),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Failed to parse response: {0}")]
    Parse(String),
}

impl OllamaError {
    /// Classify a transport-level reqwest failure
    pub fn from_reqwest(url: &str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            OllamaError::Timeout
        } else if err.is_connect() {
            OllamaError::NotAvailable {
                url: url.to_string(),
                message: err.to_string(),
            }
        } else if err.is_decode() {
            OllamaError::Parse(err.to_string())
        } else {
            OllamaError::Http(err.to_string())
        }
    }
}

impl From<OllamaError> for GatewayError {
    fn from(err: OllamaError) -> Self {
        match err {
            OllamaError::NotAvailable { .. } | OllamaError::ClientBuild(_) => {
                GatewayError::ConnectionError(err.to_string())
            }
            OllamaError::Timeout => GatewayError::Timeout,
            OllamaError::ModelNotFound(model) => GatewayError::ModelNotAvailable(model),
            OllamaError::Parse(message) => GatewayError::InvalidResponse(message),
            OllamaError::Status { .. } | OllamaError::Http(_) => {
                GatewayError::RequestFailed(err.to_string())
            }
        }
    }
}
