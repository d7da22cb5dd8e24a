//! Ollama adapter
//!
//! Implements the [`GenerationGateway`](localcrew_application::GenerationGateway)
//! port over Ollama's HTTP API using `reqwest`.

pub mod error;
pub mod gateway;
pub mod protocol;

pub use error::OllamaError;
pub use gateway::{DEFAULT_TIMEOUT, OLLAMA_DEFAULT_URL, OllamaGateway};
