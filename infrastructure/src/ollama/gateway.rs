//! Ollama implementation of [`GenerationGateway`]

use super::error::{OllamaError, Result};
use super::protocol::{EmbeddingResponse, GenerateResponse, TagsResponse};
use async_trait::async_trait;
use localcrew_application::{GatewayError, GenerationGateway};
use localcrew_domain::{EmbeddingRequest, GenerationRequest, ModelDescriptor};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// Default Ollama API endpoint
pub const OLLAMA_DEFAULT_URL: &str = "http://localhost:11434";

/// Default request timeout (model loading can take a while)
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// HTTP client for a single Ollama server
#[derive(Debug, Clone)]
pub struct OllamaGateway {
    client: reqwest::Client,
    base_url: String,
}

impl OllamaGateway {
    /// Create a gateway for `base_url` whose requests give up after `timeout`
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| OllamaError::ClientBuild(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.endpoint(path);
        debug!("GET {}", url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| OllamaError::from_reqwest(&self.base_url, e))?;
        Self::decode(response, None).await
    }

    async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        model: &str,
    ) -> Result<T> {
        let url = self.endpoint(path);
        debug!("POST {} (model: {})", url, model);
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| OllamaError::from_reqwest(&self.base_url, e))?;
        Self::decode(response, Some(model)).await
    }

    async fn decode<T: DeserializeOwned>(
        response: reqwest::Response,
        model: Option<&str>,
    ) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            if let (404, Some(model)) = (status.as_u16(), model) {
                return Err(OllamaError::ModelNotFound(model.to_string()));
            }
            return Err(OllamaError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| OllamaError::Parse(e.to_string()))
    }
}

#[async_trait]
impl GenerationGateway for OllamaGateway {
    async fn list_models(&self) -> std::result::Result<Vec<ModelDescriptor>, GatewayError> {
        let tags: TagsResponse = self.get_json("api/tags").await?;
        Ok(tags.models.into_iter().map(ModelDescriptor::from).collect())
    }

    async fn generate(&self, request: &GenerationRequest) -> std::result::Result<String, GatewayError> {
        let reply: GenerateResponse = self
            .post_json("api/generate", request, request.model())
            .await?;
        Ok(reply.response)
    }

    async fn embed(&self, request: &EmbeddingRequest) -> std::result::Result<Vec<f32>, GatewayError> {
        let reply: EmbeddingResponse = self
            .post_json("api/embeddings", request, &request.model)
            .await?;
        Ok(reply.embedding)
    }
}
