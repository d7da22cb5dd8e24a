//! Generation service use case.
//!
//! Wraps a [`GenerationGateway`] with model negotiation: callers ask for a
//! model (or none), and the service substitutes something the backend
//! actually serves before any request goes out.
//!
//! # Model cache
//!
//! The list of served models is held as an immutable [`ModelCatalog`]
//! snapshot behind `RwLock<Arc<_>>`. A refresh builds a new snapshot and
//! swaps it in; every resolution clones the `Arc` once and decides against
//! that snapshot only, so a concurrent refresh never changes a decision half
//! way through.
//!
//! ```text
//! generate(prompt, Some("llama3"))
//!   │
//!   ├─ catalog()            ── empty? ──▶ refresh_available_models()
//!   ├─ snapshot.contains("llama3")?
//!   │     no ──▶ snapshot.resolve_generation_model(default)   (warn!)
//!   └─ gateway.generate(GenerationRequest { model, prompt, temperature, stream: false })
//! ```
//!
//! # Failure policy
//!
//! - listing models: logged, treated as "no models"
//! - embeddings: logged, empty vector
//! - generation: typed [`GenerationError`]
//! - JSON generation: [`JsonOutput::Failed`] carrying `error` and `raw_response`

use crate::ports::llm_gateway::{GatewayError, GenerationGateway};
use localcrew_domain::{
    DomainError, EmbeddingRequest, ExtractionError, GenerationOptions, GenerationRequest,
    ModelCatalog, ModelDescriptor, PreferredModels, extract_json_object,
};
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Appended to prompts that do not already ask for JSON
pub const JSON_INSTRUCTION: &str = "\n\nPlease format your response as a valid JSON object.";

/// Defaults the service falls back on
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationSettings {
    /// Model used when the caller does not name one
    pub default_model: String,
    /// Embedding model used when no preferred one is served
    pub embedding_model: String,
    pub temperature: f64,
    /// Populate the model cache when connecting
    pub auto_detect_models: bool,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            default_model: "llama3:8b-instruct-fp16".to_string(),
            embedding_model: "nomic-embed-text".to_string(),
            temperature: 0.7,
            auto_detect_models: true,
        }
    }
}

/// Errors that can occur during generation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GenerationError {
    #[error("Invalid generation request: {0}")]
    InvalidRequest(#[from] DomainError),

    #[error("Generation with model '{model}' failed: {source}")]
    Gateway {
        model: String,
        #[source]
        source: GatewayError,
    },
}

/// Result of [`GenerationService::generate_with_json_output`]
#[derive(Debug, Clone, PartialEq)]
pub enum JsonOutput {
    Parsed(Map<String, Value>),
    Failed { error: String, raw_response: String },
}

impl JsonOutput {
    pub fn is_parsed(&self) -> bool {
        matches!(self, JsonOutput::Parsed(_))
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            JsonOutput::Parsed(_) => None,
            JsonOutput::Failed { error, .. } => Some(error),
        }
    }

    /// The parsed object, or `{error, raw_response}`
    pub fn to_mapping(&self) -> Map<String, Value> {
        match self {
            JsonOutput::Parsed(object) => object.clone(),
            JsonOutput::Failed {
                error,
                raw_response,
            } => {
                let mut mapping = Map::new();
                mapping.insert("error".into(), Value::String(error.clone()));
                mapping.insert("raw_response".into(), Value::String(raw_response.clone()));
                mapping
            }
        }
    }
}

impl From<ExtractionError> for JsonOutput {
    fn from(err: ExtractionError) -> Self {
        JsonOutput::Failed {
            error: err.to_string(),
            raw_response: err.raw_response().to_string(),
        }
    }
}

impl Serialize for JsonOutput {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_mapping().serialize(serializer)
    }
}

/// Snapshot of what the backend serves and what the service would pick
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelsReport {
    pub default_generation_model: String,
    pub default_embedding_model: String,
    pub models_by_family: BTreeMap<String, Vec<ModelDescriptor>>,
    pub all_models: Vec<String>,
    pub preferred_models: PreferredModels,
}

/// Client-side façade over the generation backend.
pub struct GenerationService {
    gateway: Arc<dyn GenerationGateway>,
    settings: GenerationSettings,
    catalog: RwLock<Arc<ModelCatalog>>,
}

impl GenerationService {
    /// Create a service with an empty model cache
    pub fn new(gateway: Arc<dyn GenerationGateway>, settings: GenerationSettings) -> Self {
        Self {
            gateway,
            settings,
            catalog: RwLock::new(Arc::new(ModelCatalog::empty())),
        }
    }

    /// Create a service, populating the model cache when
    /// `auto_detect_models` is set.
    pub async fn connect(gateway: Arc<dyn GenerationGateway>, settings: GenerationSettings) -> Self {
        let service = Self::new(gateway, settings);
        if service.settings.auto_detect_models {
            let catalog = service.refresh_available_models().await;
            info!("Detected {} model(s) on the generation backend", catalog.len());
        }
        service
    }

    pub fn settings(&self) -> &GenerationSettings {
        &self.settings
    }

    /// Models the backend serves right now; empty when it cannot be reached.
    pub async fn list_models(&self) -> Vec<ModelDescriptor> {
        match self.gateway.list_models().await {
            Ok(models) => models,
            Err(e) => {
                warn!("Error getting model list: {}", e);
                Vec::new()
            }
        }
    }

    /// Replace the cached catalog with a fresh snapshot and return it.
    pub async fn refresh_available_models(&self) -> Arc<ModelCatalog> {
        let snapshot = Arc::new(ModelCatalog::new(self.list_models().await));
        *self.catalog.write().await = Arc::clone(&snapshot);
        debug!(models = ?snapshot.names(), "Model catalog refreshed");
        snapshot
    }

    /// The cached snapshot, without refreshing
    pub async fn cached_catalog(&self) -> Arc<ModelCatalog> {
        Arc::clone(&*self.catalog.read().await)
    }

    /// The cached snapshot, refreshed first when it is empty
    pub async fn catalog(&self) -> Arc<ModelCatalog> {
        let current = self.cached_catalog().await;
        if current.is_empty() {
            self.refresh_available_models().await
        } else {
            current
        }
    }

    /// Exact name, or a cached `"{name}:{tag}"` variant
    pub async fn is_model_available(&self, name: &str) -> bool {
        self.catalog().await.contains(name)
    }

    pub async fn find_embedding_model(&self) -> String {
        self.catalog()
            .await
            .resolve_embedding_model(&self.settings.embedding_model)
    }

    /// Never empty
    pub async fn find_generation_model(&self) -> String {
        self.catalog()
            .await
            .resolve_generation_model(&self.settings.default_model)
    }

    /// Generate a completion.
    ///
    /// An explicitly requested model that is not served is replaced by
    /// [`find_generation_model`](Self::find_generation_model). Without a
    /// request the configured default is used as-is.
    pub async fn generate(
        &self,
        prompt: &str,
        model: Option<&str>,
        options: &GenerationOptions,
    ) -> Result<String, GenerationError> {
        let model = self.resolve_generation(model).await;
        let temperature = options.temperature.unwrap_or(self.settings.temperature);
        let request =
            GenerationRequest::new(model.as_str(), prompt, temperature)?.with_extra(&options.extra);

        debug!(
            model = %model,
            temperature,
            prompt_len = prompt.len(),
            "Dispatching generation request"
        );

        self.gateway.generate(&request).await.map_err(|source| {
            warn!("Error generating text with {}: {}", model, source);
            GenerationError::Gateway { model, source }
        })
    }

    /// Embedding vector for `text`; empty on any failure.
    pub async fn get_embeddings(&self, text: &str, model: Option<&str>) -> Vec<f32> {
        let model = match model.filter(|m| !m.is_empty()) {
            Some(requested) => {
                let catalog = self.catalog().await;
                if catalog.contains(requested) {
                    requested.to_string()
                } else {
                    let substitute = catalog.resolve_embedding_model(&self.settings.embedding_model);
                    warn!(
                        "Embedding model '{}' not available, using '{}'",
                        requested, substitute
                    );
                    substitute
                }
            }
            None => self.settings.embedding_model.clone(),
        };

        debug!(model = %model, text_len = text.len(), "Dispatching embedding request");
        match self.gateway.embed(&EmbeddingRequest::new(&model, text)).await {
            Ok(embedding) => embedding,
            Err(e) => {
                warn!("Error getting embeddings with {}: {}", model, e);
                Vec::new()
            }
        }
    }

    /// Generate and extract a JSON object from the reply.
    pub async fn generate_with_json_output(
        &self,
        prompt: &str,
        model: Option<&str>,
        options: &GenerationOptions,
    ) -> JsonOutput {
        let prompt = if prompt.to_lowercase().contains("json") {
            prompt.to_string()
        } else {
            format!("{}{}", prompt, JSON_INSTRUCTION)
        };

        let response = match self.generate(&prompt, model, options).await {
            Ok(response) => response,
            Err(e) => {
                return JsonOutput::Failed {
                    error: e.to_string(),
                    raw_response: String::new(),
                };
            }
        };

        match extract_json_object(&response) {
            Ok(object) => JsonOutput::Parsed(object),
            Err(e) => e.into(),
        }
    }

    /// Cached models whose family or secondary families include `family`
    pub async fn models_by_family(&self, family: &str) -> Vec<ModelDescriptor> {
        self.cached_catalog()
            .await
            .by_family(family)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Refresh the cache and describe the result
    pub async fn models_report(&self) -> ModelsReport {
        let catalog = self.refresh_available_models().await;
        ModelsReport {
            default_generation_model: catalog
                .resolve_generation_model(&self.settings.default_model),
            default_embedding_model: catalog.resolve_embedding_model(&self.settings.embedding_model),
            models_by_family: catalog.grouped_by_family(),
            all_models: catalog.names().into_iter().map(String::from).collect(),
            preferred_models: PreferredModels::default(),
        }
    }

    async fn resolve_generation(&self, requested: Option<&str>) -> String {
        let Some(requested) = requested.filter(|m| !m.is_empty()) else {
            return self.settings.default_model.clone();
        };

        let catalog = self.catalog().await;
        if catalog.contains(requested) {
            return requested.to_string();
        }

        let substitute = catalog.resolve_generation_model(&self.settings.default_model);
        warn!(
            "Model '{}' not available, falling back to '{}'",
            requested, substitute
        );
        substitute
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Mock gateway with scripted completions that records every request
    struct ScriptedGateway {
        models: Mutex<Result<Vec<ModelDescriptor>, GatewayError>>,
        responses: Mutex<VecDeque<Result<String, GatewayError>>>,
        embedding: Result<Vec<f32>, GatewayError>,
        generate_requests: Mutex<Vec<GenerationRequest>>,
        embed_requests: Mutex<Vec<EmbeddingRequest>>,
        list_calls: Mutex<usize>,
    }

    impl ScriptedGateway {
        fn serving(names: &[&str]) -> Self {
            Self {
                models: Mutex::new(Ok(names.iter().map(|n| ModelDescriptor::new(*n)).collect())),
                responses: Mutex::new(VecDeque::new()),
                embedding: Ok(vec![0.1, 0.2, 0.3]),
                generate_requests: Mutex::new(Vec::new()),
                embed_requests: Mutex::new(Vec::new()),
                list_calls: Mutex::new(0),
            }
        }

        fn unreachable() -> Self {
            let gateway = Self::serving(&[]);
            *gateway.models.lock().unwrap() =
                Err(GatewayError::ConnectionError("connection refused".into()));
            Self {
                embedding: Err(GatewayError::ConnectionError("connection refused".into())),
                ..gateway
            }
        }

        fn with_response(self, response: Result<&str, GatewayError>) -> Self {
            self.responses
                .lock()
                .unwrap()
                .push_back(response.map(String::from));
            self
        }

        fn last_request(&self) -> GenerationRequest {
            self.generate_requests.lock().unwrap().last().cloned().unwrap()
        }

        fn list_calls(&self) -> usize {
            *self.list_calls.lock().unwrap()
        }
    }

    #[async_trait]
    impl GenerationGateway for ScriptedGateway {
        async fn list_models(&self) -> Result<Vec<ModelDescriptor>, GatewayError> {
            *self.list_calls.lock().unwrap() += 1;
            self.models.lock().unwrap().clone()
        }

        async fn generate(&self, request: &GenerationRequest) -> Result<String, GatewayError> {
            self.generate_requests.lock().unwrap().push(request.clone());
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok("(no more responses)".to_string()))
        }

        async fn embed(&self, request: &EmbeddingRequest) -> Result<Vec<f32>, GatewayError> {
            self.embed_requests.lock().unwrap().push(request.clone());
            self.embedding.clone()
        }
    }

    fn service(gateway: &Arc<ScriptedGateway>) -> GenerationService {
        GenerationService::new(gateway.clone(), GenerationSettings::default())
    }

    #[tokio::test]
    async fn test_is_model_available_exact_and_tagged() {
        let gateway = Arc::new(ScriptedGateway::serving(&["llama3:8b"]));
        let service = service(&gateway);

        assert!(service.is_model_available("llama3").await);
        assert!(service.is_model_available("llama3:8b").await);
        assert!(!service.is_model_available("llama3:70b").await);
        // One lazy refresh served all three lookups
        assert_eq!(gateway.list_calls(), 1);
    }

    #[tokio::test]
    async fn test_exact_name_without_tag() {
        let gateway = Arc::new(ScriptedGateway::serving(&["llama3"]));
        assert!(service(&gateway).is_model_available("llama3").await);
    }

    #[tokio::test]
    async fn test_find_generation_model_never_empty() {
        let gateway = Arc::new(ScriptedGateway::unreachable());
        let service = service(&gateway);
        assert_eq!(service.find_generation_model().await, "llama3:8b-instruct-fp16");
        assert_eq!(service.find_embedding_model().await, "nomic-embed-text");
    }

    #[tokio::test]
    async fn test_generate_substitutes_unavailable_model() {
        let gateway =
            Arc::new(ScriptedGateway::serving(&["mistral:7b"]).with_response(Ok("hello")));
        let service = service(&gateway);

        let text = service
            .generate("Say hi", Some("phi3"), &GenerationOptions::new())
            .await
            .unwrap();

        assert_eq!(text, "hello");
        assert_eq!(gateway.last_request().model(), "mistral");
    }

    #[tokio::test]
    async fn test_generate_without_model_uses_default_and_options() {
        let gateway = Arc::new(ScriptedGateway::serving(&[]).with_response(Ok("ok")));
        let service = service(&gateway);

        let options = GenerationOptions::new()
            .with_temperature(0.1)
            .with_option("num_ctx", 4096)
            .with_option("model", "ignored");
        service.generate("p", None, &options).await.unwrap();

        let request = gateway.last_request();
        assert_eq!(request.model(), "llama3:8b-instruct-fp16");
        assert_eq!(request.temperature(), 0.1);
        assert!(!request.is_streaming());
        assert_eq!(request.extra()["num_ctx"], json!(4096));
        assert!(!request.extra().contains_key("model"));
        // No explicit model, so no catalog lookup was needed
        assert_eq!(gateway.list_calls(), 0);
    }

    #[tokio::test]
    async fn test_generate_failure_is_typed() {
        let gateway = Arc::new(
            ScriptedGateway::serving(&[])
                .with_response(Err(GatewayError::RequestFailed("HTTP 500".into()))),
        );
        let err = service(&gateway)
            .generate("p", None, &GenerationOptions::new())
            .await
            .unwrap_err();

        assert!(matches!(err, GenerationError::Gateway { ref model, .. } if model == "llama3:8b-instruct-fp16"));
        assert!(err.to_string().contains("HTTP 500"));
    }

    #[tokio::test]
    async fn test_json_output_extracts_embedded_object() {
        let gateway = Arc::new(
            ScriptedGateway::serving(&[]).with_response(Ok("The answer is {\"a\":1} done")),
        );
        let output = service(&gateway)
            .generate_with_json_output("What is a?", None, &GenerationOptions::new())
            .await;

        assert_eq!(output, JsonOutput::Parsed(json!({"a": 1}).as_object().cloned().unwrap()));
        assert!(gateway.last_request().prompt().ends_with(JSON_INSTRUCTION));
    }

    #[tokio::test]
    async fn test_json_instruction_not_repeated() {
        let gateway = Arc::new(ScriptedGateway::serving(&[]).with_response(Ok("{}")));
        service(&gateway)
            .generate_with_json_output("Reply in json please", None, &GenerationOptions::new())
            .await;
        assert_eq!(gateway.last_request().prompt(), "Reply in json please");
    }

    #[tokio::test]
    async fn test_json_mention_is_case_insensitive() {
        let gateway = Arc::new(ScriptedGateway::serving(&[]).with_response(Ok("{}")));
        service(&gateway)
            .generate_with_json_output("Answer as Json", None, &GenerationOptions::new())
            .await;
        assert_eq!(gateway.last_request().prompt(), "Answer as Json");
    }

    #[tokio::test]
    async fn test_json_output_without_braces() {
        let gateway =
            Arc::new(ScriptedGateway::serving(&[]).with_response(Ok("Sorry, I cannot help.")));
        let output = service(&gateway)
            .generate_with_json_output("p", None, &GenerationOptions::new())
            .await;

        assert_eq!(
            Value::Object(output.to_mapping()),
            json!({"error": "No JSON found in response", "raw_response": "Sorry, I cannot help."})
        );
    }

    #[tokio::test]
    async fn test_json_output_on_generation_failure() {
        let gateway = Arc::new(
            ScriptedGateway::serving(&[]).with_response(Err(GatewayError::Timeout)),
        );
        let output = service(&gateway)
            .generate_with_json_output("p", None, &GenerationOptions::new())
            .await;

        let mapping = output.to_mapping();
        assert!(mapping["error"].as_str().unwrap().contains("Timeout"));
        assert_eq!(mapping["raw_response"], json!(""));
    }

    #[tokio::test]
    async fn test_embeddings() {
        let gateway = Arc::new(ScriptedGateway::serving(&["granite-embedding:30m"]));
        let service = service(&gateway);

        assert_eq!(service.get_embeddings("text", None).await, vec![0.1, 0.2, 0.3]);
        service.get_embeddings("text", Some("missing-embed")).await;
        let requests = gateway.embed_requests.lock().unwrap().clone();
        assert_eq!(requests[0].model, "nomic-embed-text");
        assert_eq!(requests[1].model, "granite-embedding:30m");
    }

    #[tokio::test]
    async fn test_embeddings_empty_on_failure() {
        let gateway = Arc::new(ScriptedGateway::unreachable());
        assert!(service(&gateway).get_embeddings("text", None).await.is_empty());
    }

    #[tokio::test]
    async fn test_refresh_swaps_snapshot() {
        let gateway = Arc::new(ScriptedGateway::serving(&["llama2:7b"]));
        let service = service(&gateway);

        let before = service.refresh_available_models().await;
        *gateway.models.lock().unwrap() = Ok(vec![ModelDescriptor::new("mistral:7b")]);
        let after = service.refresh_available_models().await;

        // A snapshot held by an in-flight resolution is unaffected
        assert_eq!(before.names(), vec!["llama2:7b"]);
        assert_eq!(after.names(), vec!["mistral:7b"]);
        assert_eq!(service.find_generation_model().await, "mistral");
    }

    #[tokio::test]
    async fn test_connect_auto_detects() {
        let gateway = Arc::new(ScriptedGateway::serving(&["llama3:8b"]));
        let service = GenerationService::connect(gateway.clone(), GenerationSettings::default()).await;
        assert_eq!(gateway.list_calls(), 1);
        assert_eq!(service.cached_catalog().await.len(), 1);

        let gateway = Arc::new(ScriptedGateway::serving(&["llama3:8b"]));
        let settings = GenerationSettings {
            auto_detect_models: false,
            ..GenerationSettings::default()
        };
        GenerationService::connect(gateway.clone(), settings).await;
        assert_eq!(gateway.list_calls(), 0);
    }

    #[tokio::test]
    async fn test_models_report() {
        let gateway = Arc::new(ScriptedGateway::serving(&[]));
        *gateway.models.lock().unwrap() = Ok(vec![
            ModelDescriptor::new("llama3:8b").with_family("llama"),
            ModelDescriptor::new("nomic-embed-text:latest").with_family("nomic-bert"),
            ModelDescriptor::new("custom"),
        ]);
        let service = service(&gateway);

        let report = service.models_report().await;
        assert_eq!(report.default_generation_model, "llama3:8b");
        assert_eq!(report.default_embedding_model, "nomic-embed-text");
        assert_eq!(report.all_models.len(), 3);
        assert_eq!(report.models_by_family["other"][0].name, "custom");
        assert_eq!(report.models_by_family["llama"][0].name, "llama3:8b");
        assert_eq!(service.models_by_family("nomic-bert").await.len(), 1);
    }
}
