//! Shared fixtures for tool tests

use async_trait::async_trait;
use localcrew_application::{
    AnalysisPipeline, GatewayError, GenerationGateway, GenerationService, GenerationSettings,
    PromptStore,
};
use localcrew_domain::{EmbeddingRequest, GenerationRequest, ModelDescriptor, PromptKey, PromptTemplate};
use serde_json::{Map, Value, json};
use std::collections::{BTreeSet, VecDeque};
use std::sync::{Arc, Mutex};

/// Gateway that answers every generation with a queued reply (or `default_reply`)
pub struct CannedGateway {
    replies: Mutex<VecDeque<Result<String, GatewayError>>>,
    default_reply: Result<String, GatewayError>,
    pub prompts: Mutex<Vec<String>>,
}

impl CannedGateway {
    pub fn replying(reply: &str) -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            default_reply: Ok(reply.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: GatewayError) -> Self {
        Self {
            default_reply: Err(error),
            ..Self::replying("")
        }
    }

    pub fn then(self, reply: &str) -> Self {
        self.replies.lock().unwrap().push_back(Ok(reply.to_string()));
        self
    }

    pub fn prompt_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl GenerationGateway for CannedGateway {
    async fn list_models(&self) -> Result<Vec<ModelDescriptor>, GatewayError> {
        Ok(vec![ModelDescriptor::new("llama3:8b-instruct-fp16")])
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<String, GatewayError> {
        self.prompts.lock().unwrap().push(request.prompt().to_string());
        match self.replies.lock().unwrap().pop_front() {
            Some(reply) => reply,
            None => self.default_reply.clone(),
        }
    }

    async fn embed(&self, _request: &EmbeddingRequest) -> Result<Vec<f32>, GatewayError> {
        Ok(Vec::new())
    }
}

/// In-memory store holding one `"{tool_type}: {content}"` template per key
pub struct StaticPrompts {
    keys: Vec<PromptKey>,
}

impl StaticPrompts {
    pub fn with(keys: &[(&str, &str)]) -> Self {
        Self {
            keys: keys.iter().map(|(t, v)| PromptKey::new(*t, *v)).collect(),
        }
    }

    /// Every template the shipped prompt directory provides
    pub fn shipped() -> Self {
        Self::with(&[
            ("code_analysis", "standard"),
            ("code_analysis", "technical"),
            ("content_repurposing", "standard"),
            ("entity_extraction", "standard"),
            ("section_analyzer", "standard"),
            ("summary_generation", "executive"),
            ("summary_generation", "technical"),
        ])
    }
}

impl PromptStore for StaticPrompts {
    fn get_template(&self, tool_type: &str, variant: &str) -> Option<PromptTemplate> {
        let key = self
            .keys
            .iter()
            .find(|k| k.tool_type == tool_type && k.variant == variant)?;
        let record: Map<String, Value> = json!({
            "template_id": format!("{}_{}", tool_type, variant),
            "template_text": format!("{}/{}: {{content}}", tool_type, variant),
        })
        .as_object()
        .cloned()
        .unwrap();
        PromptTemplate::from_record(key.clone(), record).ok()
    }

    fn list_variants(&self, tool_type: &str) -> BTreeSet<String> {
        self.keys
            .iter()
            .filter(|k| k.tool_type == tool_type)
            .map(|k| k.variant.clone())
            .collect()
    }

    fn list_tool_types(&self) -> BTreeSet<String> {
        self.keys.iter().map(|k| k.tool_type.clone()).collect()
    }
}

pub fn pipeline(gateway: Arc<CannedGateway>, prompts: StaticPrompts) -> Arc<AnalysisPipeline> {
    let service = GenerationService::new(gateway, GenerationSettings::default());
    Arc::new(AnalysisPipeline::new(Arc::new(service), Arc::new(prompts)))
}
