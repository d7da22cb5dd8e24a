//! Tool Registry
//!
//! The [`ToolRegistry`] holds the analysis tools by name and implements
//! [`ToolExecutorPort`]. Execution never fails outright: unknown tools and
//! invalid arguments come back as [`ToolResult::Failure`].
//!
//! # Usage
//!
//! ```ignore
//! use localcrew_infrastructure::tools::{ToolRegistry, default_registry};
//!
//! let registry = default_registry(pipeline);
//! assert!(registry.has_tool("extract_keywords"));
//!
//! let call = ToolCall::with_content("generate_summary", text).with_arg("variant", "technical");
//! let result = registry.execute(&call).await;
//! println!("{}", serde_json::to_string_pretty(&result)?);
//! ```
//!
//! # Execution
//!
//! 1. Look the tool up by name (`NOT_FOUND` when absent)
//! 2. Validate arguments against its definition (`INVALID_ARGUMENT`)
//! 3. Invoke the tool
//! 4. Report the outcome to the [`InvocationLogger`]

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use chrono::Utc;
use localcrew_application::{
    AnalysisTool, InvocationLogger, InvocationRecord, NoInvocationLogger, ToolExecutorPort,
    ToolSchemaPort,
};
use localcrew_domain::tool::{
    DefaultToolValidator, ToolCall, ToolDefinition, ToolError, ToolResult, ToolSpec,
    ToolValidator, VARIANT_ARG,
};

use super::schema::JsonSchemaToolConverter;

/// Name-indexed set of analysis tools
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn AnalysisTool>>,
    /// Definitions of the registered tools
    tool_spec: ToolSpec,
    logger: Arc<dyn InvocationLogger>,
}

impl ToolRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
            tool_spec: ToolSpec::new(),
            logger: Arc::new(NoInvocationLogger),
        }
    }

    /// Report every execution to `logger`
    pub fn with_logger(mut self, logger: Arc<dyn InvocationLogger>) -> Self {
        self.logger = logger;
        self
    }

    /// Register a tool. A tool with the same name is replaced.
    pub fn register<T: AnalysisTool + 'static>(self, tool: T) -> Self {
        self.register_arc(Arc::new(tool))
    }

    /// Register a tool (Arc version)
    pub fn register_arc(mut self, tool: Arc<dyn AnalysisTool>) -> Self {
        let definition = tool.definition().clone();
        if self.tools.contains_key(&definition.name) {
            tracing::info!(tool = %definition.name, "Replacing registered tool");
        } else {
            tracing::debug!(tool = %definition.name, "Registered tool");
        }
        self.tools.insert(definition.name.clone(), tool);
        self.tool_spec = self.tool_spec.register(definition);
        self
    }

    /// Tool definitions, sorted by name
    pub fn definitions(&self) -> Vec<&ToolDefinition> {
        self.tool_spec.all().collect()
    }

    /// JSON schema of every tool, sorted by name
    pub fn schemas(&self) -> Vec<serde_json::Value> {
        JsonSchemaToolConverter.all_tools_schema(&self.tool_spec)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    async fn dispatch(&self, call: &ToolCall) -> ToolResult {
        let Some(tool) = self.tools.get(&call.tool_name) else {
            tracing::warn!(tool = %call.tool_name, "Unknown tool requested");
            return ToolResult::failure(&call.tool_name, ToolError::not_found(&call.tool_name));
        };

        if let Err(message) = DefaultToolValidator.validate(call, tool.definition()) {
            tracing::warn!(tool = %call.tool_name, "Invalid arguments: {}", message);
            return ToolResult::failure_with_fallback(
                &call.tool_name,
                ToolError::invalid_argument(message),
                tool.fallback(),
            );
        }

        tool.invoke(call).await
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ToolExecutorPort for ToolRegistry {
    fn tool_spec(&self) -> &ToolSpec {
        &self.tool_spec
    }

    async fn execute(&self, call: &ToolCall) -> ToolResult {
        let started_at = Utc::now();
        let start = Instant::now();

        let result = self.dispatch(call).await;

        self.logger.log(InvocationRecord {
            tool_name: call.tool_name.clone(),
            variant: call.get_string(VARIANT_ARG).map(String::from),
            success: result.is_success(),
            error: result.error().map(|e| e.message.clone()),
            duration_ms: start.elapsed().as_millis() as u64,
            started_at,
        });

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::default_registry;
    use crate::tools::test_support::{CannedGateway, StaticPrompts, pipeline};
    use localcrew_application::PipelineTool;
    use localcrew_application::PromptSource;
    use localcrew_domain::{FallbackSchema, InlinePrompt, ToolParameter};
    use serde_json::json;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingLogger {
        records: Mutex<Vec<InvocationRecord>>,
    }

    impl InvocationLogger for RecordingLogger {
        fn log(&self, record: InvocationRecord) {
            self.records.lock().unwrap().push(record);
        }
    }

    fn registry(reply: &str) -> ToolRegistry {
        let gateway = Arc::new(CannedGateway::replying(reply));
        default_registry(pipeline(gateway, StaticPrompts::shipped()))
    }

    #[test]
    fn test_default_registry_tools() {
        let registry = registry("{}");
        let names: Vec<&str> = registry.definitions().iter().map(|d| d.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "analyze_code",
                "analyze_sections",
                "extract_entities",
                "extract_keywords",
                "extract_processes",
                "extract_themes",
                "generate_summary",
                "identify_repurposing_opportunities",
            ]
        );
        assert_eq!(registry.schemas().len(), 8);
    }

    #[tokio::test]
    async fn test_unknown_tool() {
        let result = registry("{}").execute(&ToolCall::with_content("translate", "x")).await;

        assert!(!result.is_success());
        let error = result.error().unwrap();
        assert_eq!(error.code, "NOT_FOUND");
        assert_eq!(error.message, "Unknown tool: translate");
    }

    #[tokio::test]
    async fn test_argument_validation() {
        let registry = registry("{}");

        let missing = registry.execute(&ToolCall::new("extract_keywords")).await;
        assert_eq!(missing.error().unwrap().code, "INVALID_ARGUMENT");

        assert_eq!(missing.to_mapping()["primary_keywords"], json!([]));

        let unknown = registry
            .execute(&ToolCall::with_content("extract_entities", "x").with_arg("lang", "en"))
            .await;
        assert_eq!(unknown.error().unwrap().code, "INVALID_ARGUMENT");
        let mapping = unknown.to_mapping();
        for key in ["people", "organizations", "locations"] {
            assert_eq!(mapping[key], json!([]), "missing fallback key {}", key);
        }
        assert!(mapping["error"].as_str().unwrap().contains("lang"));

        let bad_variant = registry
            .execute(&ToolCall::with_content("generate_summary", "x").with_arg("variant", "casual"))
            .await;
        let error = bad_variant.error().unwrap();
        assert_eq!(error.code, "INVALID_ARGUMENT");
        assert!(error.message.contains("executive, technical"));
        assert_eq!(bad_variant.to_mapping()["executive_summary"], json!(""));
    }

    #[tokio::test]
    async fn test_execute_routes_by_name() {
        let result = registry(r#"{"primary_theme": "testing"}"#)
            .execute(&ToolCall::with_content("extract_themes", "unit tests everywhere"))
            .await;

        assert!(result.is_success());
        assert_eq!(result.tool_name(), "extract_themes");
        assert_eq!(result.to_mapping()["primary_theme"], "testing");
    }

    #[tokio::test]
    async fn test_reregistration_replaces() {
        let shared = pipeline(
            Arc::new(CannedGateway::replying("{}")),
            StaticPrompts::with(&[]),
        );
        let replacement = PipelineTool::new(
            ToolDefinition::new("extract_keywords", "Replacement")
                .with_parameter(ToolParameter::content()),
            FallbackSchema::new().with_list("keywords"),
            PromptSource::Inline(InlinePrompt::Keywords),
            shared.clone(),
        );

        let registry = default_registry(shared).register(replacement);

        assert_eq!(registry.len(), 8);
        assert_eq!(
            registry.get_tool("extract_keywords").unwrap().description,
            "Replacement"
        );
    }

    #[tokio::test]
    async fn test_invocations_are_logged() {
        let logger = Arc::new(RecordingLogger::default());
        let registry = registry("no json").with_logger(logger.clone());

        registry
            .execute(&ToolCall::with_content("analyze_code", "x").with_arg("variant", "technical"))
            .await;
        registry.execute(&ToolCall::with_content("missing", "x")).await;

        let records = logger.records.lock().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].tool_name, "analyze_code");
        assert_eq!(records[0].variant.as_deref(), Some("technical"));
        assert!(!records[0].success);
        assert_eq!(
            records[0].error.as_deref(),
            Some("Could not extract structured data from LLM response")
        );
        assert_eq!(records[1].error.as_deref(), Some("Unknown tool: missing"));
    }
}
