//! Analysis pipeline use case.
//!
//! Every analysis tool runs the same five steps; only the prompt source,
//! the definition and the fallback keys differ:
//!
//! ```text
//! ToolCall { content, variant? }
//!   │
//!   ├─ 1. prompt   Inline(body) | Template(tool_type, variant) ── missing ──▶ Failure (no fallback)
//!   ├─ 2. render   "{content}" → content
//!   ├─ 3. generate GenerationService::generate                ── error ───▶ Failure + fallback
//!   ├─ 4. extract  extract_json_object                        ── error ───▶ Failure + fallback
//!   └─ 5. Success(parsed object, unvalidated)
//! ```
//!
//! Templates are looked up again on every call, so edits to the prompt
//! directory apply to the next invocation without a restart.

use crate::ports::analysis_tool::AnalysisTool;
use crate::ports::prompt_store::PromptStore;
use crate::use_cases::generation::GenerationService;
use async_trait::async_trait;
use localcrew_domain::core::string::truncate;
use localcrew_domain::{
    FallbackSchema, GenerationOptions, InlinePrompt, ToolCall, ToolDefinition, ToolError,
    ToolResult, extract_json_object,
};
use std::sync::Arc;
use tracing::{debug, warn};

/// Where a tool's prompt comes from
#[derive(Debug, Clone, PartialEq)]
pub enum PromptSource {
    /// Compiled-in prompt body
    Inline(InlinePrompt),
    /// Stored template, re-resolved per call
    Template {
        tool_type: String,
        default_variant: String,
    },
}

impl PromptSource {
    pub fn template(tool_type: impl Into<String>, default_variant: impl Into<String>) -> Self {
        PromptSource::Template {
            tool_type: tool_type.into(),
            default_variant: default_variant.into(),
        }
    }

    /// Variant a call resolves to; `None` for inline prompts
    pub fn variant_for<'a>(&'a self, call: &'a ToolCall) -> Option<&'a str> {
        match self {
            PromptSource::Inline(_) => None,
            PromptSource::Template {
                default_variant, ..
            } => Some(call.variant_or(default_variant)),
        }
    }
}

/// Shared prompt → generate → extract pipeline
pub struct AnalysisPipeline {
    generation: Arc<GenerationService>,
    prompts: Arc<dyn PromptStore>,
    options: GenerationOptions,
}

impl AnalysisPipeline {
    pub fn new(generation: Arc<GenerationService>, prompts: Arc<dyn PromptStore>) -> Self {
        Self {
            generation,
            prompts,
            options: GenerationOptions::default(),
        }
    }

    /// Generation options applied to every tool request
    pub fn with_options(mut self, options: GenerationOptions) -> Self {
        self.options = options;
        self
    }

    pub fn generation(&self) -> &GenerationService {
        &self.generation
    }

    pub fn prompts(&self) -> &dyn PromptStore {
        self.prompts.as_ref()
    }

    /// Rendered prompt for `call`, or the template-not-found error
    pub fn render(&self, source: &PromptSource, call: &ToolCall) -> Result<String, ToolError> {
        match source {
            PromptSource::Inline(prompt) => Ok(prompt.render(call.content())),
            PromptSource::Template {
                tool_type,
                default_variant,
            } => {
                let variant = call.variant_or(default_variant);
                self.prompts
                    .get_template(tool_type, variant)
                    .map(|template| template.render(call.content()))
                    .ok_or_else(|| ToolError::template_not_found(tool_type, variant))
            }
        }
    }

    /// Run the pipeline for one call. Never fails.
    pub async fn run(
        &self,
        definition: &ToolDefinition,
        fallback: &FallbackSchema,
        source: &PromptSource,
        call: &ToolCall,
    ) -> ToolResult {
        let name = definition.name.as_str();

        let prompt = match self.render(source, call) {
            Ok(prompt) => prompt,
            Err(error) => {
                warn!(tool = name, "{}", error.message);
                return ToolResult::failure(name, error);
            }
        };

        debug!(tool = name, prompt_len = prompt.len(), "Running analysis tool");

        let response = match self.generation.generate(&prompt, None, &self.options).await {
            Ok(response) => response,
            Err(e) => {
                warn!(tool = name, "Generation failed: {}", e);
                return ToolResult::failure_with_fallback(
                    name,
                    ToolError::generation_failed(&e),
                    fallback,
                );
            }
        };

        match extract_json_object(&response) {
            Ok(payload) => ToolResult::success(name, payload),
            Err(e) => {
                warn!(
                    tool = name,
                    "Could not parse model output ({}): {}",
                    e,
                    truncate(&response, 200)
                );
                ToolResult::failure_with_fallback(name, ToolError::from_extraction(&e), fallback)
            }
        }
    }
}

/// An [`AnalysisTool`] that is nothing more than pipeline configuration
pub struct PipelineTool {
    definition: ToolDefinition,
    fallback: FallbackSchema,
    source: PromptSource,
    pipeline: Arc<AnalysisPipeline>,
}

impl PipelineTool {
    pub fn new(
        definition: ToolDefinition,
        fallback: FallbackSchema,
        source: PromptSource,
        pipeline: Arc<AnalysisPipeline>,
    ) -> Self {
        Self {
            definition,
            fallback,
            source,
            pipeline,
        }
    }

    pub fn source(&self) -> &PromptSource {
        &self.source
    }
}

#[async_trait]
impl AnalysisTool for PipelineTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    fn fallback(&self) -> &FallbackSchema {
        &self.fallback
    }

    async fn invoke(&self, call: &ToolCall) -> ToolResult {
        self.pipeline
            .run(&self.definition, &self.fallback, &self.source, call)
            .await
    }
}
