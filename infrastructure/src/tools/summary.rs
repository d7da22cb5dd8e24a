//! generate_summary tool
//!
//! The only tool whose fallback depends on the call: the summary key is
//! named after the requested variant (`executive_summary`, `technical_summary`).

use async_trait::async_trait;
use localcrew_application::{AnalysisPipeline, AnalysisTool, PromptSource};
use localcrew_domain::{FallbackSchema, ToolCall, ToolDefinition, ToolParameter, ToolResult};
use std::sync::Arc;

pub const GENERATE_SUMMARY: &str = "generate_summary";
pub const SUMMARY_GENERATION: &str = "summary_generation";

pub const EXECUTIVE: &str = "executive";
pub const TECHNICAL: &str = "technical";

/// Get the tool definition for generate_summary
pub fn generate_summary_definition() -> ToolDefinition {
    ToolDefinition::new(GENERATE_SUMMARY, "Generates summaries of content")
        .with_parameter(ToolParameter::new(
            "content",
            "The text content to summarize",
            true,
        ))
        .with_parameter(ToolParameter::variant(EXECUTIVE).with_allowed_values([EXECUTIVE, TECHNICAL]))
}

/// Fallback keys for a summary in `variant`
pub fn summary_fallback(variant: &str) -> FallbackSchema {
    FallbackSchema::new()
        .with_text(format!("{}_summary", variant))
        .with_list("key_points")
}

pub struct SummaryTool {
    definition: ToolDefinition,
    default_fallback: FallbackSchema,
    source: PromptSource,
    pipeline: Arc<AnalysisPipeline>,
}

impl SummaryTool {
    pub fn new(pipeline: Arc<AnalysisPipeline>) -> Self {
        Self {
            definition: generate_summary_definition(),
            default_fallback: summary_fallback(EXECUTIVE),
            source: PromptSource::template(SUMMARY_GENERATION, EXECUTIVE),
            pipeline,
        }
    }
}

#[async_trait]
impl AnalysisTool for SummaryTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    /// Fallback for the default variant
    fn fallback(&self) -> &FallbackSchema {
        &self.default_fallback
    }

    async fn invoke(&self, call: &ToolCall) -> ToolResult {
        let fallback = summary_fallback(call.variant_or(EXECUTIVE));
        self.pipeline
            .run(&self.definition, &fallback, &self.source, call)
            .await
    }
}
