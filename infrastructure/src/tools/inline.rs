//! Inline-prompt tools: extract_keywords, extract_themes, extract_processes
//!
//! Their prompt bodies are compiled in, so they never consult the prompt
//! store and take no `variant`.

use localcrew_application::{AnalysisPipeline, PipelineTool, PromptSource};
use localcrew_domain::{FallbackSchema, InlinePrompt, ToolDefinition, ToolParameter};
use std::sync::Arc;

/// Tool name constants
pub const EXTRACT_KEYWORDS: &str = "extract_keywords";
pub const EXTRACT_THEMES: &str = "extract_themes";
pub const EXTRACT_PROCESSES: &str = "extract_processes";

/// Get the tool definition for extract_keywords
pub fn extract_keywords_definition() -> ToolDefinition {
    ToolDefinition::new(
        EXTRACT_KEYWORDS,
        "Extracts keywords, technical terms, and marketable concepts from content",
    )
    .with_parameter(ToolParameter::new(
        "content",
        "The text content to analyze for keyword extraction",
        true,
    ))
}

/// Get the tool definition for extract_themes
pub fn extract_themes_definition() -> ToolDefinition {
    ToolDefinition::new(
        EXTRACT_THEMES,
        "Extracts themes, domains, and frameworks from content",
    )
    .with_parameter(ToolParameter::new(
        "content",
        "The text content to analyze for theme extraction",
        true,
    ))
}

/// Get the tool definition for extract_processes
pub fn extract_processes_definition() -> ToolDefinition {
    ToolDefinition::new(
        EXTRACT_PROCESSES,
        "Extracts processes, workflows, and step-by-step instructions from content",
    )
    .with_parameter(ToolParameter::new(
        "content",
        "The text content to analyze for process extraction",
        true,
    ))
}

pub fn keywords_tool(pipeline: Arc<AnalysisPipeline>) -> PipelineTool {
    PipelineTool::new(
        extract_keywords_definition(),
        FallbackSchema::new().with_list("primary_keywords"),
        PromptSource::Inline(InlinePrompt::Keywords),
        pipeline,
    )
}

pub fn themes_tool(pipeline: Arc<AnalysisPipeline>) -> PipelineTool {
    PipelineTool::new(
        extract_themes_definition(),
        FallbackSchema::new().with_text("primary_theme"),
        PromptSource::Inline(InlinePrompt::Themes),
        pipeline,
    )
}

pub fn processes_tool(pipeline: Arc<AnalysisPipeline>) -> PipelineTool {
    PipelineTool::new(
        extract_processes_definition(),
        FallbackSchema::new()
            .with_list("identified_processes")
            .with_list("workflows")
            .with_list("decision_points"),
        PromptSource::Inline(InlinePrompt::Processes),
        pipeline,
    )
}
