//! Template-backed tools: extract_entities, analyze_code, analyze_sections,
//! identify_repurposing_opportunities
//!
//! Each one resolves `<tool_type>/<variant>` from the prompt store on every
//! call, with `standard` as the default variant.

use localcrew_application::{AnalysisPipeline, PipelineTool, PromptSource};
use localcrew_domain::{DEFAULT_VARIANT, FallbackSchema, ToolDefinition, ToolParameter};
use std::sync::Arc;

/// Tool name constants
pub const EXTRACT_ENTITIES: &str = "extract_entities";
pub const ANALYZE_CODE: &str = "analyze_code";
pub const ANALYZE_SECTIONS: &str = "analyze_sections";
pub const IDENTIFY_REPURPOSING: &str = "identify_repurposing_opportunities";

/// Prompt store tool types
pub const ENTITY_EXTRACTION: &str = "entity_extraction";
pub const CODE_ANALYSIS: &str = "code_analysis";
pub const SECTION_ANALYZER: &str = "section_analyzer";
pub const CONTENT_REPURPOSING: &str = "content_repurposing";

fn template_definition(name: &str, description: &str, content_description: &str) -> ToolDefinition {
    ToolDefinition::new(name, description)
        .with_parameter(ToolParameter::new("content", content_description, true))
        .with_parameter(ToolParameter::variant(DEFAULT_VARIANT))
}

/// Get the tool definition for extract_entities
pub fn extract_entities_definition() -> ToolDefinition {
    template_definition(
        EXTRACT_ENTITIES,
        "Extracts named entities and their relationships from content",
        "The text content to analyze for entity extraction",
    )
}

/// Get the tool definition for analyze_code
pub fn analyze_code_definition() -> ToolDefinition {
    template_definition(
        ANALYZE_CODE,
        "Analyzes code structure, quality, and functionality",
        "The code content to analyze",
    )
}

/// Get the tool definition for analyze_sections
pub fn analyze_sections_definition() -> ToolDefinition {
    template_definition(
        ANALYZE_SECTIONS,
        "Analyzes document structure, sections, and organization",
        "The document content to analyze for section analysis",
    )
}

/// Get the tool definition for identify_repurposing_opportunities
pub fn identify_repurposing_definition() -> ToolDefinition {
    template_definition(
        IDENTIFY_REPURPOSING,
        "Identifies content repurposing opportunities",
        "The text content to analyze for content repurposing",
    )
}

pub fn entities_tool(pipeline: Arc<AnalysisPipeline>) -> PipelineTool {
    PipelineTool::new(
        extract_entities_definition(),
        FallbackSchema::new()
            .with_list("people")
            .with_list("organizations")
            .with_list("locations"),
        PromptSource::template(ENTITY_EXTRACTION, DEFAULT_VARIANT),
        pipeline,
    )
}

pub fn code_tool(pipeline: Arc<AnalysisPipeline>) -> PipelineTool {
    PipelineTool::new(
        analyze_code_definition(),
        FallbackSchema::new().with_text("language").with_text("purpose"),
        PromptSource::template(CODE_ANALYSIS, DEFAULT_VARIANT),
        pipeline,
    )
}

pub fn sections_tool(pipeline: Arc<AnalysisPipeline>) -> PipelineTool {
    PipelineTool::new(
        analyze_sections_definition(),
        FallbackSchema::new()
            .with_text("document_type")
            .with_list("sections"),
        PromptSource::template(SECTION_ANALYZER, DEFAULT_VARIANT),
        pipeline,
    )
}

pub fn repurposing_tool(pipeline: Arc<AnalysisPipeline>) -> PipelineTool {
    PipelineTool::new(
        identify_repurposing_definition(),
        FallbackSchema::new()
            .with_text("content_type")
            .with_list("repurposing_opportunities"),
        PromptSource::template(CONTENT_REPURPOSING, DEFAULT_VARIANT),
        pipeline,
    )
}
