//! Analysis tools
//!
//! Concrete [`AnalysisTool`](localcrew_application::AnalysisTool)s bound to a
//! shared [`AnalysisPipeline`], and the registry that dispatches to them.
//!
//! ## Tools
//!
//! - `inline`: prompt compiled in (keywords, themes, processes)
//! - `template`: prompt resolved from the store per call (entities, code,
//!   sections, repurposing)
//! - `summary`: template-backed, fallback key depends on the variant

pub mod inline;
pub mod schema;
pub mod summary;
pub mod template;

mod registry;

#[cfg(test)]
pub(crate) mod test_support;

pub use registry::ToolRegistry;
pub use schema::JsonSchemaToolConverter;
pub use summary::SummaryTool;

use localcrew_application::AnalysisPipeline;
use std::sync::Arc;

/// Registry holding every analysis tool, all sharing `pipeline`
pub fn default_registry(pipeline: Arc<AnalysisPipeline>) -> ToolRegistry {
    ToolRegistry::new()
        .register(inline::keywords_tool(pipeline.clone()))
        .register(inline::themes_tool(pipeline.clone()))
        .register(inline::processes_tool(pipeline.clone()))
        .register(template::entities_tool(pipeline.clone()))
        .register(template::code_tool(pipeline.clone()))
        .register(template::sections_tool(pipeline.clone()))
        .register(template::repurposing_tool(pipeline.clone()))
        .register(SummaryTool::new(pipeline))
}
