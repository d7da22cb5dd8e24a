//! Output formatter trait

use localcrew_application::ModelsReport;
use localcrew_domain::{FileRecord, ToolDefinition, ToolResult};

/// Trait for rendering command results
pub trait OutputFormatter {
    /// Format the result of one tool invocation
    fn format_result(&self, result: &ToolResult) -> String;

    /// Format the list of available tools
    fn format_tools(&self, tools: &[&ToolDefinition]) -> String;

    /// Format the models report
    fn format_models(&self, report: &ModelsReport) -> String;

    /// Format one classified file from the watcher
    fn format_record(&self, record: &FileRecord) -> String;
}
