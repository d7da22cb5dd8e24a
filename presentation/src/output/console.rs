//! Console output formatter for tool results, models and classified files

use crate::output::formatter::OutputFormatter;
use colored::Colorize;
use localcrew_application::ModelsReport;
use localcrew_domain::{
    ConfigIssue, FileRecord, OutputFormat, Severity, ToolDefinition, ToolResult,
};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::collections::BTreeSet;

/// Formats results for console display in the selected [`OutputFormat`]
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleFormatter {
    format: OutputFormat,
}

impl ConsoleFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Turn ANSI colors on or off for all console output
    pub fn set_color(enabled: bool) {
        colored::control::set_override(enabled);
    }

    /// Serialize `value` as JSON or YAML; `None` in pretty mode
    fn structured<T: Serialize>(&self, value: &T) -> Option<String> {
        match self.format {
            OutputFormat::Pretty => None,
            OutputFormat::Json => Some(
                serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string()),
            ),
            OutputFormat::Yaml => {
                Some(serde_yaml::to_string(value).unwrap_or_else(|_| "{}\n".to_string()))
            }
        }
    }

    /// Format prompt templates grouped by tool type
    pub fn format_prompts(&self, prompts: &BTreeMap<String, BTreeSet<String>>) -> String {
        if let Some(text) = self.structured(prompts) {
            return text;
        }
        if prompts.is_empty() {
            return format!("{}\n", "No prompt templates found".yellow());
        }

        let mut output = Self::header("Prompt Templates");
        for (tool_type, variants) in prompts {
            let variants: Vec<&str> = variants.iter().map(String::as_str).collect();
            output.push_str(&format!(
                "  {:<24} {}\n",
                tool_type.bold(),
                variants.join(", ")
            ));
        }
        output
    }

    /// Format configuration issues, one per line
    pub fn format_issues(issues: &[ConfigIssue]) -> String {
        issues
            .iter()
            .map(|issue| match issue.severity {
                Severity::Error => format!("{} {}\n", "error:".red().bold(), issue.message),
                Severity::Warning => {
                    format!("{} {}\n", "warning:".yellow().bold(), issue.message)
                }
            })
            .collect()
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}\n", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn value_line(key: &str, value: &Value) -> String {
        match value {
            Value::Array(items) if items.is_empty() => {
                format!("{} {}\n", format!("{}:", key).cyan().bold(), "(none)".dimmed())
            }
            Value::Array(items) => {
                let mut out = format!("{}\n", format!("{}:", key).cyan().bold());
                for item in items {
                    out.push_str(&format!("  * {}\n", Self::inline_value(item)));
                }
                out
            }
            Value::String(s) if s.is_empty() => {
                format!("{} {}\n", format!("{}:", key).cyan().bold(), "(empty)".dimmed())
            }
            other => format!(
                "{} {}\n",
                format!("{}:", key).cyan().bold(),
                Self::inline_value(other)
            ),
        }
    }

    fn inline_value(value: &Value) -> String {
        match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }

    fn flag(enabled: bool) -> String {
        if enabled {
            "yes".green().to_string()
        } else {
            "no".dimmed().to_string()
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_result(&self, result: &ToolResult) -> String {
        if let Some(text) = self.structured(result) {
            return text;
        }

        let mut output = String::new();
        match result.error() {
            None => output.push_str(&format!(
                "{} {}\n\n",
                "v".green().bold(),
                result.tool_name().bold()
            )),
            Some(error) => output.push_str(&format!(
                "{} {} {}\n\n",
                "x".red().bold(),
                result.tool_name().bold(),
                format!("[{}] {}", error.code, error.message).red()
            )),
        }

        let mapping = result.to_mapping();
        for (key, value) in &mapping {
            if result.error().is_some() && key == localcrew_domain::tool::ERROR_KEY {
                continue;
            }
            output.push_str(&Self::value_line(key, value));
        }
        output
    }

    fn format_tools(&self, tools: &[&ToolDefinition]) -> String {
        if let Some(text) = self.structured(&tools) {
            return text;
        }

        let mut output = Self::header("Analysis Tools");
        for tool in tools {
            output.push_str(&format!(
                "\n{}\n  {}\n",
                tool.name.yellow().bold(),
                tool.description
            ));
            for param in &tool.parameters {
                let mut line = format!(
                    "    {} ({}{})",
                    param.name.bold(),
                    param.param_type,
                    if param.required { ", required" } else { "" }
                );
                if let Some(default) = &param.default {
                    line.push_str(&format!(" default={}", Self::inline_value(default)));
                }
                if !param.allowed_values.is_empty() {
                    line.push_str(&format!(" one of: {}", param.allowed_values.join(", ")));
                }
                output.push_str(&line);
                output.push('\n');
            }
        }
        output
    }

    fn format_models(&self, report: &ModelsReport) -> String {
        if let Some(text) = self.structured(report) {
            return text;
        }

        let mut output = Self::header("Models");
        output.push_str(&format!(
            "{} {}\n{} {}\n",
            "Generation:".cyan().bold(),
            report.default_generation_model,
            "Embedding: ".cyan().bold(),
            report.default_embedding_model
        ));

        output.push_str(&Self::section_header("Available by family"));
        if report.models_by_family.is_empty() {
            output.push_str(&format!("  {}\n", "(backend reported no models)".dimmed()));
        }
        for (family, models) in &report.models_by_family {
            let names: Vec<&str> = models.iter().map(|m| m.name.as_str()).collect();
            output.push_str(&format!("  {:<16} {}\n", family.bold(), names.join(", ")));
        }

        output.push_str(&Self::section_header("Recommended"));
        let preferred = &report.preferred_models;
        for (label, names) in [
            ("generation", &preferred.generation),
            ("embedding", &preferred.embedding),
            ("coding", &preferred.coding),
        ] {
            output.push_str(&format!("  {:<16} {}\n", label.bold(), names.join(", ")));
        }
        output
    }

    fn format_record(&self, record: &FileRecord) -> String {
        if let Some(text) = self.structured(record) {
            return text;
        }

        let classification = &record.classification;
        let mut output = format!(
            "{} {} {}\n",
            "+".green().bold(),
            record.filename.bold(),
            format!("({}, {} bytes)", classification.content_type, record.size).dimmed()
        );
        if !classification.hashtags.is_empty() {
            let tags: Vec<String> = classification
                .hashtags
                .iter()
                .map(|t| format!("#{}", t))
                .collect();
            output.push_str(&format!("    tags: {}\n", tags.join(" ").cyan()));
        }
        for (key, value) in &classification.frontmatter {
            output.push_str(&format!("    {}: {}\n", key.dimmed(), value));
        }
        let storage = &classification.storage;
        output.push_str(&format!(
            "    obsidian: {}  vector_db: {}  sql_db: {}\n",
            Self::flag(storage.obsidian),
            Self::flag(storage.vector_db),
            Self::flag(storage.sql_db)
        ));
        output
    }
}
