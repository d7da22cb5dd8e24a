//! Tool domain traits
//!
//! Contains pure domain logic traits for tool validation.
//! The async ToolExecutorPort is defined in the application layer (ports).

use super::entities::{ToolCall, ToolDefinition};
use serde_json::Value;

/// Validator for tool calls
///
/// This is a pure domain trait that validates tool calls
/// against their definitions without any I/O operations.
pub trait ToolValidator {
    /// Validate a tool call against its definition
    fn validate(&self, call: &ToolCall, definition: &ToolDefinition) -> Result<(), String>;
}

/// Default implementation of ToolValidator
#[derive(Debug, Clone, Default)]
pub struct DefaultToolValidator;

impl ToolValidator for DefaultToolValidator {
    fn validate(&self, call: &ToolCall, definition: &ToolDefinition) -> Result<(), String> {
        // Check that all required parameters are present
        for param in &definition.parameters {
            if param.required && !call.arguments.contains_key(&param.name) {
                return Err(format!(
                    "Missing required parameter '{}' for tool '{}'",
                    param.name, definition.name
                ));
            }
        }

        for (arg_name, value) in &call.arguments {
            let Some(param) = definition.parameter(arg_name) else {
                return Err(format!(
                    "Unknown parameter '{}' for tool '{}'",
                    arg_name, definition.name
                ));
            };

            if param.param_type == "string" && !value.is_string() {
                return Err(format!(
                    "Parameter '{}' for tool '{}' must be a string",
                    arg_name, definition.name
                ));
            }

            if !param.allowed_values.is_empty()
                && let Value::String(s) = value
                && !param.allowed_values.iter().any(|allowed| allowed == s)
            {
                return Err(format!(
                    "Invalid value '{}' for parameter '{}' of tool '{}' (expected one of: {})",
                    s,
                    arg_name,
                    definition.name,
                    param.allowed_values.join(", ")
                ));
            }
        }

        Ok(())
    }
}
