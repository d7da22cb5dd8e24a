//! Tool domain value objects: immutable result and error types
//!
//! These types form the **output side** of a tool invocation. Every
//! invocation produces a [`ToolResult`]; ordinary model, template and parsing
//! failures are values, never errors or panics.
//!
//! On failure a tool returns its [`FallbackSchema`] merged with an `error`
//! key, so a consumer can always index the keys it expects:
//!
//! ```text
//! Success  → { <whatever the model produced> }
//! Failure  → { <fallback keys with empty values>, "error": "<message>" }
//! ```

use crate::extraction::ExtractionError;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

/// Key carrying the failure message in a flattened result
pub const ERROR_KEY: &str = "error";

/// Error that occurred during tool invocation.
///
/// | Code | Description |
/// |------|-------------|
/// | `TEMPLATE_NOT_FOUND` | No prompt template for the requested tool type / variant |
/// | `NO_STRUCTURED_DATA` | The model output contained no `{ ... }` span |
/// | `PARSE_FAILED` | The span was found but is not valid JSON |
/// | `GENERATION_FAILED` | The generation backend could not produce a completion |
/// | `INVALID_ARGUMENT` | Missing/wrong parameters |
/// | `NOT_FOUND` | Unknown tool |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolError {
    /// Error code (e.g., "NOT_FOUND", "PARSE_FAILED")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Additional details (the raw model response for extraction failures)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ToolError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    // Common error constructors
    pub fn not_found(tool_name: impl Into<String>) -> Self {
        Self::new("NOT_FOUND", format!("Unknown tool: {}", tool_name.into()))
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new("INVALID_ARGUMENT", message)
    }

    pub fn template_not_found(tool_type: &str, variant: &str) -> Self {
        Self::new(
            "TEMPLATE_NOT_FOUND",
            format!("Prompt template not found for {}/{}", tool_type, variant),
        )
    }

    pub fn generation_failed(detail: impl std::fmt::Display) -> Self {
        Self::new(
            "GENERATION_FAILED",
            format!("Error processing response: {}", detail),
        )
    }

    /// Map an extraction failure, keeping the raw response as details
    pub fn from_extraction(err: &ExtractionError) -> Self {
        let error = match err {
            ExtractionError::NoJson { .. } => Self::new(
                "NO_STRUCTURED_DATA",
                "Could not extract structured data from LLM response",
            ),
            ExtractionError::Parse { message, .. } => Self::new(
                "PARSE_FAILED",
                format!("Error processing response: {}", message),
            ),
        };
        error.with_details(err.raw_response())
    }
}

impl std::fmt::Display for ToolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for ToolError {}

/// Ordered empty-valued keys a tool returns when extraction fails.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FallbackSchema {
    fields: Vec<(String, Value)>,
}

impl FallbackSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a list-valued key (`[]`)
    pub fn with_list(mut self, key: impl Into<String>) -> Self {
        self.fields.push((key.into(), Value::Array(Vec::new())));
        self
    }

    /// Add a text-valued key (`""`)
    pub fn with_text(mut self, key: impl Into<String>) -> Self {
        self.fields.push((key.into(), Value::String(String::new())));
        self
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn to_mapping(&self) -> Map<String, Value> {
        self.fields.iter().cloned().collect()
    }
}

/// Outcome of a tool invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolResult {
    /// The model output parsed into a JSON object
    Success {
        tool_name: String,
        payload: Map<String, Value>,
    },
    /// Something went wrong; `fallback` holds the empty-valued keys
    Failure {
        tool_name: String,
        error: ToolError,
        fallback: Map<String, Value>,
    },
}

impl ToolResult {
    /// Create a successful result
    pub fn success(tool_name: impl Into<String>, payload: Map<String, Value>) -> Self {
        ToolResult::Success {
            tool_name: tool_name.into(),
            payload,
        }
    }

    /// Create a failed result without fallback keys
    pub fn failure(tool_name: impl Into<String>, error: ToolError) -> Self {
        ToolResult::Failure {
            tool_name: tool_name.into(),
            error,
            fallback: Map::new(),
        }
    }

    /// Create a failed result carrying the tool's fallback keys
    pub fn failure_with_fallback(
        tool_name: impl Into<String>,
        error: ToolError,
        fallback: &FallbackSchema,
    ) -> Self {
        ToolResult::Failure {
            tool_name: tool_name.into(),
            error,
            fallback: fallback.to_mapping(),
        }
    }

    pub fn tool_name(&self) -> &str {
        match self {
            ToolResult::Success { tool_name, .. } | ToolResult::Failure { tool_name, .. } => {
                tool_name
            }
        }
    }

    /// Check if the invocation was successful
    pub fn is_success(&self) -> bool {
        matches!(self, ToolResult::Success { .. })
    }

    /// Get the error
    pub fn error(&self) -> Option<&ToolError> {
        match self {
            ToolResult::Success { .. } => None,
            ToolResult::Failure { error, .. } => Some(error),
        }
    }

    /// Flatten into the mapping callers consume.
    ///
    /// A failure becomes its fallback keys plus `error`. An `error` key the
    /// model produced itself is left alone on success.
    pub fn to_mapping(&self) -> Map<String, Value> {
        match self {
            ToolResult::Success { payload, .. } => payload.clone(),
            ToolResult::Failure {
                error, fallback, ..
            } => {
                let mut mapping = fallback.clone();
                mapping.insert(ERROR_KEY.to_string(), Value::String(error.message.clone()));
                mapping
            }
        }
    }
}

impl Serialize for ToolResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_mapping().serialize(serializer)
    }
}
