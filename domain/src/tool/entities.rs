//! Tool domain entities

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};

/// Name of the argument every analysis tool takes
pub const CONTENT_ARG: &str = "content";

/// Name of the optional argument selecting a prompt variant
pub const VARIANT_ARG: &str = "variant";

/// Definition of an analysis tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Unique name of the tool (e.g., "extract_keywords")
    pub name: String,
    /// Human-readable description
    pub description: String,
    /// Parameter specifications
    pub parameters: Vec<ToolParameter>,
}

/// Parameter specification for a tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolParameter {
    /// Parameter name
    pub name: String,
    /// Parameter description
    pub description: String,
    /// Whether this parameter is required
    pub required: bool,
    /// Parameter type hint (e.g., "string", "number")
    pub param_type: String,
    /// Value used when the argument is omitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    /// Closed set of accepted values; empty means unrestricted
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allowed_values: Vec<String>,
}

impl ToolDefinition {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters: Vec::new(),
        }
    }

    pub fn with_parameter(mut self, param: ToolParameter) -> Self {
        self.parameters.push(param);
        self
    }

    pub fn parameter(&self, name: &str) -> Option<&ToolParameter> {
        self.parameters.iter().find(|p| p.name == name)
    }
}

impl ToolParameter {
    pub fn new(name: impl Into<String>, description: impl Into<String>, required: bool) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            required,
            param_type: "string".to_string(),
            default: None,
            allowed_values: Vec::new(),
        }
    }

    pub fn with_type(mut self, param_type: impl Into<String>) -> Self {
        self.param_type = param_type.into();
        self
    }

    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn with_allowed_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_values = values.into_iter().map(Into::into).collect();
        self
    }

    /// The mandatory `content` parameter
    pub fn content() -> Self {
        Self::new(CONTENT_ARG, "The text content to analyze", true)
    }

    /// Optional `variant` parameter defaulting to `default`
    pub fn variant(default: &str) -> Self {
        Self::new(VARIANT_ARG, "Prompt template variant to use", false).with_default(default)
    }
}

/// Definitions of the tools a registry exposes, ordered by name
#[derive(Debug, Clone, Default)]
pub struct ToolSpec {
    tools: BTreeMap<String, ToolDefinition>,
}

impl ToolSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(mut self, tool: ToolDefinition) -> Self {
        self.tools.insert(tool.name.clone(), tool);
        self
    }

    pub fn get(&self, name: &str) -> Option<&ToolDefinition> {
        self.tools.get(name)
    }

    pub fn all(&self) -> impl Iterator<Item = &ToolDefinition> {
        self.tools.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tools.keys().map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

/// A call to a tool with arguments
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    /// Name of the tool to call
    pub tool_name: String,
    /// Arguments passed to the tool
    pub arguments: HashMap<String, Value>,
}

impl ToolCall {
    pub fn new(tool_name: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
            arguments: HashMap::new(),
        }
    }

    /// Shorthand for a call carrying only `content`
    pub fn with_content(tool_name: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(tool_name).with_arg(CONTENT_ARG, content.into())
    }

    pub fn with_arg(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.arguments.insert(key.into(), value.into());
        self
    }

    /// Get a string argument
    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.arguments.get(key).and_then(|v| v.as_str())
    }

    /// Get a required string argument or return an error message
    pub fn require_string(&self, key: &str) -> Result<&str, String> {
        self.get_string(key)
            .ok_or_else(|| format!("Missing required argument: {}", key))
    }

    /// The `content` argument, empty when absent
    pub fn content(&self) -> &str {
        self.get_string(CONTENT_ARG).unwrap_or_default()
    }

    /// The `variant` argument, or `default` when omitted
    pub fn variant_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.get_string(VARIANT_ARG).unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tool_definition() {
        let tool = ToolDefinition::new("generate_summary", "Summarize content")
            .with_parameter(ToolParameter::content())
            .with_parameter(
                ToolParameter::variant("executive").with_allowed_values(["executive", "technical"]),
            );

        assert_eq!(tool.parameters.len(), 2);
        assert!(tool.parameter("content").unwrap().required);
        let variant = tool.parameter("variant").unwrap();
        assert!(!variant.required);
        assert_eq!(variant.default, Some(json!("executive")));
        assert_eq!(variant.allowed_values, vec!["executive", "technical"]);
    }

    #[test]
    fn test_tool_spec_is_sorted() {
        let spec = ToolSpec::new()
            .register(ToolDefinition::new("extract_themes", "Themes"))
            .register(ToolDefinition::new("analyze_code", "Code"))
            .register(ToolDefinition::new("extract_keywords", "Keywords"));

        let names: Vec<&str> = spec.names().collect();
        assert_eq!(names, vec!["analyze_code", "extract_keywords", "extract_themes"]);
        assert!(spec.get("unknown").is_none());
    }

    #[test]
    fn test_reregistration_replaces() {
        let spec = ToolSpec::new()
            .register(ToolDefinition::new("analyze_code", "old"))
            .register(ToolDefinition::new("analyze_code", "new"));
        assert_eq!(spec.len(), 1);
        assert_eq!(spec.get("analyze_code").unwrap().description, "new");
    }

    #[test]
    fn test_tool_call() {
        let call = ToolCall::with_content("extract_entities", "Ada Lovelace met Babbage")
            .with_arg("variant", "standard");

        assert_eq!(call.content(), "Ada Lovelace met Babbage");
        assert_eq!(call.variant_or("other"), "standard");
        assert!(call.require_string("missing").is_err());
        assert_eq!(ToolCall::new("x").variant_or("executive"), "executive");
    }
}
