//! JSON Schema tool converter.
//!
//! Default implementation of [`ToolSchemaPort`] that renders tool
//! definitions as provider-neutral JSON Schema descriptors.

use localcrew_application::ToolSchemaPort;
use localcrew_domain::tool::{ToolDefinition, ToolSpec};

/// Default implementation producing provider-neutral JSON Schema.
///
/// Handles param_type → JSON Schema type mapping:
/// - `"string"`, `"path"` → `"string"`
/// - `"number"` → `"number"`
/// - `"integer"` → `"integer"`
/// - `"boolean"` → `"boolean"`
/// - anything else → `"string"`
///
/// Defaults and allowed values are carried as `default` and `enum`.
pub struct JsonSchemaToolConverter;

impl ToolSchemaPort for JsonSchemaToolConverter {
    fn tool_to_schema(&self, tool: &ToolDefinition) -> serde_json::Value {
        let mut properties = serde_json::Map::new();
        let mut required = Vec::new();

        for param in &tool.parameters {
            let schema_type = match param.param_type.as_str() {
                "string" | "path" => "string",
                "number" => "number",
                "integer" => "integer",
                "boolean" => "boolean",
                _ => "string",
            };

            let mut prop = serde_json::Map::new();
            prop.insert("type".to_string(), serde_json::json!(schema_type));
            prop.insert(
                "description".to_string(),
                serde_json::json!(param.description),
            );
            if let Some(default) = &param.default {
                prop.insert("default".to_string(), default.clone());
            }
            if !param.allowed_values.is_empty() {
                prop.insert("enum".to_string(), serde_json::json!(param.allowed_values));
            }
            properties.insert(param.name.clone(), serde_json::Value::Object(prop));

            if param.required {
                required.push(serde_json::json!(param.name));
            }
        }

        serde_json::json!({
            "name": tool.name,
            "description": tool.description,
            "input_schema": {
                "type": "object",
                "properties": properties,
                "required": required,
            }
        })
    }

    fn all_tools_schema(&self, spec: &ToolSpec) -> Vec<serde_json::Value> {
        let mut tools: Vec<&ToolDefinition> = spec.all().collect();
        tools.sort_by_key(|t| &t.name);
        tools.into_iter().map(|t| self.tool_to_schema(t)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::summary::generate_summary_definition;
    use localcrew_domain::tool::ToolParameter;

    #[test]
    fn test_tool_to_schema() {
        let converter = JsonSchemaToolConverter;
        let schema = converter.tool_to_schema(&generate_summary_definition());

        assert_eq!(schema["name"], "generate_summary");
        assert_eq!(schema["input_schema"]["type"], "object");

        let content = &schema["input_schema"]["properties"]["content"];
        assert_eq!(content["type"], "string");
        assert!(content.get("default").is_none());

        let variant = &schema["input_schema"]["properties"]["variant"];
        assert_eq!(variant["default"], "executive");
        assert_eq!(variant["enum"], serde_json::json!(["executive", "technical"]));

        let required = schema["input_schema"]["required"].as_array().unwrap();
        assert_eq!(required, &vec![serde_json::json!("content")]);
    }

    #[test]
    fn test_param_type_mapping() {
        let tool = ToolDefinition::new("t", "test")
            .with_parameter(ToolParameter::new("p", "path", false).with_type("path"))
            .with_parameter(ToolParameter::new("n", "count", false).with_type("integer"))
            .with_parameter(ToolParameter::new("x", "mystery", false).with_type("blob"));

        let schema = JsonSchemaToolConverter.tool_to_schema(&tool);
        let props = &schema["input_schema"]["properties"];
        assert_eq!(props["p"]["type"], "string");
        assert_eq!(props["n"]["type"], "integer");
        assert_eq!(props["x"]["type"], "string");
        assert!(schema["input_schema"]["required"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_all_tools_schema_sorted() {
        let spec = ToolSpec::new()
            .register(ToolDefinition::new("zeta", "last").with_parameter(ToolParameter::content()))
            .register(ToolDefinition::new("alpha", "first"));

        let tools = JsonSchemaToolConverter.all_tools_schema(&spec);
        assert_eq!(tools.len(), 2);
        assert_eq!(tools[0]["name"], "alpha");
        assert_eq!(tools[1]["name"], "zeta");
    }
}
