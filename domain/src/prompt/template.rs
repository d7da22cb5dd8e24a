//! Prompt template entity

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Variant used when a caller does not ask for one
pub const DEFAULT_VARIANT: &str = "standard";

/// The single substitution point in every template body
pub const CONTENT_PLACEHOLDER: &str = "{content}";

/// Replace the content placeholder in `template` with `content`.
///
/// Braces other than the placeholder are left untouched, so templates can
/// show literal JSON examples to the model.
pub fn render_content(template: &str, content: &str) -> String {
    template.replace(CONTENT_PLACEHOLDER, content)
}

/// Lookup key of a template in the store
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PromptKey {
    pub tool_type: String,
    pub variant: String,
}

impl PromptKey {
    pub fn new(tool_type: impl Into<String>, variant: impl Into<String>) -> Self {
        Self {
            tool_type: tool_type.into(),
            variant: variant.into(),
        }
    }

    /// Key for the [`DEFAULT_VARIANT`] of `tool_type`
    pub fn standard(tool_type: impl Into<String>) -> Self {
        Self::new(tool_type, DEFAULT_VARIANT)
    }
}

impl fmt::Display for PromptKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.tool_type, self.variant)
    }
}

/// A loaded prompt template.
///
/// Immutable once built. Tools never keep one around: they hold a
/// [`PromptKey`] and resolve it again on every invocation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PromptTemplate {
    pub key: PromptKey,
    pub template_id: String,
    pub description: String,
    pub version: String,
    pub template_text: String,
    /// Any other fields present in the stored record
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub extra: Map<String, Value>,
}

impl PromptTemplate {
    /// Build a template from a stored record.
    ///
    /// `template_text` is required and must be a string. `template_id`,
    /// `description` and `version` are optional; numbers are accepted and
    /// stringified (`version: 1.2` is common in hand-written files).
    pub fn from_record(key: PromptKey, mut record: Map<String, Value>) -> Result<Self, DomainError> {
        let template_text = match record.remove("template_text") {
            Some(Value::String(text)) => text,
            Some(_) => {
                return Err(DomainError::invalid_template(
                    &key.tool_type,
                    &key.variant,
                    "template_text must be a string",
                ));
            }
            None => {
                return Err(DomainError::invalid_template(
                    &key.tool_type,
                    &key.variant,
                    "missing template_text",
                ));
            }
        };

        let mut take_text = |field: &str| match record.remove(field) {
            Some(Value::String(s)) => s,
            Some(Value::Number(n)) => n.to_string(),
            Some(other) => {
                record.insert(field.to_string(), other);
                String::new()
            }
            None => String::new(),
        };

        let template_id = take_text("template_id");
        let description = take_text("description");
        let version = take_text("version");

        Ok(Self {
            key,
            template_id,
            description,
            version,
            template_text,
            extra: record,
        })
    }

    pub fn tool_type(&self) -> &str {
        &self.key.tool_type
    }

    pub fn variant(&self) -> &str {
        &self.key.variant
    }

    /// Number of content placeholders in the body (well-formed templates have one)
    pub fn placeholder_count(&self) -> usize {
        self.template_text.matches(CONTENT_PLACEHOLDER).count()
    }

    /// Substitute `content` into the body
    pub fn render(&self, content: &str) -> String {
        render_content(&self.template_text, content)
    }

    /// The full record, as it would be stored
    pub fn to_metadata(&self) -> Map<String, Value> {
        let mut record = self.extra.clone();
        record.insert("template_id".into(), Value::String(self.template_id.clone()));
        record.insert("description".into(), Value::String(self.description.clone()));
        record.insert("version".into(), Value::String(self.version.clone()));
        record.insert(
            "template_text".into(),
            Value::String(self.template_text.clone()),
        );
        record
    }
}
