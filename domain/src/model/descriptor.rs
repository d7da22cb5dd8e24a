//! Model descriptor value object

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Metadata about one model known to the generation backend.
///
/// `name` may carry a tag (`"family:tag"`, e.g. `"llama3:8b-instruct-fp16"`).
/// `details` keeps whatever else the provider reported (size, quantization, ...)
/// so nothing is lost when the catalog is exported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelDescriptor {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub families: Vec<String>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub details: Map<String, Value>,
}

impl ModelDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            family: None,
            families: Vec::new(),
            details: Map::new(),
        }
    }

    pub fn with_family(mut self, family: impl Into<String>) -> Self {
        self.family = Some(family.into());
        self
    }

    pub fn with_families(mut self, families: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.families = families.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }

    /// Name without the tag (`"llama3:8b"` → `"llama3"`)
    pub fn base_name(&self) -> &str {
        self.name.split_once(':').map_or(self.name.as_str(), |(base, _)| base)
    }

    /// Tag part of the name, if any (`"llama3:8b"` → `Some("8b")`)
    pub fn tag(&self) -> Option<&str> {
        self.name.split_once(':').map(|(_, tag)| tag)
    }

    /// Whether a request for `requested` can be served by this model.
    ///
    /// Exact match, or this model is a tagged variant of `requested`.
    pub fn matches(&self, requested: &str) -> bool {
        if requested.is_empty() {
            return false;
        }
        self.name == requested
            || self
                .name
                .strip_prefix(requested)
                .is_some_and(|rest| rest.starts_with(':'))
    }

    /// Whether this model belongs to `family` (primary or secondary families)
    pub fn belongs_to_family(&self, family: &str) -> bool {
        self.family.as_deref() == Some(family) || self.families.iter().any(|f| f == family)
    }
}
