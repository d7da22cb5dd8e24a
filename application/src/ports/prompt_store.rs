//! Prompt store port
//!
//! Read-only access to versioned prompt templates. Lookups never fail:
//! a missing tool type, a missing variant and an unreadable record all look
//! the same to the caller (absent), and adapters log the difference.

use localcrew_domain::PromptTemplate;
use serde_json::{Map, Value};
use std::collections::BTreeSet;

/// Port for prompt template lookup
pub trait PromptStore: Send + Sync {
    /// Template for `tool_type`/`variant`, if one is stored and readable
    fn get_template(&self, tool_type: &str, variant: &str) -> Option<PromptTemplate>;

    /// The full stored record, including fields the template does not model
    fn get_metadata(&self, tool_type: &str, variant: &str) -> Option<Map<String, Value>> {
        self.get_template(tool_type, variant)
            .map(|template| template.to_metadata())
    }

    /// Variants stored for `tool_type`; empty when the type is unknown
    fn list_variants(&self, tool_type: &str) -> BTreeSet<String>;

    /// All tool types with a template directory
    fn list_tool_types(&self) -> BTreeSet<String>;
}
