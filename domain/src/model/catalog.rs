//! Model catalog snapshot and resolution rules

use super::descriptor::ModelDescriptor;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// Embedding models in order of preference
pub const EMBEDDING_MODEL_PREFERENCES: [&str; 4] = [
    "nomic-embed-text",
    "granite-embedding:278m",
    "granite-embedding:30m",
    "all-MiniLM",
];

/// Generation models tried when the configured default is not served
pub const GENERATION_MODEL_FALLBACKS: [&str; 5] = [
    "llama3:8b",
    "llama3:8b-instruct",
    "llama3",
    "llama2",
    "mistral",
];

/// Family name used when the backend does not report one
pub const UNKNOWN_FAMILY: &str = "other";

/// Static table of recommended models per use, published in model reports.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreferredModels {
    pub generation: Vec<String>,
    pub embedding: Vec<String>,
    pub coding: Vec<String>,
}

impl Default for PreferredModels {
    fn default() -> Self {
        let owned = |names: &[&str]| names.iter().map(|s| s.to_string()).collect();
        Self {
            generation: owned(&["llama3:8b-instruct-fp16", "llama3:8b", "deepseek-coder:6.7b"]),
            embedding: owned(&["nomic-embed-text", "granite-embedding:278m"]),
            coding: owned(&["deepseek-coder:6.7b", "llama3:8b-instruct-fp16"]),
        }
    }
}

/// Immutable snapshot of the models the backend reported.
///
/// A catalog is never mutated after construction; refreshing produces a new
/// one. Callers hold the snapshot they resolved against, so a concurrent
/// refresh cannot change a decision that is already in flight.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelCatalog {
    models: Vec<ModelDescriptor>,
    refreshed_at: Option<DateTime<Utc>>,
}

impl ModelCatalog {
    /// A catalog that has never been populated
    pub fn empty() -> Self {
        Self::default()
    }

    /// Snapshot of `models`, stamped with the current time
    pub fn new(models: Vec<ModelDescriptor>) -> Self {
        Self {
            models,
            refreshed_at: Some(Utc::now()),
        }
    }

    pub fn models(&self) -> &[ModelDescriptor] {
        &self.models
    }

    pub fn names(&self) -> Vec<&str> {
        self.models.iter().map(|m| m.name.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    /// When the snapshot was taken (`None` for a never-populated catalog)
    pub fn refreshed_at(&self) -> Option<DateTime<Utc>> {
        self.refreshed_at
    }

    /// Exact or tagged-variant match against any cached model
    pub fn contains(&self, name: &str) -> bool {
        self.models.iter().any(|m| m.matches(name))
    }

    /// First preferred embedding model that is served, else `default`.
    pub fn resolve_embedding_model(&self, default: &str) -> String {
        EMBEDDING_MODEL_PREFERENCES
            .iter()
            .find(|name| self.contains(name))
            .map_or_else(|| default.to_string(), |name| name.to_string())
    }

    /// Best generation model for `default`.
    ///
    /// Never returns an empty name: when nothing matches and the catalog is
    /// empty, `default` is returned even though it is not known to be served.
    pub fn resolve_generation_model(&self, default: &str) -> String {
        if self.contains(default) {
            return default.to_string();
        }

        if let Some(name) = GENERATION_MODEL_FALLBACKS
            .iter()
            .find(|name| self.contains(name))
        {
            return name.to_string();
        }

        match self.models.first() {
            Some(first) if !first.name.is_empty() => first.name.clone(),
            _ => default.to_string(),
        }
    }

    /// Models whose primary or secondary family is `family`
    pub fn by_family(&self, family: &str) -> Vec<&ModelDescriptor> {
        self.models
            .iter()
            .filter(|m| m.belongs_to_family(family))
            .collect()
    }

    /// Models grouped by primary family, [`UNKNOWN_FAMILY`] when unreported
    pub fn grouped_by_family(&self) -> BTreeMap<String, Vec<ModelDescriptor>> {
        let mut groups: BTreeMap<String, Vec<ModelDescriptor>> = BTreeMap::new();
        for model in &self.models {
            let family = model
                .family
                .clone()
                .unwrap_or_else(|| UNKNOWN_FAMILY.to_string());
            groups.entry(family).or_default().push(model.clone());
        }
        groups
    }
}
