//! Filesystem-backed prompt template store.
//!
//! Layout: `<root>/<tool_type>/<variant>.yml` (`.yaml` is accepted too).
//! Nothing is cached; every lookup reads the file again.

use localcrew_application::PromptStore;
use localcrew_domain::{PromptKey, PromptTemplate};
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const EXTENSIONS: [&str; 2] = ["yml", "yaml"];

/// Prompt templates stored as YAML files under a root directory
#[derive(Debug, Clone)]
pub struct FsPromptStore {
    root: PathBuf,
}

impl FsPromptStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the stored file for a key, if one exists
    fn template_path(&self, tool_type: &str, variant: &str) -> Option<PathBuf> {
        if !is_plain_segment(tool_type) || !is_plain_segment(variant) {
            return None;
        }
        let dir = self.root.join(tool_type);
        EXTENSIONS
            .iter()
            .map(|ext| dir.join(format!("{}.{}", variant, ext)))
            .find(|path| path.is_file())
    }

    fn read_record(path: &Path) -> Option<Map<String, Value>> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) => {
                warn!("Failed to read prompt template {}: {}", path.display(), e);
                return None;
            }
        };

        match serde_yaml::from_str::<Value>(&text) {
            Ok(Value::Object(record)) => Some(record),
            Ok(_) => {
                warn!(
                    "Prompt template {} is not a mapping, ignoring",
                    path.display()
                );
                None
            }
            Err(e) => {
                warn!("Failed to parse prompt template {}: {}", path.display(), e);
                None
            }
        }
    }
}

/// A single path component that cannot escape the root
fn is_plain_segment(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\'])
}

impl PromptStore for FsPromptStore {
    fn get_template(&self, tool_type: &str, variant: &str) -> Option<PromptTemplate> {
        let path = self.template_path(tool_type, variant)?;
        debug!("Loading prompt template {}", path.display());
        let record = Self::read_record(&path)?;

        match PromptTemplate::from_record(PromptKey::new(tool_type, variant), record) {
            Ok(template) => Some(template),
            Err(e) => {
                warn!("Invalid prompt template {}: {}", path.display(), e);
                None
            }
        }
    }

    /// The stored record as written, without normalizing any field
    fn get_metadata(&self, tool_type: &str, variant: &str) -> Option<Map<String, Value>> {
        let path = self.template_path(tool_type, variant)?;
        Self::read_record(&path)
    }

    fn list_variants(&self, tool_type: &str) -> BTreeSet<String> {
        if !is_plain_segment(tool_type) {
            return BTreeSet::new();
        }
        let dir = self.root.join(tool_type);
        let Some(dir_str) = dir.to_str() else {
            warn!("Prompt directory {} is not valid UTF-8", dir.display());
            return BTreeSet::new();
        };
        let escaped = PathBuf::from(glob::Pattern::escape(dir_str));
        let mut variants = BTreeSet::new();

        for ext in EXTENSIONS {
            let pattern = escaped.join(format!("*.{}", ext));
            let pattern = pattern.to_string_lossy();
            let entries = match glob::glob(&pattern) {
                Ok(entries) => entries,
                Err(e) => {
                    warn!("Invalid prompt pattern {}: {}", pattern, e);
                    continue;
                }
            };
            for path in entries.flatten() {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    variants.insert(stem.to_string());
                }
            }
        }

        variants
    }

    fn list_tool_types(&self) -> BTreeSet<String> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(
                    "Failed to list prompt directory {}: {}",
                    self.root.display(),
                    e
                );
                return BTreeSet::new();
            }
        };

        entries
            .flatten()
            .filter(|entry| entry.path().is_dir())
            .filter_map(|entry| entry.file_name().to_str().map(String::from))
            .filter(|name| !name.starts_with('.'))
            .collect()
    }
}
