//! Hashtag and frontmatter classifier

use super::entities::{Classification, ContentType, StorageRouting};
use regex::Regex;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::LazyLock;

static HASHTAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#(\w+)").expect("hashtag pattern is valid"));

static FRONTMATTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\A---\s+(.*?)\s+---").expect("frontmatter pattern is valid"));

/// Classifies file content for storage routing
pub trait Classifier: Send + Sync {
    /// Lower-cased, de-duplicated hashtags in first-seen order
    fn detect_hashtags(&self, content: &str) -> Vec<String>;

    /// Flat `key: value` pairs from a leading `---` block
    fn extract_frontmatter(&self, content: &str) -> BTreeMap<String, String>;

    /// Full classification of `content` read from `path`
    fn classify(&self, path: &Path, content: &str) -> Classification {
        let hashtags = self.detect_hashtags(content);
        let frontmatter = self.extract_frontmatter(content);
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().into_owned())
            .unwrap_or_default();

        let content_type = ContentType::from_hashtags(&hashtags)
            .unwrap_or_else(|| ContentType::from_extension(&extension));
        let storage = StorageRouting::decide(&hashtags, content_type);

        Classification {
            content_type,
            hashtags,
            frontmatter,
            storage,
        }
    }
}

/// Regex-based [`Classifier`]
#[derive(Debug, Clone, Copy, Default)]
pub struct HashtagClassifier;

impl HashtagClassifier {
    pub fn new() -> Self {
        Self
    }
}

impl Classifier for HashtagClassifier {
    fn detect_hashtags(&self, content: &str) -> Vec<String> {
        let mut hashtags: Vec<String> = Vec::new();
        for capture in HASHTAG.captures_iter(content) {
            let tag = capture[1].to_lowercase();
            if !hashtags.contains(&tag) {
                hashtags.push(tag);
            }
        }
        hashtags
    }

    fn extract_frontmatter(&self, content: &str) -> BTreeMap<String, String> {
        let Some(block) = FRONTMATTER.captures(content).and_then(|c| c.get(1)) else {
            return BTreeMap::new();
        };

        block
            .as_str()
            .lines()
            .filter_map(|line| line.split_once(':'))
            .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
            .collect()
    }
}
