//! Classification entities

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// Kind of content a file holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Video,
    Article,
    Book,
    Process,
    Note,
    Document,
    #[default]
    Unknown,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Video => "video",
            ContentType::Article => "article",
            ContentType::Book => "book",
            ContentType::Process => "process",
            ContentType::Note => "note",
            ContentType::Document => "document",
            ContentType::Unknown => "unknown",
        }
    }

    /// Type implied by a set of hashtags, checked in priority order
    pub fn from_hashtags(hashtags: &[String]) -> Option<Self> {
        let has_any = |tags: &[&str]| hashtags.iter().any(|h| tags.contains(&h.as_str()));

        if has_any(&["youtube", "video"]) {
            Some(ContentType::Video)
        } else if has_any(&["article", "blog"]) {
            Some(ContentType::Article)
        } else if has_any(&["book"]) {
            Some(ContentType::Book)
        } else if has_any(&["process", "workflow"]) {
            Some(ContentType::Process)
        } else {
            None
        }
    }

    /// Type implied by a file extension, with or without the leading dot
    pub fn from_extension(extension: &str) -> Self {
        match extension.trim_start_matches('.').to_ascii_lowercase().as_str() {
            "md" | "txt" => ContentType::Note,
            "pdf" => ContentType::Document,
            _ => ContentType::Unknown,
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which stores should receive a file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageRouting {
    pub obsidian: bool,
    pub vector_db: bool,
    pub sql_db: bool,
}

impl StorageRouting {
    /// Obsidian always; vector store when tagged; SQL for processes
    pub fn decide(hashtags: &[String], content_type: ContentType) -> Self {
        Self {
            obsidian: true,
            vector_db: !hashtags.is_empty(),
            sql_db: content_type == ContentType::Process,
        }
    }
}

impl Default for StorageRouting {
    fn default() -> Self {
        Self {
            obsidian: true,
            vector_db: false,
            sql_db: false,
        }
    }
}

/// Result of classifying one file's content
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Classification {
    pub content_type: ContentType,
    pub hashtags: Vec<String>,
    pub frontmatter: BTreeMap<String, String>,
    pub storage: StorageRouting,
}

impl Classification {
    /// Classification for a file whose content could not be read.
    ///
    /// Hashtags and frontmatter stay empty; the content type still comes
    /// from the extension.
    pub fn unreadable(extension: &str) -> Self {
        let content_type = ContentType::from_extension(extension);
        Self {
            content_type,
            hashtags: Vec::new(),
            frontmatter: BTreeMap::new(),
            storage: StorageRouting::decide(&[], content_type),
        }
    }
}

/// A newly detected file with its metadata and classification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileRecord {
    pub path: PathBuf,
    pub filename: String,
    /// Lower-cased, with the leading dot (".md"); empty when there is none
    pub extension: String,
    pub size: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub classification: Classification,
}

impl FileRecord {
    /// Record for `path` with name and extension derived from it
    pub fn new(path: impl Into<PathBuf>, size: u64) -> Self {
        let path = path.into();
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let extension = path
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy().to_lowercase()))
            .unwrap_or_default();

        Self {
            path,
            filename,
            extension,
            size,
            modified: None,
            created: None,
            classification: Classification::default(),
        }
    }

    pub fn with_times(
        mut self,
        modified: Option<DateTime<Utc>>,
        created: Option<DateTime<Utc>>,
    ) -> Self {
        self.modified = modified;
        self.created = created;
        self
    }

    pub fn with_classification(mut self, classification: Classification) -> Self {
        self.classification = classification;
        self
    }

    pub fn content_type(&self) -> ContentType {
        self.classification.content_type
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tags(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_hashtag_priority() {
        assert_eq!(
            ContentType::from_hashtags(&tags(&["book", "youtube"])),
            Some(ContentType::Video)
        );
        assert_eq!(
            ContentType::from_hashtags(&tags(&["workflow"])),
            Some(ContentType::Process)
        );
        assert_eq!(ContentType::from_hashtags(&tags(&["recipe"])), None);
    }

    #[test]
    fn test_extension_fallback() {
        assert_eq!(ContentType::from_extension(".MD"), ContentType::Note);
        assert_eq!(ContentType::from_extension("txt"), ContentType::Note);
        assert_eq!(ContentType::from_extension(".pdf"), ContentType::Document);
        assert_eq!(ContentType::from_extension(".png"), ContentType::Unknown);
        assert_eq!(ContentType::from_extension(""), ContentType::Unknown);
    }

    #[test]
    fn test_storage_routing() {
        assert_eq!(
            StorageRouting::decide(&tags(&["process"]), ContentType::Process),
            StorageRouting {
                obsidian: true,
                vector_db: true,
                sql_db: true
            }
        );
        assert_eq!(
            StorageRouting::decide(&[], ContentType::Note),
            StorageRouting::default()
        );
    }

    #[test]
    fn test_unreadable_keeps_extension_heuristic() {
        let pdf = Classification::unreadable(".pdf");
        assert_eq!(pdf.content_type, ContentType::Document);
        assert!(pdf.hashtags.is_empty());
        assert!(pdf.frontmatter.is_empty());
        assert_eq!(pdf.storage, StorageRouting::default());

        assert_eq!(Classification::unreadable(".txt").content_type, ContentType::Note);
        assert_eq!(Classification::unreadable(".bin").content_type, ContentType::Unknown);
    }

    #[test]
    fn test_file_record_from_path() {
        let record = FileRecord::new("/inbox/Meeting Notes.MD", 42);
        assert_eq!(record.filename, "Meeting Notes.MD");
        assert_eq!(record.extension, ".md");
        assert_eq!(record.content_type(), ContentType::Unknown);
    }

    #[test]
    fn test_file_record_serializes_flat() {
        let record = FileRecord::new("/inbox/a.md", 3);
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["content_type"], json!("unknown"));
        assert_eq!(
            value["storage"],
            json!({"obsidian": true, "vector_db": false, "sql_db": false})
        );
        assert!(value.get("modified").is_none());
    }
}
