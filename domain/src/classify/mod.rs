//! Content classification
//!
//! Files that land in the watched directory are classified from their text:
//! hashtags mark where the content came from, YAML-ish frontmatter carries
//! metadata, and the two together decide which stores receive the file.
//!
//! | Hashtag (any of) | Content type |
//! |------------------|--------------|
//! | `#youtube`, `#video` | `video` |
//! | `#article`, `#blog` | `article` |
//! | `#book` | `book` |
//! | `#process`, `#workflow` | `process` |
//! | none of the above | by extension: `.md`/`.txt` → `note`, `.pdf` → `document`, else `unknown` |
//!
//! The rows are checked top to bottom, so `#video #book` is a video.

mod classifier;
mod entities;

pub use classifier::{Classifier, HashtagClassifier};
pub use entities::{Classification, ContentType, FileRecord, StorageRouting};
