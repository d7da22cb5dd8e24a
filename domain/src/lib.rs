//! Domain layer for localcrew
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Models
//!
//! A local generation backend serves some set of models. The [`ModelCatalog`]
//! snapshot records that set, and resolution rules pick a usable generation
//! or embedding model from it. Resolution never yields an empty name.
//!
//! ## Prompts and Tools
//!
//! Analysis tools turn content into structured JSON by rendering a
//! [`PromptTemplate`] (or a built-in [`InlinePrompt`]), sending it to the
//! backend, and extracting a JSON object from the reply. A tool invocation
//! always produces a [`ToolResult`]: failures carry the tool's
//! [`FallbackSchema`] keys and an `error` message.
//!
//! ## Classification
//!
//! Files arriving in a watched directory are classified by hashtags,
//! frontmatter and extension into a [`ContentType`] and a
//! [`StorageRouting`] decision.

pub mod classify;
pub mod config;
pub mod core;
pub mod extraction;
pub mod model;
pub mod prompt;
pub mod tool;

// Re-export commonly used types
pub use classify::{
    Classification, Classifier, ContentType, FileRecord, HashtagClassifier, StorageRouting,
};
pub use config::{ConfigIssue, ConfigIssueCode, OutputFormat, Severity};
pub use core::error::DomainError;
pub use extraction::{ExtractionError, extract_json_object};
pub use model::{
    EmbeddingRequest, GenerationOptions, GenerationRequest, ModelCatalog, ModelDescriptor,
    PreferredModels,
};
pub use prompt::{CONTENT_PLACEHOLDER, DEFAULT_VARIANT, InlinePrompt, PromptKey, PromptTemplate};
pub use tool::{
    DefaultToolValidator, FallbackSchema, ToolCall, ToolDefinition, ToolError, ToolParameter,
    ToolResult, ToolSpec, ToolValidator,
};
