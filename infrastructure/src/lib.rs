//! Infrastructure layer for localcrew
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: the Ollama HTTP gateway, the filesystem
//! prompt store and directory scanner, the analysis tools, invocation
//! logging and configuration file loading.

pub mod config;
pub mod logging;
pub mod ollama;
pub mod prompts;
pub mod tools;
pub mod watcher;

// Re-export commonly used types
pub use config::{
    ConfigLoader, FileConfig, FileLoggingConfig, FileOllamaConfig, FileOutputConfig,
    FilePromptsConfig, FileWatcherConfig,
};
pub use logging::JsonlInvocationLogger;
pub use ollama::{OllamaError, OllamaGateway};
pub use prompts::FsPromptStore;
pub use tools::{JsonSchemaToolConverter, SummaryTool, ToolRegistry, default_registry};
pub use watcher::FsDirectoryScanner;
