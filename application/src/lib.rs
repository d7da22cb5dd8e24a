//! Application layer for localcrew
//!
//! This crate contains use cases and port definitions.
//! It depends only on the domain layer.

pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use ports::{
    analysis_tool::AnalysisTool,
    directory_scanner::{DirectoryScanner, FileStat, ScanError},
    invocation_logger::{InvocationLogger, InvocationRecord, NoInvocationLogger},
    llm_gateway::{GatewayError, GenerationGateway},
    prompt_store::PromptStore,
    tool_executor::ToolExecutorPort,
    tool_schema::ToolSchemaPort,
    watch_notifier::{NoWatchProgress, WatchNotifier},
};
pub use use_cases::analyze::{AnalysisPipeline, PipelineTool, PromptSource};
pub use use_cases::generation::{
    GenerationError, GenerationService, GenerationSettings, JSON_INSTRUCTION, JsonOutput,
    ModelsReport,
};
pub use use_cases::watch_directory::{
    WatchDirectoryInput, WatchDirectoryUseCase, WatchState,
};
