//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod analysis_tool;
pub mod directory_scanner;
pub mod invocation_logger;
pub mod llm_gateway;
pub mod prompt_store;
pub mod tool_executor;
pub mod tool_schema;
pub mod watch_notifier;
