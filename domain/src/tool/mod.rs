//! Tool domain module
//!
//! Defines the uniform shape shared by every analysis capability: a
//! [`ToolDefinition`] (name, description, parameters) invoked through a
//! [`ToolCall`] and answered with a [`ToolResult`].
//!
//! ```text
//! ┌──────────────┐    ┌──────────────┐    ┌──────────────┐
//! │ ToolSpec     │───▶│ ToolCall     │───▶│ ToolResult   │
//! │ (registry)   │    │ (invocation) │    │ (mapping)    │
//! └──────────────┘    └──────────────┘    └──────┬───────┘
//!                                                │
//!                            Success ────────────┤ parsed model JSON
//!                            Failure ────────────┘ fallback keys + "error"
//! ```
//!
//! # Parameters
//!
//! Every tool takes a required `content` string. Template-backed tools also
//! take an optional `variant` with a per-tool default; `generate_summary`
//! restricts it to an enumerated set. [`DefaultToolValidator`] checks calls
//! against these declarations before a tool runs.
//!
//! # Architecture
//!
//! - **Domain** (this module): Pure definitions, no I/O
//! - **Application** (`ToolExecutorPort`, `AnalysisTool`): Port traits
//! - **Infrastructure** (`ToolRegistry`): Concrete tools bound to a generation service

pub mod entities;
pub mod traits;
pub mod value_objects;

pub use entities::{CONTENT_ARG, ToolCall, ToolDefinition, ToolParameter, ToolSpec, VARIANT_ARG};
pub use traits::{DefaultToolValidator, ToolValidator};
pub use value_objects::{ERROR_KEY, FallbackSchema, ToolError, ToolResult};
