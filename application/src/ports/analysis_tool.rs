//! Analysis tool port
//!
//! One analysis capability: a definition callers can inspect, the fallback
//! keys it promises on failure, and an invocation that never fails.

use async_trait::async_trait;
use localcrew_domain::{FallbackSchema, ToolCall, ToolDefinition, ToolResult};

#[async_trait]
pub trait AnalysisTool: Send + Sync {
    fn definition(&self) -> &ToolDefinition;

    fn fallback(&self) -> &FallbackSchema;

    /// Run the tool. Failures are reported inside the [`ToolResult`].
    async fn invoke(&self, call: &ToolCall) -> ToolResult;
}
