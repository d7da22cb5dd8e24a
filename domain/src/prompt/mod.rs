//! Prompt domain
//!
//! Versioned prompt templates keyed by `(tool_type, variant)`, plus the fixed
//! prompt bodies of the tools that do not read from the template store.

mod inline;
mod template;

pub use inline::InlinePrompt;
pub use template::{CONTENT_PLACEHOLDER, DEFAULT_VARIANT, PromptKey, PromptTemplate, render_content};
