//! Model domain module
//!
//! Everything the system knows about the models served by the local
//! generation backend, and the rules for choosing one.
//!
//! # Overview
//!
//! The backend reports a list of [`ModelDescriptor`]s. That list is captured
//! as an immutable [`ModelCatalog`] snapshot; all name resolution happens
//! against a snapshot, never against live backend state:
//!
//! ```text
//! ┌──────────────┐  refresh   ┌──────────────┐  resolve   ┌──────────────┐
//! │ backend list │───────────▶│ ModelCatalog │───────────▶│ model name   │
//! │ (/api/tags)  │            │ (snapshot)   │            │ (never empty)│
//! └──────────────┘            └──────────────┘            └──────────────┘
//! ```
//!
//! # Name Matching
//!
//! A requested name matches a cached descriptor when it is identical, or when
//! the cached name is `"{requested}:{tag}"`. Asking for `llama3` therefore
//! matches `llama3:8b` and `llama3:latest`, while `llama3:8b` does not match
//! `llama3`.
//!
//! # Resolution Chains
//!
//! | Purpose | Order |
//! |---------|-------|
//! | Embedding | [`EMBEDDING_MODEL_PREFERENCES`] → configured default |
//! | Generation | configured default → [`GENERATION_MODEL_FALLBACKS`] → first cached → configured default |

pub mod catalog;
pub mod descriptor;
pub mod request;

pub use catalog::{
    EMBEDDING_MODEL_PREFERENCES, GENERATION_MODEL_FALLBACKS, ModelCatalog, PreferredModels,
    UNKNOWN_FAMILY,
};
pub use descriptor::ModelDescriptor;
pub use request::{EmbeddingRequest, GenerationOptions, GenerationRequest};
