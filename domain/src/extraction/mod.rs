//! Structured-output extraction from free-form model text

mod json;

pub use json::{ExtractionError, extract_json_object};
