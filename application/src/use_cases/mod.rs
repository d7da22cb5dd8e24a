//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod analyze;
pub mod generation;
pub mod watch_directory;
