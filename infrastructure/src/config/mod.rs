//! Configuration file loading for localcrew
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. Environment variables `LOCALCREW_<SECTION>__<KEY>`
//! 2. `--config <path>` specified file
//! 3. Project root: `./localcrew.toml` or `./.localcrew.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/localcrew/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    FileConfig, FileLoggingConfig, FileOllamaConfig, FileOutputConfig, FilePromptsConfig,
    FileWatcherConfig, expand_tilde,
};
pub use loader::{ConfigLoader, ENV_PREFIX};
