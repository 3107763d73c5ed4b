//! Configuration file loading for readwiser
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `READWISER_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./readwiser.toml` or `./.readwiser.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/readwiser/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, DEFAULT_DIGEST_COUNT, FileConfig, FileDigestConfig, FileLoggingConfig,
    FileScoringConfig, FileStorageConfig,
};
pub use loader::ConfigLoader;
