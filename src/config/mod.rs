//! Configuration module.
//!
//! Settings resolve through a precedence chain:
//! defaults → config file → environment variables → CLI arguments.
//!
//! The ~30 Hz refresh cadence is deliberately absent: it is a compile-time
//! constant (`view::constants::TARGET_INTERVAL`), not a configuration
//! option.

pub mod loader;

pub use loader::{
    apply_cli_overrides, apply_env_overrides, load_config_file, merge_config, CliOverrides,
    ConfigError, ConfigFile, ResolvedConfig,
};
