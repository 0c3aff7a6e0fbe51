//! Configuration for validation thresholds, rendering and the pipeline
//!
//! Provides types, discovery and parsing for `drill.toml`.

pub mod loader;
pub mod schema;

pub use loader::{find_config, load_config, merge_cli_overrides, CliOverrides, ConfigError};
pub use schema::*;
