//! Configuration management for pagesmith
//!
//! Hierarchical configuration with discovery and precedence:
//! explicit path > `PAGESMITH_CONFIG` env var > upward search for
//! `pagesmith.toml` > built-in defaults. TOML files carry `[paths]`,
//! `[deploy]`, and `[generator]` sections.

mod config;

pub use config::{Config, DeployConfig, GeneratorConfig, PathsConfig};
pub use pagesmith_utils::error::ConfigError;
