//! Configuration management infrastructure
//!
//! Hierarchical configuration using figment:
//! - YAML file loading
//! - Environment variable overrides, including the legacy AGENTS_DIR and
//!   AGENT_REPO_URL variables
//! - Configuration validation

pub mod loader;

pub use loader::{ConfigError, ConfigLoader, LOCAL_CONFIG_PATH, PROJECT_CONFIG_PATH};
