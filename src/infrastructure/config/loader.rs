use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use crate::domain::models::config::Config;

/// Project config file, relative to the working directory.
pub const PROJECT_CONFIG_PATH: &str = ".agent-sync/config.yaml";

/// Optional uncommitted overrides next to the project config.
pub const LOCAL_CONFIG_PATH: &str = ".agent-sync/local.yaml";

/// Prefix for structured environment overrides (`__` separates nested keys).
pub const ENV_PREFIX: &str = "AGENT_SYNC_";

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found: {}", .0.display())]
    MissingFile(PathBuf),

    #[error("Target directory cannot be empty")]
    EmptyTargetDir,

    #[error("Invalid description_max_chars: {0}. Must be between 16 and 1024")]
    InvalidDescriptionBudget(usize),

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),

    #[error("Invalid log rotation: {0}. Must be one of: daily, hourly, never")]
    InvalidRotation(String),

    #[error("Tool list cannot be empty. Use [\"*\"] to allow every tool")]
    EmptyTools,

    #[error("agent_version cannot be empty")]
    EmptyAgentVersion,

    #[error("Invalid backup_keep: {0}. Must be at least 1")]
    InvalidBackupKeep(usize),

    #[error("Invalid name_map: {0}")]
    InvalidNameMap(String),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .agent-sync/config.yaml, or the explicit file when one is given
    /// 3. .agent-sync/local.yaml (only without an explicit file)
    /// 4. AGENT_SYNC_* environment variables
    /// 5. Legacy AGENTS_DIR / AGENT_REPO_URL variables
    pub fn load(explicit: Option<&Path>) -> Result<Config> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(ConfigError::MissingFile(path.to_path_buf()).into());
            }
        }

        let config: Config = Self::figment(explicit)
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// The provider stack used by [`ConfigLoader::load`].
    pub fn figment(explicit: Option<&Path>) -> Figment {
        let figment = Figment::new().merge(Serialized::defaults(Config::default()));

        let figment = match explicit {
            Some(path) => figment.merge(Yaml::file(path)),
            None => figment
                .merge(Yaml::file(PROJECT_CONFIG_PATH))
                .merge(Yaml::file(LOCAL_CONFIG_PATH)),
        };

        figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .merge(Env::raw().only(&["AGENTS_DIR"]).map(|_| "target_dir".into()))
            .merge(Env::raw().only(&["AGENT_REPO_URL"]).map(|_| "repo_url".into()))
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        if config.target_dir.as_os_str().is_empty() {
            return Err(ConfigError::EmptyTargetDir);
        }

        if !(16..=1024).contains(&config.description_max_chars) {
            return Err(ConfigError::InvalidDescriptionBudget(
                config.description_max_chars,
            ));
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&config.logging.rotation.as_str()) {
            return Err(ConfigError::InvalidRotation(config.logging.rotation.clone()));
        }

        if config.tools.is_empty() || config.tools.iter().any(|t| t.trim().is_empty()) {
            return Err(ConfigError::EmptyTools);
        }

        if config.agent_version.trim().is_empty() {
            return Err(ConfigError::EmptyAgentVersion);
        }

        if config.backup_keep == 0 {
            return Err(ConfigError::InvalidBackupKeep(config.backup_keep));
        }

        config
            .name_map()
            .validate()
            .map_err(|e| ConfigError::InvalidNameMap(e.to_string()))?;

        Ok(())
    }
}
