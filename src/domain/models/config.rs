use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::agent_file::{FrontmatterPolicy, RenderSettings};
use super::description::{DEFAULT_MAX_DESCRIPTION_CHARS, FALLBACK_DESCRIPTION};
use super::exclusion::ExclusionList;
use super::name_map::NameMap;

/// Main configuration structure for agent-sync
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Directory holding the agent prompt sources
    #[serde(default = "default_source_dir")]
    pub source_dir: PathBuf,

    /// Directory the host application loads agents from
    #[serde(default = "default_target_dir")]
    pub target_dir: PathBuf,

    /// Remote repository used by `update` to clone or pull the sources
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo_url: Option<String>,

    /// Handling of sources that already carry frontmatter
    #[serde(default)]
    pub frontmatter_policy: FrontmatterPolicy,

    /// Character budget for generated descriptions
    #[serde(default = "default_description_max_chars")]
    pub description_max_chars: usize,

    /// Description used when none can be extracted
    #[serde(default = "default_fallback_description")]
    pub fallback_description: String,

    /// Value of the `version` header field
    #[serde(default = "default_agent_version")]
    pub agent_version: String,

    /// Value of the `tools` header field
    #[serde(default = "default_tools")]
    pub tools: Vec<String>,

    /// Remove existing agent files from the target before syncing
    #[serde(default)]
    pub clean_target: bool,

    /// Write manifest.json into the target after syncing
    #[serde(default = "default_true")]
    pub write_manifest: bool,

    /// Agent recorded as `default` in the manifest
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_agent: Option<String>,

    /// Extra or overriding source-to-target name mappings
    #[serde(default)]
    pub name_map: BTreeMap<String, String>,

    /// Extra exclusion patterns, added to the built-in list
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Number of backups kept by `backup` and forced updates
    #[serde(default = "default_backup_keep")]
    pub backup_keep: usize,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_source_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_target_dir() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(".claude").join("agents"))
        .unwrap_or_else(|| PathBuf::from(".claude/agents"))
}

const fn default_description_max_chars() -> usize {
    DEFAULT_MAX_DESCRIPTION_CHARS
}

fn default_fallback_description() -> String {
    FALLBACK_DESCRIPTION.to_string()
}

fn default_agent_version() -> String {
    "1.0".to_string()
}

fn default_tools() -> Vec<String> {
    vec!["*".to_string()]
}

const fn default_true() -> bool {
    true
}

const fn default_backup_keep() -> usize {
    5
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_dir: default_source_dir(),
            target_dir: default_target_dir(),
            repo_url: None,
            frontmatter_policy: FrontmatterPolicy::default(),
            description_max_chars: default_description_max_chars(),
            fallback_description: default_fallback_description(),
            agent_version: default_agent_version(),
            tools: default_tools(),
            clean_target: false,
            write_manifest: true,
            default_agent: None,
            name_map: BTreeMap::new(),
            exclude: vec![],
            backup_keep: default_backup_keep(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    pub fn name_map(&self) -> NameMap {
        NameMap::with_overrides(self.name_map.clone())
    }

    pub fn exclusions(&self) -> ExclusionList {
        ExclusionList::with_extra(&self.exclude)
    }

    pub fn render_settings(&self) -> RenderSettings {
        RenderSettings {
            version: self.agent_version.clone(),
            tools: self.tools.clone(),
            max_description_chars: self.description_max_chars,
            fallback_description: self.fallback_description.clone(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Also write JSON logs to files in this directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_dir: Option<PathBuf>,

    /// File rotation: daily, hourly, never
    #[serde(default = "default_rotation")]
    pub rotation: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_rotation() -> String {
    "never".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            log_dir: None,
            rotation: default_rotation(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.source_dir, PathBuf::from("."));
        assert!(config.target_dir.ends_with(".claude/agents"));
        assert_eq!(config.frontmatter_policy, FrontmatterPolicy::Regenerate);
        assert_eq!(config.description_max_chars, 150);
        assert_eq!(config.tools, vec!["*"]);
        assert_eq!(config.agent_version, "1.0");
        assert!(config.write_manifest);
        assert_eq!(config.backup_keep, 5);
    }

    #[test]
    fn test_yaml_partial_uses_defaults() {
        let yaml = r#"
target_dir: /opt/agents
frontmatter_policy: skip
name_map:
  ml-agent: ml-engineer
exclude:
  - CHANGELOG
logging:
  level: debug
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.target_dir, PathBuf::from("/opt/agents"));
        assert_eq!(config.frontmatter_policy, FrontmatterPolicy::Skip);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, "pretty");
        assert_eq!(config.name_map().resolve_target_name("ml-agent"), "ml-engineer");
        assert_eq!(config.name_map().resolve_target_name("go-agent"), "go-specialist");
        assert!(config.exclusions().is_excluded("CHANGELOG.md").is_some());
        assert!(config.exclusions().is_excluded("README.md").is_some());
    }

    #[test]
    fn test_render_settings() {
        let config = Config {
            description_max_chars: 120,
            ..Default::default()
        };
        let settings = config.render_settings();
        assert_eq!(settings.max_description_chars, 120);
        assert_eq!(settings.fallback_description, FALLBACK_DESCRIPTION);
    }
}
