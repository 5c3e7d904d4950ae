//! Read-only views over a directory of installed agents.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use serde::Serialize;
use tracing::warn;

use crate::domain::errors::{SyncError, SyncResult};
use crate::domain::models::{extract_description, ExclusionList};
use crate::domain::models::agent_file::base_name_of;
use crate::infrastructure::fs::markdown_files;

/// Role shown for agents whose body yields no description.
pub const NO_DESCRIPTION: &str = "No description available";

/// Role length used by listings unless configured otherwise.
pub const DEFAULT_ROLE_CHARS: usize = 100;

#[derive(Debug, Clone, Serialize)]
pub struct AgentSummary {
    pub name: String,
    pub file: PathBuf,
    pub size: u64,
    pub modified: Option<DateTime<Local>>,
    pub role: String,
}

pub struct CatalogService {
    exclusions: ExclusionList,
    role_chars: usize,
}

impl Default for CatalogService {
    fn default() -> Self {
        Self::new(ExclusionList::default(), DEFAULT_ROLE_CHARS)
    }
}

impl CatalogService {
    pub fn new(exclusions: ExclusionList, role_chars: usize) -> Self {
        Self {
            exclusions,
            role_chars,
        }
    }

    /// Agents in `dir`, sorted by file name.
    ///
    /// Unreadable files are listed with the fallback role instead of failing
    /// the whole listing.
    pub async fn list_agents(&self, dir: &Path) -> SyncResult<Vec<AgentSummary>> {
        if !dir.exists() {
            return Err(SyncError::SourceNotFound(dir.to_path_buf()));
        }
        if !dir.is_dir() {
            return Err(SyncError::SourceNotDirectory(dir.to_path_buf()));
        }

        let mut agents = Vec::new();
        for path in markdown_files(dir).await? {
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            if self.exclusions.is_excluded(&file_name).is_some() {
                continue;
            }
            agents.push(self.summarize(path).await);
        }
        Ok(agents)
    }

    /// Content of agent `name` in `dir`: `<name>.md` first, then `<name>`.
    pub async fn get_agent(&self, dir: &Path, name: &str) -> SyncResult<String> {
        let name = name.trim();
        if name.is_empty() || name.contains(['/', '\\']) || name == ".." {
            return Err(SyncError::AgentNotFound(name.to_string()));
        }

        for candidate in [dir.join(format!("{name}.md")), dir.join(name)] {
            if candidate.is_file() {
                return tokio::fs::read_to_string(&candidate)
                    .await
                    .map_err(|e| SyncError::io(&candidate, e));
            }
        }

        Err(SyncError::AgentNotFound(name.to_string()))
    }

    async fn summarize(&self, path: PathBuf) -> AgentSummary {
        let metadata = tokio::fs::metadata(&path).await.ok();
        let size = metadata.as_ref().map_or(0, |m| m.len());
        let modified = metadata
            .and_then(|m| m.modified().ok())
            .map(DateTime::<Local>::from);

        let role = match tokio::fs::read_to_string(&path).await {
            Ok(content) => extract_description(&content, self.role_chars)
                .map(|found| found.text)
                .filter(|text| !text.is_empty())
                .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "could not read agent file");
                NO_DESCRIPTION.to_string()
            }
        };

        AgentSummary {
            name: base_name_of(&path),
            file: path,
            size,
            modified,
            role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn seed(dir: &Path) {
        std::fs::write(
            dir.join("go-specialist.md"),
            "## Role\nYou are a Go expert.\n",
        )
        .unwrap();
        std::fs::write(dir.join("plain.md"), "# Plain\nNo role here.\n").unwrap();
        std::fs::write(dir.join("README.md"), "# Readme\n").unwrap();
    }

    #[tokio::test]
    async fn test_list_agents() {
        let tmp = TempDir::new().unwrap();
        seed(tmp.path());

        let agents = CatalogService::default().list_agents(tmp.path()).await.unwrap();
        let names: Vec<_> = agents.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["go-specialist", "plain"]);

        assert_eq!(agents[0].role, "You are a Go expert.");
        assert_eq!(agents[1].role, NO_DESCRIPTION);
        assert!(agents[0].size > 0);
        assert!(agents[0].modified.is_some());
    }

    #[tokio::test]
    async fn test_list_truncates_role() {
        let tmp = TempDir::new().unwrap();
        let long = format!("You are {}", "very ".repeat(40));
        std::fs::write(tmp.path().join("long.md"), &long).unwrap();

        let agents = CatalogService::new(ExclusionList::default(), 30)
            .list_agents(tmp.path())
            .await
            .unwrap();
        assert!(agents[0].role.chars().count() <= 30);
        assert!(agents[0].role.ends_with("..."));
    }

    #[tokio::test]
    async fn test_list_missing_directory() {
        let err = CatalogService::default()
            .list_agents(Path::new("/definitely/not/here"))
            .await
            .unwrap_err();
        assert!(matches!(err, SyncError::SourceNotFound(_)));
    }

    #[tokio::test]
    async fn test_get_agent_with_and_without_extension() {
        let tmp = TempDir::new().unwrap();
        seed(tmp.path());
        let catalog = CatalogService::default();

        let content = catalog.get_agent(tmp.path(), "go-specialist").await.unwrap();
        assert!(content.contains("Go expert"));

        let same = catalog.get_agent(tmp.path(), "go-specialist.md").await.unwrap();
        assert_eq!(content, same);
    }

    #[tokio::test]
    async fn test_get_agent_not_found() {
        let tmp = TempDir::new().unwrap();
        let catalog = CatalogService::default();

        let err = catalog.get_agent(tmp.path(), "ghost").await.unwrap_err();
        assert!(matches!(err, SyncError::AgentNotFound(ref n) if n == "ghost"));

        let err = catalog.get_agent(tmp.path(), "../etc/passwd").await.unwrap_err();
        assert!(matches!(err, SyncError::AgentNotFound(_)));
    }
}
