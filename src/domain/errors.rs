//! Domain errors for agent synchronization.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while scanning, rendering, or writing agent files.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("Source directory not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    #[error("Source path is not a directory: {}", .0.display())]
    SourceNotDirectory(PathBuf),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("File is not valid UTF-8: {}", .0.display())]
    InvalidUtf8(PathBuf),

    #[error("Invalid name mapping: {0}")]
    InvalidNameMap(String),

    #[error("Agent not found: {0}")]
    AgentNotFound(String),

    #[error("Git error: {0}")]
    Git(String),

    #[error("Repository URL not set. Set AGENT_REPO_URL or repo_url in the config file")]
    RepositoryNotConfigured,

    #[error("Local changes detected in {0} file(s). Use --force to override")]
    LocalChanges(usize),
}

pub type SyncResult<T> = Result<T, SyncError>;

impl SyncError {
    /// Wrap an I/O error with the path it occurred on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::InvalidData {
            return SyncError::InvalidUtf8(path);
        }
        SyncError::Io { path, source }
    }
}
