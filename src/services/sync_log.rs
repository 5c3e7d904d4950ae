//! Append-only history of sync runs kept next to the installed agents.

use std::path::{Path, PathBuf};

use chrono::Local;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;

use crate::domain::errors::{SyncError, SyncResult};

/// File name of the history log inside the target directory.
pub const SYNC_LOG_FILE: &str = ".sync.log";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const SEPARATOR: &str = " - ";

#[derive(Debug, Clone)]
pub struct SyncLog {
    path: PathBuf,
}

impl SyncLog {
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            path: dir.join(SYNC_LOG_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append `message` stamped with the local time.
    pub async fn append(&self, message: &str) -> SyncResult<()> {
        let line = format!(
            "{}{SEPARATOR}{}\n",
            Local::now().format(TIMESTAMP_FORMAT),
            message.trim()
        );

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| SyncError::io(&self.path, e))?;
        file.write_all(line.as_bytes())
            .await
            .map_err(|e| SyncError::io(&self.path, e))?;
        file.flush().await.map_err(|e| SyncError::io(&self.path, e))
    }

    /// Timestamp of the newest entry, or `None` when the log is missing or
    /// empty.
    pub async fn last_entry_timestamp(&self) -> Option<String> {
        let content = tokio::fs::read_to_string(&self.path).await.ok()?;
        content
            .lines()
            .rev()
            .find(|l| !l.trim().is_empty())
            .and_then(|l| l.split_once(SEPARATOR))
            .map(|(ts, _)| ts.trim().to_string())
    }
}
