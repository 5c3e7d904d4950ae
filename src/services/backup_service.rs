//! Timestamped copies of installed agents.

use std::path::{Path, PathBuf};

use chrono::Local;
use serde::Serialize;
use tokio::fs;
use tracing::{debug, info};

use crate::domain::errors::{SyncError, SyncResult};
use crate::infrastructure::fs::{ensure_dir, markdown_files};

/// Directory, inside the backed-up directory, holding all backups.
pub const BACKUP_DIR: &str = ".backups";

const BACKUP_PREFIX: &str = "backup_";

#[derive(Debug, Clone, Serialize)]
pub struct BackupOutcome {
    pub path: PathBuf,
    pub files_copied: usize,
    pub pruned: Vec<PathBuf>,
}

pub struct BackupService {
    keep: usize,
}

impl BackupService {
    pub fn new(keep: usize) -> Self {
        Self { keep: keep.max(1) }
    }

    /// Copy the top-level `*.md` files of `dir` into a new
    /// `dir/.backups/backup_<YYYYmmdd_HHMMSS>` and prune old backups.
    pub async fn backup(&self, dir: &Path) -> SyncResult<BackupOutcome> {
        let root = dir.join(BACKUP_DIR);
        ensure_dir(&root).await?;

        let path = unique_backup_path(&root, &Local::now().format("%Y%m%d_%H%M%S").to_string());
        ensure_dir(&path).await?;

        let files = markdown_files(dir).await?;
        for file in &files {
            if let Some(name) = file.file_name() {
                let dest = path.join(name);
                fs::copy(file, &dest)
                    .await
                    .map_err(|e| SyncError::io(&dest, e))?;
            }
        }

        let pruned = self.prune(&root).await?;
        info!(path = %path.display(), files = files.len(), "backup created");

        Ok(BackupOutcome {
            path,
            files_copied: files.len(),
            pruned,
        })
    }

    /// Existing backups under `dir`, oldest first.
    pub async fn list(&self, dir: &Path) -> SyncResult<Vec<PathBuf>> {
        let root = dir.join(BACKUP_DIR);
        if !root.is_dir() {
            return Ok(Vec::new());
        }
        backup_dirs(&root).await
    }

    async fn prune(&self, root: &Path) -> SyncResult<Vec<PathBuf>> {
        let backups = backup_dirs(root).await?;
        let excess = backups.len().saturating_sub(self.keep);

        let mut pruned = Vec::with_capacity(excess);
        for old in backups.into_iter().take(excess) {
            debug!(path = %old.display(), "removing old backup");
            fs::remove_dir_all(&old)
                .await
                .map_err(|e| SyncError::io(&old, e))?;
            pruned.push(old);
        }
        Ok(pruned)
    }
}

/// `backup_*` directories under `root`, sorted oldest first.
///
/// The timestamp format sorts lexically, so name order is age order.
async fn backup_dirs(root: &Path) -> SyncResult<Vec<PathBuf>> {
    let mut entries = fs::read_dir(root).await.map_err(|e| SyncError::io(root, e))?;
    let mut dirs = Vec::new();

    while let Some(entry) = entries.next_entry().await.map_err(|e| SyncError::io(root, e))? {
        let is_backup = entry.file_name().to_string_lossy().starts_with(BACKUP_PREFIX);
        let is_dir = entry.file_type().await.map(|t| t.is_dir()).unwrap_or(false);
        if is_backup && is_dir {
            dirs.push(entry.path());
        }
    }

    dirs.sort();
    Ok(dirs)
}

/// Two backups within the same second get `_1`, `_2`, ... suffixes.
fn unique_backup_path(root: &Path, stamp: &str) -> PathBuf {
    let base = root.join(format!("{BACKUP_PREFIX}{stamp}"));
    if !base.exists() {
        return base;
    }
    (1..)
        .map(|n| root.join(format!("{BACKUP_PREFIX}{stamp}_{n}")))
        .find(|p| !p.exists())
        .unwrap_or(base)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn seed(dir: &Path) {
        std::fs::write(dir.join("go-specialist.md"), "# Go").unwrap();
        std::fs::write(dir.join("rust-specialist.md"), "# Rust").unwrap();
        std::fs::write(dir.join("manifest.json"), "{}").unwrap();
    }

    #[tokio::test]
    async fn test_backup_copies_markdown_only() {
        let tmp = TempDir::new().unwrap();
        seed(tmp.path());

        let outcome = BackupService::new(5).backup(tmp.path()).await.unwrap();

        assert_eq!(outcome.files_copied, 2);
        assert!(outcome.path.starts_with(tmp.path().join(BACKUP_DIR)));
        assert!(outcome.path.join("go-specialist.md").exists());
        assert!(!outcome.path.join("manifest.json").exists());
        assert!(outcome.pruned.is_empty());
    }

    #[tokio::test]
    async fn test_backup_prunes_to_keep() {
        let tmp = TempDir::new().unwrap();
        seed(tmp.path());
        let root = tmp.path().join(BACKUP_DIR);
        for stamp in ["20240101_000000", "20240102_000000", "20240103_000000"] {
            std::fs::create_dir_all(root.join(format!("backup_{stamp}"))).unwrap();
        }

        let service = BackupService::new(2);
        let outcome = service.backup(tmp.path()).await.unwrap();

        assert_eq!(outcome.pruned.len(), 2);
        let remaining = service.list(tmp.path()).await.unwrap();
        assert_eq!(remaining.len(), 2);
        assert!(remaining.contains(&outcome.path));
        assert!(remaining.iter().any(|p| p.ends_with("backup_20240103_000000")));
    }

    #[tokio::test]
    async fn test_same_second_backups_do_not_collide() {
        let tmp = TempDir::new().unwrap();
        seed(tmp.path());
        let service = BackupService::new(5);

        let first = service.backup(tmp.path()).await.unwrap();
        let second = service.backup(tmp.path()).await.unwrap();
        assert_ne!(first.path, second.path);
    }
}
