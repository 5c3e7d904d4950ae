//! `SourceRepository` backed by the `git` command line.

use std::path::Path;
use std::process::{Output, Stdio};

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::domain::errors::{SyncError, SyncResult};
use crate::domain::ports::SourceRepository;

/// Branches tried, in order, when talking to the remote.
const DEFAULT_BRANCHES: &[&str] = &["main", "master"];

#[derive(Debug, Clone)]
pub struct GitCliRepository {
    remote: String,
}

impl Default for GitCliRepository {
    fn default() -> Self {
        Self {
            remote: "origin".to_string(),
        }
    }
}

impl GitCliRepository {
    pub fn new() -> Self {
        Self::default()
    }

    async fn run(&self, dir: Option<&Path>, args: &[&str]) -> SyncResult<Output> {
        let mut cmd = Command::new("git");
        cmd.args(args).stdout(Stdio::piped()).stderr(Stdio::piped());
        if let Some(dir) = dir {
            cmd.current_dir(dir);
        }

        debug!(args = ?args, "running git");
        cmd.output()
            .await
            .map_err(|e| SyncError::Git(format!("failed to execute git {}: {e}. Is git installed?", args.join(" "))))
    }

    /// Run and return stdout, turning a nonzero exit into an error.
    async fn run_checked(&self, dir: Option<&Path>, args: &[&str]) -> SyncResult<String> {
        let output = self.run(dir, args).await?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SyncError::Git(format!(
                "git {} failed: {}",
                args.join(" "),
                stderr.trim()
            )));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[async_trait]
impl SourceRepository for GitCliRepository {
    async fn is_initialized(&self, dir: &Path) -> bool {
        dir.join(".git").exists()
    }

    async fn clone_repository(&self, url: &str, dir: &Path) -> SyncResult<()> {
        let target = dir.to_string_lossy();
        self.run_checked(None, &["clone", url, target.as_ref()]).await?;
        Ok(())
    }

    async fn fetch(&self, dir: &Path) -> SyncResult<()> {
        self.run_checked(Some(dir), &["fetch", &self.remote]).await?;
        Ok(())
    }

    async fn commits_behind(&self, dir: &Path) -> SyncResult<u32> {
        let mut last_error = None;
        for &branch in DEFAULT_BRANCHES {
            let range = format!("HEAD..{}/{branch}", self.remote);
            match self.run_checked(Some(dir), &["rev-list", "--count", &range]).await {
                Ok(stdout) => {
                    return stdout.trim().parse::<u32>().map_err(|e| {
                        SyncError::Git(format!("unexpected rev-list output '{}': {e}", stdout.trim()))
                    });
                }
                Err(e) => last_error = Some(e),
            }
        }
        Err(last_error.unwrap_or_else(|| SyncError::Git("no remote branch found".to_string())))
    }

    async fn local_changes(&self, dir: &Path) -> SyncResult<Vec<String>> {
        let stdout = self.run_checked(Some(dir), &["status", "--porcelain"]).await?;
        Ok(stdout
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(str::to_string)
            .collect())
    }

    async fn tracked_files(&self, dir: &Path) -> SyncResult<Vec<String>> {
        let stdout = self
            .run_checked(Some(dir), &["ls-tree", "-r", "HEAD", "--name-only"])
            .await?;
        Ok(stdout.lines().map(str::to_string).collect())
    }

    async fn stash(&self, dir: &Path, message: &str) -> SyncResult<()> {
        self.run_checked(Some(dir), &["stash", "push", "-m", message])
            .await?;
        Ok(())
    }

    async fn pull(&self, dir: &Path) -> SyncResult<()> {
        let mut last_error = None;
        for &branch in DEFAULT_BRANCHES {
            match self.run_checked(Some(dir), &["pull", &self.remote, branch]).await {
                Ok(_) => return Ok(()),
                Err(e) => {
                    debug!(branch, error = %e, "pull failed, trying next branch");
                    last_error = Some(e);
                }
            }
        }
        Err(last_error.unwrap_or_else(|| SyncError::Git("no remote branch found".to_string())))
    }
}
