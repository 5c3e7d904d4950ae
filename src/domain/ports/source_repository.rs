//! Source repository port.
//!
//! The source directory may be a checkout of a remote repository. The update
//! service talks to it only through this trait.

use std::path::Path;

use async_trait::async_trait;

use crate::domain::errors::SyncResult;

#[async_trait]
pub trait SourceRepository: Send + Sync {
    /// Whether `dir` is already a checkout.
    async fn is_initialized(&self, dir: &Path) -> bool;

    /// Clone `url` into `dir`.
    async fn clone_repository(&self, url: &str, dir: &Path) -> SyncResult<()>;

    /// Fetch from the default remote.
    async fn fetch(&self, dir: &Path) -> SyncResult<()>;

    /// Number of upstream commits not yet in the local branch.
    async fn commits_behind(&self, dir: &Path) -> SyncResult<u32>;

    /// Uncommitted changes, one porcelain status line per file.
    async fn local_changes(&self, dir: &Path) -> SyncResult<Vec<String>>;

    /// Paths tracked at `HEAD`.
    async fn tracked_files(&self, dir: &Path) -> SyncResult<Vec<String>>;

    /// Stash local changes under `message`.
    async fn stash(&self, dir: &Path, message: &str) -> SyncResult<()>;

    /// Pull from the default remote.
    async fn pull(&self, dir: &Path) -> SyncResult<()>;
}
