//! Keeps the source checkout in step with its remote repository.

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::domain::errors::{SyncError, SyncResult};
use crate::domain::models::Config;
use crate::domain::ports::SourceRepository;
use crate::infrastructure::fs::markdown_files;
use crate::services::backup_service::BackupService;
use crate::services::sync_log::SyncLog;

#[derive(Debug, Clone)]
pub struct UpdateSettings {
    pub source_dir: PathBuf,
    pub target_dir: PathBuf,
    pub repo_url: Option<String>,
    pub backup_keep: usize,
}

impl UpdateSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            source_dir: config.source_dir.clone(),
            target_dir: config.target_dir.clone(),
            repo_url: config.repo_url.clone(),
            backup_keep: config.backup_keep,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateOutcome {
    pub cloned: bool,
    pub changed_files: Vec<String>,
    pub backup: Option<PathBuf>,
    pub stashed: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct RepositoryStatus {
    pub initialized: bool,
    pub source_dir: PathBuf,
    pub target_dir: PathBuf,
    pub repo_url: Option<String>,
    pub last_sync: Option<String>,
    pub total_agents: usize,
    /// `None` when the remote could not be reached.
    pub has_updates: Option<bool>,
    pub local_changes: usize,
}

pub struct UpdateService<R: SourceRepository> {
    repository: Arc<R>,
    settings: UpdateSettings,
}

impl<R: SourceRepository> UpdateService<R> {
    pub fn new(repository: Arc<R>, settings: UpdateSettings) -> Self {
        Self {
            repository,
            settings,
        }
    }

    /// Clone or pull the source checkout.
    ///
    /// Local modifications block the pull unless `force` is set, in which
    /// case the agents are backed up and the changes stashed first.
    #[instrument(skip(self), fields(source = %self.settings.source_dir.display()))]
    pub async fn update(&self, force: bool) -> SyncResult<UpdateOutcome> {
        let dir = &self.settings.source_dir;

        if !self.repository.is_initialized(dir).await {
            let url = self
                .settings
                .repo_url
                .as_deref()
                .filter(|u| !u.trim().is_empty())
                .ok_or(SyncError::RepositoryNotConfigured)?;

            info!(url, "cloning agent repository");
            self.repository.clone_repository(url, dir).await?;
            let changed_files = self.repository.tracked_files(dir).await?;

            self.log(&format!("Cloned {url} ({} file(s))", changed_files.len()))
                .await;
            return Ok(UpdateOutcome {
                cloned: true,
                changed_files,
                ..Default::default()
            });
        }

        let mut outcome = UpdateOutcome::default();

        let changes = self.repository.local_changes(dir).await?;
        if !changes.is_empty() {
            if !force {
                return Err(SyncError::LocalChanges(changes.len()));
            }
            warn!(count = changes.len(), "local changes will be stashed");
            let backup = BackupService::new(self.settings.backup_keep)
                .backup(dir)
                .await?;
            outcome.backup = Some(backup.path);
            self.repository
                .stash(dir, "agent-sync: auto-stash before update")
                .await?;
            outcome.stashed = true;
        }

        let before: BTreeSet<String> = self.repository.tracked_files(dir).await?.into_iter().collect();
        self.repository.fetch(dir).await?;
        self.repository.pull(dir).await?;
        let after: BTreeSet<String> = self.repository.tracked_files(dir).await?.into_iter().collect();

        outcome.changed_files = before.symmetric_difference(&after).cloned().collect();
        debug!(changed = outcome.changed_files.len(), "pull finished");

        self.log(&format!(
            "Updated from remote ({} file(s) changed)",
            outcome.changed_files.len()
        ))
        .await;

        Ok(outcome)
    }

    /// Snapshot of the checkout and installed agents.
    ///
    /// Remote errors degrade to `has_updates: None` rather than failing.
    pub async fn status(&self) -> SyncResult<RepositoryStatus> {
        let source_dir = &self.settings.source_dir;
        let target_dir = &self.settings.target_dir;
        let initialized = self.repository.is_initialized(source_dir).await;

        let (has_updates, local_changes) = if initialized {
            let has_updates = match self.repository.fetch(source_dir).await {
                Ok(()) => match self.repository.commits_behind(source_dir).await {
                    Ok(behind) => Some(behind > 0),
                    Err(e) => {
                        debug!(error = %e, "could not count remote commits");
                        None
                    }
                },
                Err(e) => {
                    debug!(error = %e, "fetch failed");
                    None
                }
            };
            let local = self.repository.local_changes(source_dir).await?.len();
            (has_updates, local)
        } else {
            (None, 0)
        };

        let total_agents = if target_dir.is_dir() {
            markdown_files(target_dir).await?.len()
        } else {
            0
        };

        Ok(RepositoryStatus {
            initialized,
            source_dir: source_dir.clone(),
            target_dir: target_dir.clone(),
            repo_url: self.settings.repo_url.clone(),
            last_sync: SyncLog::in_dir(target_dir).last_entry_timestamp().await,
            total_agents,
            has_updates,
            local_changes,
        })
    }

    async fn log(&self, message: &str) {
        if !self.settings.target_dir.is_dir() {
            return;
        }
        if let Err(e) = SyncLog::in_dir(&self.settings.target_dir).append(message).await {
            warn!(error = %e, "could not append to sync log");
        }
    }
}
