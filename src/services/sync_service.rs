//! Agent file synchronizer.
//!
//! Copies agent documents from a source directory into the target agents
//! directory, renaming them through the name map and prefixing each with a
//! generated YAML frontmatter block. A manifest of the installed agents is
//! written alongside.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::domain::errors::{SyncError, SyncResult};
use crate::domain::models::{
    compose_document, extract_description, AgentFile, ComposedDocument, Config,
    ExclusionList, ExtractedDescription, Frontmatter, FrontmatterPolicy, Manifest,
    ManifestEntry, NameMap, RenderAction, RenderSettings, MANIFEST_FILE_NAME,
};
use crate::infrastructure::fs::{ensure_dir, markdown_files, write_atomic};
use crate::services::sync_log::SyncLog;

/// Everything one sync run needs to know.
#[derive(Debug, Clone)]
pub struct SyncSettings {
    pub source_dir: PathBuf,
    pub target_dir: PathBuf,
    pub exclusions: ExclusionList,
    pub name_map: NameMap,
    pub policy: FrontmatterPolicy,
    pub render: RenderSettings,
    pub clean_target: bool,
    pub dry_run: bool,
    pub write_manifest: bool,
    pub default_agent: Option<String>,
}

impl SyncSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            source_dir: config.source_dir.clone(),
            target_dir: config.target_dir.clone(),
            exclusions: config.exclusions(),
            name_map: config.name_map(),
            policy: config.frontmatter_policy,
            render: config.render_settings(),
            clean_target: config.clean_target,
            dry_run: false,
            write_manifest: config.write_manifest,
            default_agent: config.default_agent.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SyncedAgent {
    pub name: String,
    pub source: PathBuf,
    pub target: PathBuf,
    pub description: String,
    pub action: RenderAction,
    /// False when the target already held identical content.
    pub changed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkipReason {
    Excluded { pattern: String },
    Collision { target: String, winner: PathBuf },
}

#[derive(Debug, Clone, Serialize)]
pub struct SkippedFile {
    pub source: PathBuf,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, Serialize)]
pub struct FailedFile {
    pub source: PathBuf,
    pub error: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SyncReport {
    pub synced: Vec<SyncedAgent>,
    pub skipped: Vec<SkippedFile>,
    pub failed: Vec<FailedFile>,
    pub removed: Vec<PathBuf>,
    pub manifest_path: Option<PathBuf>,
    pub dry_run: bool,
}

impl SyncReport {
    pub fn changed_count(&self) -> usize {
        self.synced.iter().filter(|a| a.changed).count()
    }

    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }
}

/// Result of writing one target file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOutcome {
    pub action: RenderAction,
    pub changed: bool,
}

pub struct AgentSynchronizer {
    settings: SyncSettings,
}

impl AgentSynchronizer {
    pub fn new(settings: SyncSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &SyncSettings {
        &self.settings
    }

    /// Markdown files in `source_dir` that are not excluded, sorted by name.
    pub async fn list_candidate_files(&self, source_dir: &Path) -> SyncResult<Vec<PathBuf>> {
        let (candidates, _) = self.scan(source_dir).await?;
        Ok(candidates)
    }

    pub fn resolve_target_name(&self, base_name: &str) -> String {
        self.settings.name_map.resolve_target_name(base_name)
    }

    pub fn extract_description(&self, content: &str) -> Option<ExtractedDescription> {
        extract_description(content, self.settings.render.max_description_chars)
    }

    /// Render `content` under a header for `target_name` and write it to
    /// `target_path`. Identical existing content is left untouched.
    pub async fn write_with_frontmatter(
        &self,
        target_path: &Path,
        target_name: &str,
        description: &str,
        content: &str,
    ) -> SyncResult<WriteOutcome> {
        let doc = self.compose(target_name, description, content);
        let changed = !is_unchanged(target_path, &doc.content).await;
        if changed {
            write_atomic(target_path, doc.content.as_bytes()).await?;
        }
        Ok(WriteOutcome {
            action: doc.action,
            changed,
        })
    }

    /// Run one full synchronization.
    ///
    /// Per-file problems land in the report; only a missing source or an
    /// unusable target aborts the run.
    #[instrument(skip(self), fields(source = %self.settings.source_dir.display(), target = %self.settings.target_dir.display(), dry_run = self.settings.dry_run))]
    pub async fn sync(&self) -> SyncResult<SyncReport> {
        let source_dir = &self.settings.source_dir;
        let target_dir = &self.settings.target_dir;
        let dry_run = self.settings.dry_run;

        check_source(source_dir)?;

        let mut report = SyncReport {
            dry_run,
            ..Default::default()
        };

        if !dry_run {
            ensure_dir(target_dir).await?;
        }

        if self.settings.clean_target {
            report.removed = self.clean_target().await?;
        }

        let (candidates, excluded) = self.scan(source_dir).await?;
        report.skipped = excluded;

        let mut claimed: HashMap<String, PathBuf> = HashMap::new();

        for source in candidates {
            let agent = match AgentFile::load(&source).await {
                Ok(agent) => agent,
                Err(e) => {
                    warn!(path = %source.display(), error = %e, "failed to read agent file");
                    report.failed.push(FailedFile {
                        source,
                        error: e.to_string(),
                    });
                    continue;
                }
            };

            let name = self.resolve_target_name(&agent.base_name);
            if let Some(winner) = claimed.get(&name) {
                warn!(
                    path = %source.display(),
                    winner = %winner.display(),
                    target = %name,
                    "target name already taken, skipping"
                );
                report.skipped.push(SkippedFile {
                    source,
                    reason: SkipReason::Collision {
                        target: name,
                        winner: winner.clone(),
                    },
                });
                continue;
            }
            claimed.insert(name.clone(), source.clone());

            let description = agent.description(&self.settings.render);
            if description == self.settings.render.fallback_description {
                debug!(path = %source.display(), "no description found, using fallback");
            }
            let target = target_dir.join(format!("{name}.md"));

            let outcome = if dry_run {
                let doc = self.compose(&name, &description, &agent.content);
                let cleaned = report.removed.contains(&target);
                Ok(WriteOutcome {
                    action: doc.action,
                    changed: cleaned || !is_unchanged(&target, &doc.content).await,
                })
            } else {
                self.write_with_frontmatter(&target, &name, &description, &agent.content)
                    .await
            };

            match outcome {
                Ok(outcome) => {
                    debug!(
                        source = %source.display(),
                        target = %target.display(),
                        action = outcome.action.as_str(),
                        changed = outcome.changed,
                        "agent synced"
                    );
                    report.synced.push(SyncedAgent {
                        name,
                        source,
                        target,
                        description,
                        action: outcome.action,
                        changed: outcome.changed,
                    });
                }
                Err(e) => {
                    warn!(path = %source.display(), error = %e, "failed to write agent file");
                    report.failed.push(FailedFile {
                        source,
                        error: e.to_string(),
                    });
                }
            }
        }

        if self.settings.write_manifest && !dry_run {
            report.manifest_path = Some(self.write_manifest(&report).await?);
        }

        if !dry_run {
            let message = format!(
                "Synced {} agent(s) from {} ({} skipped, {} failed)",
                report.synced.len(),
                source_dir.display(),
                report.skipped.len(),
                report.failed.len()
            );
            if let Err(e) = SyncLog::in_dir(target_dir).append(&message).await {
                warn!(error = %e, "could not append to sync log");
            }
        }

        info!(
            synced = report.synced.len(),
            changed = report.changed_count(),
            skipped = report.skipped.len(),
            failed = report.failed.len(),
            removed = report.removed.len(),
            "sync finished"
        );

        Ok(report)
    }

    /// Remove top-level `*.md` files from the target directory.
    ///
    /// In a dry run the files are only listed.
    pub async fn clean_target(&self) -> SyncResult<Vec<PathBuf>> {
        let target_dir = &self.settings.target_dir;
        if !target_dir.is_dir() {
            return Ok(Vec::new());
        }

        let files = markdown_files(target_dir).await?;
        if !self.settings.dry_run {
            for file in &files {
                tokio::fs::remove_file(file)
                    .await
                    .map_err(|e| SyncError::io(file, e))?;
            }
        }
        debug!(count = files.len(), "cleaned target directory");
        Ok(files)
    }

    fn compose(&self, target_name: &str, description: &str, content: &str) -> ComposedDocument {
        let header = Frontmatter {
            name: target_name.to_string(),
            description: description.to_string(),
            version: self.settings.render.version.clone(),
            tools: self.settings.render.tools.clone(),
        };
        compose_document(content, &header, self.settings.policy)
    }

    async fn scan(&self, source_dir: &Path) -> SyncResult<(Vec<PathBuf>, Vec<SkippedFile>)> {
        check_source(source_dir)?;

        let mut candidates = Vec::new();
        let mut excluded = Vec::new();

        for path in markdown_files(source_dir).await? {
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            match self.settings.exclusions.is_excluded(&file_name) {
                Some(pattern) => {
                    debug!(file = %file_name, pattern, "excluded");
                    excluded.push(SkippedFile {
                        source: path,
                        reason: SkipReason::Excluded {
                            pattern: pattern.to_string(),
                        },
                    });
                }
                None => candidates.push(path),
            }
        }

        Ok((candidates, excluded))
    }

    async fn write_manifest(&self, report: &SyncReport) -> SyncResult<PathBuf> {
        let entries = report
            .synced
            .iter()
            .map(|agent| ManifestEntry {
                name: agent.name.clone(),
                file: format!("{}.md", agent.name),
                description: None,
            })
            .collect();
        let manifest = Manifest::from_entries(entries, self.settings.default_agent.as_deref());

        let path = self.settings.target_dir.join(MANIFEST_FILE_NAME);
        let json = manifest
            .to_json()
            .map_err(|e| SyncError::io(&path, std::io::Error::other(e)))?;
        write_atomic(&path, json.as_bytes()).await?;
        Ok(path)
    }
}

fn check_source(source_dir: &Path) -> SyncResult<()> {
    if !source_dir.exists() {
        return Err(SyncError::SourceNotFound(source_dir.to_path_buf()));
    }
    if !source_dir.is_dir() {
        return Err(SyncError::SourceNotDirectory(source_dir.to_path_buf()));
    }
    Ok(())
}

async fn is_unchanged(path: &Path, content: &str) -> bool {
    matches!(tokio::fs::read(path).await, Ok(existing) if existing == content.as_bytes())
}
