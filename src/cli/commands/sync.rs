//! `agent-sync sync`: install source agents into the target directory.

use anyhow::{bail, Result};
use clap::Args;
use serde::Serialize;

use crate::cli::output::{output, CommandOutput};
use crate::domain::models::{Config, FrontmatterPolicy};
use crate::services::{AgentSynchronizer, SkipReason, SyncReport, SyncSettings};

#[derive(Args, Debug, Default)]
pub struct SyncArgs {
    /// How to treat files that already carry frontmatter (skip, regenerate)
    #[arg(short, long)]
    pub policy: Option<String>,

    /// Remove existing agents from the target before writing
    #[arg(long)]
    pub clean: bool,

    /// Report what would change without writing anything
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Do not write manifest.json
    #[arg(long)]
    pub no_manifest: bool,

    /// Agent recorded as the manifest default
    #[arg(long)]
    pub default_agent: Option<String>,
}

impl SyncArgs {
    fn settings(&self, config: &Config) -> Result<SyncSettings> {
        let mut settings = SyncSettings::from_config(config);

        if let Some(ref policy) = self.policy {
            settings.policy = FrontmatterPolicy::parse_str(policy)
                .ok_or_else(|| anyhow::anyhow!("Invalid policy: {policy}. Must be one of: skip, regenerate"))?;
        }
        settings.clean_target |= self.clean;
        settings.dry_run = self.dry_run;
        if self.no_manifest {
            settings.write_manifest = false;
        }
        if self.default_agent.is_some() {
            settings.default_agent.clone_from(&self.default_agent);
        }
        Ok(settings)
    }
}

#[derive(Debug, Serialize)]
pub struct SyncOutput {
    #[serde(flatten)]
    pub report: SyncReport,
}

impl CommandOutput for SyncOutput {
    fn to_human(&self) -> String {
        let report = &self.report;
        let mut lines = Vec::new();

        if report.dry_run {
            lines.push("Dry run: no files were written.".to_string());
        }

        for removed in &report.removed {
            lines.push(format!("- removed {}", removed.display()));
        }

        for agent in &report.synced {
            let source = agent
                .source
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            let state = if agent.changed { agent.action.as_str() } else { "unchanged" };
            lines.push(format!("✓ {source} -> {}.md ({state})", agent.name));
        }

        for skipped in &report.skipped {
            let source = skipped.source.display();
            match skipped.reason {
                SkipReason::Excluded { ref pattern } => {
                    lines.push(format!("· skipped {source} (matches '{pattern}')"));
                }
                SkipReason::Collision { ref target, ref winner } => lines.push(format!(
                    "! skipped {source} ({target}.md already written from {})",
                    winner.display()
                )),
            }
        }

        for failed in &report.failed {
            lines.push(format!("✗ {}: {}", failed.source.display(), failed.error));
        }

        lines.push(String::new());
        lines.push(format!(
            "Synced {} agent(s), {} changed, {} skipped, {} failed.",
            report.synced.len(),
            report.changed_count(),
            report.skipped.len(),
            report.failed.len()
        ));
        if let Some(ref path) = report.manifest_path {
            lines.push(format!("Manifest: {}", path.display()));
        }

        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(args: SyncArgs, config: &Config, json_mode: bool) -> Result<()> {
    let synchronizer = AgentSynchronizer::new(args.settings(config)?);
    let report = synchronizer.sync().await?;

    let failed = report.failed.len();
    output(&SyncOutput { report }, json_mode);

    if failed > 0 {
        bail!("{failed} file(s) failed to sync");
    }
    Ok(())
}
