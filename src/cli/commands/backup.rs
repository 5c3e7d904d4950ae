//! `agent-sync backup`: snapshot the installed agents.

use anyhow::{bail, Result};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

use crate::cli::output::{output, CommandOutput};
use crate::domain::models::Config;
use crate::services::{BackupOutcome, BackupService};

#[derive(Args, Debug)]
pub struct BackupArgs {
    /// Directory to back up (defaults to the target directory)
    #[arg(short, long)]
    pub dir: Option<PathBuf>,

    /// Number of backups to keep (defaults to backup_keep)
    #[arg(short, long)]
    pub keep: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct BackupOutput {
    #[serde(flatten)]
    pub outcome: BackupOutcome,
}

impl CommandOutput for BackupOutput {
    fn to_human(&self) -> String {
        let mut lines = vec![format!(
            "Backed up {} agent(s) to {}",
            self.outcome.files_copied,
            self.outcome.path.display()
        )];
        for pruned in &self.outcome.pruned {
            lines.push(format!("- removed old backup {}", pruned.display()));
        }
        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(args: BackupArgs, config: &Config, json_mode: bool) -> Result<()> {
    let directory = args.dir.unwrap_or_else(|| config.target_dir.clone());
    if !directory.is_dir() {
        bail!("Nothing to back up: {} does not exist", directory.display());
    }

    let keep = args.keep.unwrap_or(config.backup_keep);
    if keep == 0 {
        bail!("--keep must be at least 1");
    }

    let outcome = BackupService::new(keep).backup(&directory).await?;
    output(&BackupOutput { outcome }, json_mode);
    Ok(())
}
