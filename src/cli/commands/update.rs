//! `agent-sync update`: clone or pull the source repository.

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use std::sync::Arc;

use crate::adapters::GitCliRepository;
use crate::cli::output::{output, CommandOutput};
use crate::domain::models::Config;
use crate::services::{UpdateOutcome, UpdateService, UpdateSettings};

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Back up and stash local changes instead of refusing to update
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Debug, Serialize)]
pub struct UpdateOutput {
    #[serde(flatten)]
    pub outcome: UpdateOutcome,
}

impl CommandOutput for UpdateOutput {
    fn to_human(&self) -> String {
        let outcome = &self.outcome;
        let mut lines = Vec::new();

        if let Some(ref backup) = outcome.backup {
            lines.push(format!("Backed up local agents to {}", backup.display()));
        }
        if outcome.stashed {
            lines.push("Stashed local changes.".to_string());
        }

        if outcome.cloned {
            lines.push(format!(
                "Cloned repository ({} file(s)).",
                outcome.changed_files.len()
            ));
        } else if outcome.changed_files.is_empty() {
            lines.push("Already up to date.".to_string());
        } else {
            lines.push(format!("{} file(s) changed:", outcome.changed_files.len()));
            for file in &outcome.changed_files {
                lines.push(format!("  {file}"));
            }
        }

        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(args: UpdateArgs, config: &Config, json_mode: bool) -> Result<()> {
    let service = UpdateService::new(
        Arc::new(GitCliRepository::new()),
        UpdateSettings::from_config(config),
    );

    let outcome = service
        .update(args.force)
        .await
        .with_context(|| format!("Failed to update {}", config.source_dir.display()))?;

    output(&UpdateOutput { outcome }, json_mode);
    Ok(())
}
