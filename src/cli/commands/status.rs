//! `agent-sync status`: checkout and installation overview.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use std::sync::Arc;

use crate::adapters::GitCliRepository;
use crate::cli::output::{output, CommandOutput};
use crate::domain::models::Config;
use crate::services::{RepositoryStatus, UpdateService, UpdateSettings};

#[derive(Args, Debug)]
pub struct StatusArgs {}

#[derive(Debug, Serialize)]
pub struct StatusOutput {
    #[serde(flatten)]
    pub status: RepositoryStatus,
}

impl CommandOutput for StatusOutput {
    fn to_human(&self) -> String {
        let s = &self.status;
        let updates = match s.has_updates {
            Some(true) => "available",
            Some(false) => "up to date",
            None => "unknown",
        };

        let mut lines = vec![
            "Agent Sync Status".to_string(),
            "-".repeat(40),
            format!("Source:        {}", s.source_dir.display()),
            format!("Target:        {}", s.target_dir.display()),
            format!(
                "Repository:    {}",
                s.repo_url.as_deref().unwrap_or("(not configured)")
            ),
            format!("Initialized:   {}", if s.initialized { "yes" } else { "no" }),
            format!("Last sync:     {}", s.last_sync.as_deref().unwrap_or("never")),
            format!("Agents:        {}", s.total_agents),
        ];
        if s.initialized {
            lines.push(format!("Updates:       {updates}"));
            lines.push(format!("Local changes: {}", s.local_changes));
        }
        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(_args: StatusArgs, config: &Config, json_mode: bool) -> Result<()> {
    let service = UpdateService::new(
        Arc::new(GitCliRepository::new()),
        UpdateSettings::from_config(config),
    );
    let status = service.status().await?;
    output(&StatusOutput { status }, json_mode);
    Ok(())
}
