//! `agent-sync list`: installed agents with their roles.

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

use crate::cli::output::{output, AgentTableFormatter, CommandOutput};
use crate::domain::models::Config;
use crate::services::catalog_service::DEFAULT_ROLE_CHARS;
use crate::services::{AgentSummary, CatalogService};

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Directory to list (defaults to the target directory)
    #[arg(short, long)]
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
pub struct AgentListOutput {
    pub directory: PathBuf,
    pub agents: Vec<AgentSummary>,
    pub total: usize,
}

impl CommandOutput for AgentListOutput {
    fn to_human(&self) -> String {
        if self.agents.is_empty() {
            return format!("No agents found in {}.", self.directory.display());
        }

        format!(
            "Found {} agent(s) in {}:\n{}",
            self.total,
            self.directory.display(),
            AgentTableFormatter::new().format_agents(&self.agents)
        )
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(args: ListArgs, config: &Config, json_mode: bool) -> Result<()> {
    let directory = args.dir.unwrap_or_else(|| config.target_dir.clone());
    let catalog = CatalogService::new(config.exclusions(), DEFAULT_ROLE_CHARS);

    let agents = catalog
        .list_agents(&directory)
        .await
        .with_context(|| format!("Failed to list agents in {}", directory.display()))?;

    let out = AgentListOutput {
        directory,
        total: agents.len(),
        agents,
    };
    output(&out, json_mode);
    Ok(())
}
