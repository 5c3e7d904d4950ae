//! `agent-sync show`: print one installed agent.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

use crate::cli::output::{output, CommandOutput};
use crate::domain::models::Config;
use crate::services::CatalogService;

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Agent name, with or without the .md extension
    pub agent: String,

    /// Directory to look in (defaults to the target directory)
    #[arg(short, long)]
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
pub struct AgentContentOutput {
    pub name: String,
    pub content: String,
}

impl CommandOutput for AgentContentOutput {
    fn to_human(&self) -> String {
        self.content.trim_end().to_string()
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(args: ShowArgs, config: &Config, json_mode: bool) -> Result<()> {
    let directory = args.dir.unwrap_or_else(|| config.target_dir.clone());
    let content = CatalogService::default()
        .get_agent(&directory, &args.agent)
        .await?;

    output(
        &AgentContentOutput {
            name: args.agent,
            content,
        },
        json_mode,
    );
    Ok(())
}
