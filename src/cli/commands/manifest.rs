//! `agent-sync manifest`: preview the manifest for the source directory.

use anyhow::{bail, Result};
use clap::Args;
use serde::Serialize;

use crate::cli::output::{output, CommandOutput};
use crate::domain::models::{Config, Manifest, ManifestEntry};
use crate::services::{AgentSynchronizer, SyncSettings};

#[derive(Args, Debug)]
pub struct ManifestArgs {
    /// Output format (json, markdown)
    #[arg(short, long, default_value = "json")]
    pub format: String,
}

#[derive(Debug, Serialize)]
pub struct ManifestOutput {
    #[serde(flatten)]
    pub manifest: Manifest,
    #[serde(skip)]
    pub markdown: bool,
}

impl CommandOutput for ManifestOutput {
    fn to_human(&self) -> String {
        if self.markdown {
            self.manifest.to_markdown().trim_end().to_string()
        } else {
            self.manifest
                .to_json()
                .map(|s| s.trim_end().to_string())
                .unwrap_or_default()
        }
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(&self.manifest).unwrap_or_default()
    }
}

pub async fn execute(args: ManifestArgs, config: &Config, json_mode: bool) -> Result<()> {
    let markdown = match args.format.to_lowercase().as_str() {
        "json" => false,
        "markdown" | "md" => true,
        other => bail!("Invalid format: {other}. Must be one of: json, markdown"),
    };

    let mut settings = SyncSettings::from_config(config);
    settings.dry_run = true;
    settings.clean_target = false;
    settings.write_manifest = false;

    let report = AgentSynchronizer::new(settings).sync().await?;
    let entries = report
        .synced
        .into_iter()
        .map(|agent| ManifestEntry {
            file: format!("{}.md", agent.name),
            name: agent.name,
            description: Some(agent.description),
        })
        .collect();

    let manifest = Manifest::from_entries(entries, config.default_agent.as_deref());
    output(&ManifestOutput { manifest, markdown }, json_mode);
    Ok(())
}
