//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::cli::commands::{
    backup::BackupArgs, list::ListArgs, manifest::ManifestArgs, show::ShowArgs,
    status::StatusArgs, sync::SyncArgs, update::UpdateArgs,
};
use crate::domain::models::Config;

#[derive(Parser, Debug)]
#[command(name = "agent-sync")]
#[command(about = "Install Markdown agent definitions with generated frontmatter", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Configuration file (defaults to .agent-sync/config.yaml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding the source agent files
    #[arg(long, global = true)]
    pub source: Option<PathBuf>,

    /// Directory agents are installed into
    #[arg(long, global = true)]
    pub target: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Copy source agents into the target directory with frontmatter
    Sync(SyncArgs),

    /// List installed agents
    List(ListArgs),

    /// Print an installed agent
    Show(ShowArgs),

    /// Print the manifest the source directory would produce
    Manifest(ManifestArgs),

    /// Show repository and installation status
    Status(StatusArgs),

    /// Back up the installed agents
    Backup(BackupArgs),

    /// Clone or pull the source repository
    Update(UpdateArgs),
}

impl Cli {
    /// Apply global flags on top of the loaded configuration.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(ref source) = self.source {
            config.source_dir = source.clone();
        }
        if let Some(ref target) = self.target {
            config.target_dir = target.clone();
        }
        if let Some(ref level) = self.log_level {
            config.logging.level = level.clone();
        }
    }
}
