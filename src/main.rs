//! agent-sync CLI entry point.

use anyhow::Result;
use clap::Parser;

use agent_sync::cli::{Cli, Commands};
use agent_sync::infrastructure::config::ConfigLoader;
use agent_sync::infrastructure::logging::{LogConfig, LoggerImpl};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let json = cli.json;

    if let Err(err) = run(cli).await {
        agent_sync::cli::handle_error(err, json);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = ConfigLoader::load(cli.config.as_deref())?;
    cli.apply_overrides(&mut config);
    ConfigLoader::validate(&config)?;

    let _logger = LoggerImpl::init(&LogConfig::from(&config.logging))?;

    match cli.command {
        Commands::Sync(args) => agent_sync::cli::commands::sync::execute(args, &config, cli.json).await,
        Commands::List(args) => agent_sync::cli::commands::list::execute(args, &config, cli.json).await,
        Commands::Show(args) => agent_sync::cli::commands::show::execute(args, &config, cli.json).await,
        Commands::Manifest(args) => {
            agent_sync::cli::commands::manifest::execute(args, &config, cli.json).await
        }
        Commands::Status(args) => {
            agent_sync::cli::commands::status::execute(args, &config, cli.json).await
        }
        Commands::Backup(args) => {
            agent_sync::cli::commands::backup::execute(args, &config, cli.json).await
        }
        Commands::Update(args) => {
            agent_sync::cli::commands::update::execute(args, &config, cli.json).await
        }
    }
}
