use agent_sync::cli::commands::sync::SyncArgs;
use agent_sync::cli::{Cli, Commands};
use clap::Parser;
use std::path::PathBuf;

#[test]
fn test_parse_sync_flags() {
    let cli = Cli::try_parse_from(vec![
        "agent-sync",
        "sync",
        "--policy",
        "skip",
        "--clean",
        "--dry-run",
        "--no-manifest",
    ])
    .unwrap();

    match cli.command {
        Commands::Sync(SyncArgs {
            policy,
            clean,
            dry_run,
            no_manifest,
            default_agent,
        }) => {
            assert_eq!(policy.as_deref(), Some("skip"));
            assert!(clean);
            assert!(dry_run);
            assert!(no_manifest);
            assert!(default_agent.is_none());
        }
        _ => panic!("Wrong top-level command"),
    }
}

#[test]
fn test_parse_sync_defaults() {
    let cli = Cli::try_parse_from(vec!["agent-sync", "sync"]).unwrap();
    match cli.command {
        Commands::Sync(args) => {
            assert!(args.policy.is_none());
            assert!(!args.clean);
            assert!(!args.dry_run);
            assert!(!args.no_manifest);
        }
        _ => panic!("Wrong top-level command"),
    }
    assert!(!cli.json);
    assert!(cli.config.is_none());
}

#[test]
fn test_parse_global_paths() {
    let cli = Cli::try_parse_from(vec![
        "agent-sync",
        "--config",
        "/etc/agent-sync.yaml",
        "--source",
        "/srv/agents-repo",
        "--target",
        "/home/me/.claude/agents",
        "list",
    ])
    .unwrap();

    assert_eq!(cli.config, Some(PathBuf::from("/etc/agent-sync.yaml")));
    assert_eq!(cli.source, Some(PathBuf::from("/srv/agents-repo")));
    assert_eq!(cli.target, Some(PathBuf::from("/home/me/.claude/agents")));
    assert!(matches!(cli.command, Commands::List(_)));
}

#[test]
fn test_parse_show_requires_agent() {
    assert!(Cli::try_parse_from(vec!["agent-sync", "show"]).is_err());

    let cli = Cli::try_parse_from(vec!["agent-sync", "show", "go-specialist"]).unwrap();
    match cli.command {
        Commands::Show(args) => {
            assert_eq!(args.agent, "go-specialist");
            assert!(args.dir.is_none());
        }
        _ => panic!("Wrong top-level command"),
    }
}

#[test]
fn test_parse_manifest_format() {
    let cli = Cli::try_parse_from(vec!["agent-sync", "manifest"]).unwrap();
    match cli.command {
        Commands::Manifest(args) => assert_eq!(args.format, "json"),
        _ => panic!("Wrong top-level command"),
    }

    let cli = Cli::try_parse_from(vec!["agent-sync", "manifest", "-f", "markdown"]).unwrap();
    match cli.command {
        Commands::Manifest(args) => assert_eq!(args.format, "markdown"),
        _ => panic!("Wrong top-level command"),
    }
}

#[test]
fn test_parse_update_force() {
    let cli = Cli::try_parse_from(vec!["agent-sync", "update", "--force"]).unwrap();
    match cli.command {
        Commands::Update(args) => assert!(args.force),
        _ => panic!("Wrong top-level command"),
    }
}

#[test]
fn test_parse_backup_keep() {
    let cli = Cli::try_parse_from(vec!["agent-sync", "backup", "--keep", "3"]).unwrap();
    match cli.command {
        Commands::Backup(args) => assert_eq!(args.keep, Some(3)),
        _ => panic!("Wrong top-level command"),
    }
}

#[test]
fn test_unknown_subcommand_rejected() {
    assert!(Cli::try_parse_from(vec!["agent-sync", "deploy"]).is_err());
}
