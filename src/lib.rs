//! agent-sync - installs Markdown agent definitions
//!
//! Agent documents are read from a source directory (usually a git checkout),
//! filtered through a denylist, renamed through a static name map, given a
//! generated YAML frontmatter block, and written to a target agents directory
//! together with a `manifest.json`.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): Pure models and the `SourceRepository` port
//! - **Service Layer** (`services`): Sync, catalog, backup, and update logic
//! - **Adapters** (`adapters`): git command line implementation of the port
//! - **Infrastructure Layer** (`infrastructure`): Configuration, logging, filesystem
//! - **CLI Layer** (`cli`): Command-line interface
//!
//! # Example
//!
//! ```no_run
//! use agent_sync::{AgentSynchronizer, Config, SyncSettings};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::default();
//!     let report = AgentSynchronizer::new(SyncSettings::from_config(&config))
//!         .sync()
//!         .await?;
//!     println!("{} agent(s) installed", report.synced.len());
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::errors::{SyncError, SyncResult};
pub use domain::models::{
    Config, ExclusionList, Frontmatter, FrontmatterPolicy, LoggingConfig, Manifest,
    ManifestEntry, NameMap,
};
pub use domain::ports::SourceRepository;
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{
    AgentSynchronizer, BackupService, CatalogService, SyncReport, SyncSettings, UpdateService,
};
