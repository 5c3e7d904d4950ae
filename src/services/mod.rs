pub mod backup_service;
pub mod catalog_service;
pub mod sync_log;
pub mod sync_service;
pub mod update_service;

pub use backup_service::{BackupOutcome, BackupService};
pub use catalog_service::{AgentSummary, CatalogService};
pub use sync_log::SyncLog;
pub use sync_service::{
    AgentSynchronizer, FailedFile, SkipReason, SkippedFile, SyncReport, SyncSettings, SyncedAgent,
};
pub use update_service::{RepositoryStatus, UpdateOutcome, UpdateService, UpdateSettings};
