//! Domain layer for agent synchronization
//!
//! Pure models for agent files, frontmatter, name mapping, exclusion, and the
//! manifest, plus the port traits infrastructure adapters implement.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{SyncError, SyncResult};
