//! CLI command implementations.

pub mod backup;
pub mod list;
pub mod manifest;
pub mod show;
pub mod status;
pub mod sync;
pub mod update;
