//! Infrastructure layer module
//!
//! - Configuration management (figment)
//! - Logging infrastructure (tracing)
//! - Filesystem helpers (atomic writes, Markdown directory scans)
//!
//! Adapters satisfying the domain port traits live in `crate::adapters`.

pub mod config;
pub mod fs;
pub mod logging;
