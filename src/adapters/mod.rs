//! Infrastructure adapters for external systems.

pub mod git;

pub use git::GitCliRepository;
