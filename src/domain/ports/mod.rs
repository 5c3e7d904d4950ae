//! Port trait definitions (Hexagonal Architecture)
//!
//! - SourceRepository: version control operations on the source checkout

pub mod source_repository;

pub use source_repository::SourceRepository;
