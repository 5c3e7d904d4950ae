//! Common test utilities for integration tests
//!
//! Provides shared fixtures and helpers used across multiple integration
//! test files.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A scratch workspace with `source/` and `target/` paths.
///
/// `source/` exists; `target/` is left for the code under test to create.
pub struct Workspace {
    pub tmp: TempDir,
    pub source: PathBuf,
    pub target: PathBuf,
}

impl Workspace {
    pub fn new() -> Self {
        let tmp = tempfile::tempdir().expect("Failed to create temp dir");
        let source = tmp.path().join("source");
        let target = tmp.path().join("target");
        std::fs::create_dir(&source).expect("Failed to create source dir");
        Self { tmp, source, target }
    }

    pub fn root(&self) -> &Path {
        self.tmp.path()
    }

    /// Write a file into the source directory.
    pub fn source_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.source.join(name);
        std::fs::write(&path, content).expect("Failed to write source file");
        path
    }

    pub fn read_target(&self, name: &str) -> String {
        std::fs::read_to_string(self.target.join(name))
            .unwrap_or_else(|e| panic!("Failed to read target file {name}: {e}"))
    }

    /// Sorted `*.md` file names in the target directory.
    pub fn target_agents(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(&self.target)
            .map(|entries| {
                entries
                    .filter_map(Result::ok)
                    .map(|e| e.file_name().to_string_lossy().into_owned())
                    .filter(|n| n.ends_with(".md"))
                    .collect()
            })
            .unwrap_or_default();
        names.sort();
        names
    }
}

/// A small agent set covering renames, exclusions, and description sources.
pub fn seed_agents(ws: &Workspace) {
    ws.source_file(
        "go-agent.md",
        "# Go Agent\n\n## Role\nYou are a Go expert focused on concurrency.\n\n## Skills\n- goroutines\n",
    );
    ws.source_file(
        "rust-agent.md",
        "# Rust Agent\n\nYou are a Rust expert who cares about ownership.\n",
    );
    ws.source_file("custom-helper.md", "# Helper\n\nAssists with chores.\n");
    ws.source_file("README.md", "# Agents\n\nDocumentation only.\n");
    ws.source_file("SETUP.md", "# Setup\n");
}
