//! Exclusion list for files that live next to agents but are not agents.
//!
//! A source checkout usually carries documentation (README, setup guides,
//! catalogs) alongside the agent prompts. Those files are filtered out before
//! name mapping. The list is versioned so a change to the defaults is visible
//! in `status` output and in the manifest.

use serde::{Deserialize, Serialize};

/// Version of [`DEFAULT_EXCLUSIONS`]. Bump whenever the defaults change.
pub const EXCLUSION_LIST_VERSION: u32 = 1;

/// Substrings that mark a Markdown file as documentation rather than an agent.
pub const DEFAULT_EXCLUSIONS: &[&str] = &[
    "README",
    "CATALOG",
    "SETUP",
    "REMOTE_SETUP",
    "DISCOVERY_WORKFLOW",
    "manifest",
    "loader",
];

/// Case-insensitive substring denylist applied to file names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExclusionList {
    pub version: u32,
    pub patterns: Vec<String>,
}

impl Default for ExclusionList {
    fn default() -> Self {
        Self {
            version: EXCLUSION_LIST_VERSION,
            patterns: DEFAULT_EXCLUSIONS.iter().map(|p| (*p).to_string()).collect(),
        }
    }
}

impl ExclusionList {
    /// Default list extended with configured patterns.
    ///
    /// Blank patterns are dropped and duplicates (ignoring case) collapse to
    /// the first spelling seen.
    pub fn with_extra<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut list = Self::default();
        for pattern in extra {
            let pattern = pattern.as_ref().trim();
            if pattern.is_empty() {
                continue;
            }
            let lowered = pattern.to_lowercase();
            if !list.patterns.iter().any(|p| p.to_lowercase() == lowered) {
                list.patterns.push(pattern.to_string());
            }
        }
        list
    }

    /// Returns the first pattern matching `file_name`, if any.
    pub fn is_excluded(&self, file_name: &str) -> Option<&str> {
        let lowered = file_name.to_lowercase();
        self.patterns
            .iter()
            .find(|p| lowered.contains(&p.to_lowercase()))
            .map(String::as_str)
    }
}
