//! Source-to-target agent name table.
//!
//! The host application discovers agents by file name, so several source
//! prompts are installed under a more descriptive identifier. This is the
//! single table for that mapping; configuration may extend or override it.

use std::collections::BTreeMap;

use crate::domain::errors::{SyncError, SyncResult};

/// Built-in mapping from source base name (file stem) to target identifier.
pub const DEFAULT_NAME_MAP: &[(&str, &str)] = &[
    ("go-agent", "go-specialist"),
    ("rust-agent", "rust-specialist"),
    ("python-agent", "python-specialist"),
    ("typescript-agent", "typescript-specialist"),
    ("java-agent", "java-specialist"),
    ("frontend-agent", "frontend-developer"),
    ("backend-agent", "backend-developer"),
    ("devops-agent", "devops-engineer"),
    ("security-agent", "security-auditor"),
    ("database-agent", "database-architect"),
    ("test-agent", "test-engineer"),
    ("docs-agent", "technical-writer"),
    ("code-review-agent", "code-reviewer"),
    ("architect-agent", "software-architect"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameMap {
    entries: BTreeMap<String, String>,
}

impl Default for NameMap {
    fn default() -> Self {
        Self {
            entries: DEFAULT_NAME_MAP
                .iter()
                .map(|(from, to)| ((*from).to_string(), (*to).to_string()))
                .collect(),
        }
    }
}

impl NameMap {
    /// An empty table; every lookup falls back to identity.
    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Built-in table with configured entries layered on top.
    pub fn with_overrides<I, K, V>(overrides: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut map = Self::default();
        for (from, to) in overrides {
            map.entries.insert(from.into(), to.into());
        }
        map
    }

    /// Target identifier for `base_name`, or `base_name` itself when unmapped.
    pub fn resolve_target_name(&self, base_name: &str) -> String {
        match self.entries.get(base_name) {
            Some(target) => target.clone(),
            None => {
                tracing::debug!(base_name, "no name mapping, keeping source name");
                base_name.to_string()
            }
        }
    }

    /// Reject targets that cannot be used as a file stem.
    pub fn validate(&self) -> SyncResult<()> {
        for (from, to) in &self.entries {
            if from.trim().is_empty() {
                return Err(SyncError::InvalidNameMap(
                    "mapping source cannot be empty".to_string(),
                ));
            }
            if to.trim().is_empty() {
                return Err(SyncError::InvalidNameMap(format!(
                    "target for '{from}' cannot be empty"
                )));
            }
            if to.contains('/') || to.contains('\\') || to == "." || to == ".." {
                return Err(SyncError::InvalidNameMap(format!(
                    "target for '{from}' must be a plain file name, got '{to}'"
                )));
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
