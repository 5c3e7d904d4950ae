//! Generated listing of installed agents.

use serde::{Deserialize, Serialize};

/// File name of the JSON manifest written into the target directory.
pub const MANIFEST_FILE_NAME: &str = "manifest.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub name: String,
    pub file: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub default: Option<String>,
    pub agents: Vec<ManifestEntry>,
}

impl Manifest {
    /// Build a manifest sorted by agent name.
    ///
    /// `default` is `preferred` when an entry with that name exists, otherwise
    /// the first entry.
    pub fn from_entries(mut entries: Vec<ManifestEntry>, preferred: Option<&str>) -> Self {
        entries.sort_by(|a, b| a.name.cmp(&b.name));

        let default = preferred
            .filter(|p| entries.iter().any(|e| e.name == *p))
            .map(str::to_string)
            .or_else(|| entries.first().map(|e| e.name.clone()));

        if let (Some(wanted), Some(chosen)) = (preferred, default.as_deref()) {
            if wanted != chosen {
                tracing::warn!(wanted, chosen, "default agent not found, using first agent");
            }
        }

        Self {
            default,
            agents: entries,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self).map(|s| format!("{s}\n"))
    }

    /// Markdown catalog table of the manifest entries.
    pub fn to_markdown(&self) -> String {
        let mut lines = vec![
            "# Agent Catalog".to_string(),
            String::new(),
            format!("{} agent(s) available.", self.agents.len()),
        ];

        if let Some(ref default) = self.default {
            lines.push(format!("Default agent: `{default}`"));
        }

        lines.push(String::new());
        lines.push("| Name | File | Description |".to_string());
        lines.push("|------|------|-------------|".to_string());

        for entry in &self.agents {
            let description = entry
                .description
                .as_deref()
                .unwrap_or("")
                .replace('|', "\\|");
            lines.push(format!("| {} | {} | {} |", entry.name, entry.file, description));
        }

        format!("{}\n", lines.join("\n"))
    }
}
