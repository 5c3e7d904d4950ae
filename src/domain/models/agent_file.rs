//! Agent prompt files and the document written for each of them.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::description::{describe, truncate_chars};
use super::frontmatter::{split_frontmatter, ExistingFrontmatter, Frontmatter};
use crate::domain::errors::{SyncError, SyncResult};

/// What to do with a source file that already starts with a `---` block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrontmatterPolicy {
    /// Copy the file untouched.
    Skip,
    /// Strip the block and write a fresh header.
    #[default]
    Regenerate,
}

impl FrontmatterPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            FrontmatterPolicy::Skip => "skip",
            FrontmatterPolicy::Regenerate => "regenerate",
        }
    }

    pub fn parse_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "skip" | "preserve" => Some(FrontmatterPolicy::Skip),
            "regenerate" | "replace" => Some(FrontmatterPolicy::Regenerate),
            _ => None,
        }
    }
}

impl fmt::Display for FrontmatterPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a target document was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderAction {
    /// Source had no frontmatter; a header was prepended.
    Generated,
    /// Source frontmatter was stripped and replaced.
    Regenerated,
    /// Source frontmatter was kept and the file copied as is.
    Preserved,
}

impl RenderAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            RenderAction::Generated => "generated",
            RenderAction::Regenerated => "regenerated",
            RenderAction::Preserved => "preserved",
        }
    }
}

/// Header values that do not come from the file itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderSettings {
    pub version: String,
    pub tools: Vec<String>,
    pub max_description_chars: usize,
    pub fallback_description: String,
}

/// A Markdown agent prompt read from the source directory.
#[derive(Debug, Clone)]
pub struct AgentFile {
    pub path: PathBuf,
    /// File stem, e.g. `go-agent` for `go-agent.md`.
    pub base_name: String,
    pub content: String,
}

impl AgentFile {
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        let path = path.into();
        let base_name = base_name_of(&path);
        Self {
            path,
            base_name,
            content: content.into(),
        }
    }

    pub async fn load(path: &Path) -> SyncResult<Self> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| SyncError::io(path, e))?;
        Ok(Self::new(path, content))
    }

    pub fn has_frontmatter(&self) -> bool {
        split_frontmatter(&self.content).frontmatter.is_some()
    }

    /// Description for the generated header.
    ///
    /// A non-blank `description` in an existing block is reused; otherwise
    /// the body is scanned, falling back to the configured default.
    pub fn description(&self, settings: &RenderSettings) -> String {
        let split = split_frontmatter(&self.content);

        if let Some(yaml) = split.frontmatter {
            match ExistingFrontmatter::parse(yaml) {
                Ok(existing) => {
                    if let Some(desc) = existing.description() {
                        return truncate_chars(desc, settings.max_description_chars);
                    }
                }
                Err(e) => {
                    tracing::warn!(
                        path = %self.path.display(),
                        error = %e,
                        "existing frontmatter is not valid YAML, ignoring it"
                    );
                }
            }
        }

        describe(
            split.body,
            settings.max_description_chars,
            &settings.fallback_description,
        )
    }
}

/// Result of combining a header with an original document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedDocument {
    pub content: String,
    pub action: RenderAction,
}

/// Combine `header` with `original` according to `policy`.
///
/// The body following the header is the original content minus any leading
/// byte order mark and frontmatter block, byte for byte.
pub fn compose_document(
    original: &str,
    header: &Frontmatter,
    policy: FrontmatterPolicy,
) -> ComposedDocument {
    let split = split_frontmatter(original);

    match (split.frontmatter, policy) {
        (Some(_), FrontmatterPolicy::Skip) => ComposedDocument {
            content: original.to_string(),
            action: RenderAction::Preserved,
        },
        (Some(_), FrontmatterPolicy::Regenerate) => ComposedDocument {
            content: format!("{}{}", header.render(), split.body),
            action: RenderAction::Regenerated,
        },
        (None, _) => ComposedDocument {
            content: format!("{}{}", header.render(), split.body),
            action: RenderAction::Generated,
        },
    }
}

/// File stem of `path`, lossily converted.
pub fn base_name_of(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::description::FALLBACK_DESCRIPTION;

    fn settings() -> RenderSettings {
        RenderSettings {
            version: "1.0".to_string(),
            tools: vec!["*".to_string()],
            max_description_chars: 150,
            fallback_description: FALLBACK_DESCRIPTION.to_string(),
        }
    }

    fn header(name: &str, description: &str) -> Frontmatter {
        Frontmatter {
            name: name.to_string(),
            description: description.to_string(),
            version: "1.0".to_string(),
            tools: vec!["*".to_string()],
        }
    }

    #[test]
    fn test_base_name() {
        let agent = AgentFile::new("/src/agents/go-agent.md", "");
        assert_eq!(agent.base_name, "go-agent");
    }

    #[test]
    fn test_description_from_body() {
        let agent = AgentFile::new("go-agent.md", "## Role\nYou are a Go expert.");
        assert_eq!(agent.description(&settings()), "You are a Go expert.");
    }

    #[test]
    fn test_description_reuses_existing_block() {
        let agent = AgentFile::new(
            "go-agent.md",
            "---\nname: go\ndescription: Writes Go services\n---\n## Role\nYou are a Go expert.\n",
        );
        assert_eq!(agent.description(&settings()), "Writes Go services");
    }

    #[test]
    fn test_description_with_broken_block_scans_body() {
        let agent = AgentFile::new("x.md", "---\n: : :\n  - [\n---\nYou are resilient.\n");
        assert_eq!(agent.description(&settings()), "You are resilient.");
    }

    #[test]
    fn test_description_fallback() {
        let agent = AgentFile::new("notes.md", "Nothing to see.");
        assert_eq!(agent.description(&settings()), FALLBACK_DESCRIPTION);
    }

    #[test]
    fn test_compose_generated() {
        let original = "## Role\nYou are a Go expert.";
        let doc = compose_document(
            original,
            &header("go-specialist", "You are a Go expert."),
            FrontmatterPolicy::Regenerate,
        );
        assert_eq!(doc.action, RenderAction::Generated);
        assert!(doc.content.starts_with("---\nname: \"go-specialist\"\n"));
        assert!(doc.content.ends_with(original));
    }

    #[test]
    fn test_compose_regenerate_strips_block() {
        let original = "---\nname: old\n---\n# Body\n";
        let doc = compose_document(original, &header("new", "d"), FrontmatterPolicy::Regenerate);
        assert_eq!(doc.action, RenderAction::Regenerated);
        assert!(!doc.content.contains("name: old"));
        assert!(doc.content.ends_with("---\n# Body\n"));
    }

    #[test]
    fn test_compose_skip_preserves_block() {
        let original = "---\nname: old\n---\n# Body\n";
        let doc = compose_document(original, &header("new", "d"), FrontmatterPolicy::Skip);
        assert_eq!(doc.action, RenderAction::Preserved);
        assert_eq!(doc.content, original);
    }

    #[test]
    fn test_compose_skip_without_block_still_generates() {
        let doc = compose_document("# Body\n", &header("new", "d"), FrontmatterPolicy::Skip);
        assert_eq!(doc.action, RenderAction::Generated);
    }

    #[test]
    fn test_regenerate_is_stable_on_own_output() {
        let first = compose_document("# Body\n", &header("a", "d"), FrontmatterPolicy::Regenerate);
        let second = compose_document(&first.content, &header("a", "d"), FrontmatterPolicy::Regenerate);
        assert_eq!(first.content, second.content);
    }

    #[test]
    fn test_byte_order_mark_before_block() {
        let original = "\u{feff}---\nname: go\ndescription: Old\n---\n# Body\n";
        let agent = AgentFile::new("go-agent.md", original);
        assert!(agent.has_frontmatter());
        assert_eq!(agent.description(&settings()), "Old");

        let doc = compose_document(original, &header("go-specialist", "Old"), FrontmatterPolicy::Regenerate);
        assert_eq!(doc.action, RenderAction::Regenerated);
        assert_eq!(doc.content.matches("---\n").count(), 2);
        assert!(!doc.content.contains("name: go\n"));
        assert!(!doc.content.contains('\u{feff}'));
        assert!(doc.content.ends_with("---\n# Body\n"));

        let kept = compose_document(original, &header("go-specialist", "Old"), FrontmatterPolicy::Skip);
        assert_eq!(kept.action, RenderAction::Preserved);
        assert_eq!(kept.content, original);
    }

    #[test]
    fn test_byte_order_mark_without_block_is_dropped() {
        let doc = compose_document("\u{feff}# Body\n", &header("a", "d"), FrontmatterPolicy::Regenerate);
        assert_eq!(doc.action, RenderAction::Generated);
        assert!(doc.content.starts_with("---\n"));
        assert!(doc.content.ends_with("---\n# Body\n"));
        assert!(!doc.content.contains('\u{feff}'));
    }

    #[test]
    fn test_policy_parse() {
        assert_eq!(FrontmatterPolicy::parse_str("skip"), Some(FrontmatterPolicy::Skip));
        assert_eq!(FrontmatterPolicy::parse_str("Regenerate"), Some(FrontmatterPolicy::Regenerate));
        assert_eq!(FrontmatterPolicy::parse_str("merge"), None);
        assert_eq!(FrontmatterPolicy::default(), FrontmatterPolicy::Regenerate);
    }
}
