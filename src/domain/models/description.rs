//! Description extraction from agent prompt bodies.
//!
//! Agent prompts follow a loose convention: a `## Role` section whose first
//! paragraph summarises the persona, or an opening `You are ...` sentence.
//! Extraction is best effort and returns a typed result so callers can tell
//! "nothing found" apart from "found, but empty".

use std::sync::LazyLock;

use regex::Regex;

use super::frontmatter::split_frontmatter;

/// Used in the generated header when nothing can be extracted.
pub const FALLBACK_DESCRIPTION: &str = "Specialized agent for Claude Code";

/// Default character budget for generated descriptions.
pub const DEFAULT_MAX_DESCRIPTION_CHARS: usize = 150;

const ELLIPSIS: &str = "...";

static ROLE_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^##\s+role\b").expect("role heading pattern is valid")
});

/// Where an extracted description came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescriptionSource {
    RoleSection,
    YouAreLine,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedDescription {
    pub text: String,
    pub source: DescriptionSource,
}

/// Extract a one-line description from an agent document.
///
/// Any leading frontmatter is ignored. The first text line of the first
/// `## Role` section wins, then the first line starting with `You are`. A
/// `## Role` heading with no text under it yields `Some` with empty text.
pub fn extract_description(content: &str, max_chars: usize) -> Option<ExtractedDescription> {
    let body = split_frontmatter(content).body;
    let lines: Vec<&str> = body.lines().map(str::trim).collect();

    let role_heading = lines.iter().position(|l| ROLE_HEADING.is_match(l));

    if let Some(idx) = role_heading {
        let role_text = lines[idx + 1..]
            .iter()
            .take_while(|l| !is_heading(l))
            .find(|l| !l.is_empty());
        if let Some(text) = role_text {
            return Some(ExtractedDescription {
                text: truncate_chars(text, max_chars),
                source: DescriptionSource::RoleSection,
            });
        }
    }

    if let Some(line) = lines.iter().find(|l| l.starts_with("You are")) {
        return Some(ExtractedDescription {
            text: truncate_chars(line, max_chars),
            source: DescriptionSource::YouAreLine,
        });
    }

    role_heading.map(|_| ExtractedDescription {
        text: String::new(),
        source: DescriptionSource::RoleSection,
    })
}

/// Extracted description, or `fallback` when extraction found nothing usable.
pub fn describe(content: &str, max_chars: usize, fallback: &str) -> String {
    match extract_description(content, max_chars) {
        Some(found) if !found.text.is_empty() => found.text,
        _ => truncate_chars(fallback, max_chars),
    }
}

/// Truncate to at most `max_chars` characters, ending in `...` when cut.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let keep = max_chars.saturating_sub(ELLIPSIS.len());
    let head: String = text.chars().take(keep).collect();
    format!("{}{ELLIPSIS}", head.trim_end())
}

fn is_heading(line: &str) -> bool {
    line.starts_with('#')
}
