//! YAML frontmatter: splitting existing blocks and rendering the fixed header.
//!
//! The header written in front of every synced agent has a fixed schema:
//!
//! ```markdown
//! ---
//! name: "go-specialist"
//! description: "You are a Go expert."
//! version: "1.0"
//! tools: ["*"]
//! ---
//! ```

use serde::Deserialize;

const DELIMITER: &str = "---";
const BOM: char = '\u{feff}';

/// A Markdown document split at its leading frontmatter block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitDocument<'a> {
    /// Raw YAML between the delimiters, when a closed block leads the file.
    pub frontmatter: Option<&'a str>,
    /// Everything after the closing delimiter line (or the whole input).
    pub body: &'a str,
}

/// Split `content` into its leading `---` block and the remaining body.
///
/// Only a block opened on the very first line and closed by a later line that
/// is exactly `---` counts. An unclosed block is treated as ordinary body text.
/// A leading byte order mark is not part of either half.
pub fn split_frontmatter(content: &str) -> SplitDocument<'_> {
    let content = content.strip_prefix(BOM).unwrap_or(content);
    let whole = SplitDocument {
        frontmatter: None,
        body: content,
    };

    let mut lines = content.split_inclusive('\n');
    let Some(first) = lines.next() else {
        return whole;
    };
    if first.trim_end() != DELIMITER {
        return whole;
    }

    let yaml_start = first.len();
    let mut offset = yaml_start;
    for line in lines {
        if line.trim_end() == DELIMITER {
            return SplitDocument {
                frontmatter: Some(&content[yaml_start..offset]),
                body: &content[offset + line.len()..],
            };
        }
        offset += line.len();
    }

    whole
}

/// Fields read back from a frontmatter block that already exists in a source.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExistingFrontmatter {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl ExistingFrontmatter {
    /// Lenient parse: anything that is not a YAML mapping yields an error,
    /// unknown keys are ignored.
    pub fn parse(yaml: &str) -> Result<Self, serde_yaml::Error> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml)
    }

    /// Non-blank description, trimmed.
    pub fn description(&self) -> Option<&str> {
        self.description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
    }
}

/// The header prepended to every synced agent file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frontmatter {
    pub name: String,
    pub description: String,
    pub version: String,
    pub tools: Vec<String>,
}

impl Frontmatter {
    /// Render the header, including both delimiter lines and a trailing newline.
    pub fn render(&self) -> String {
        let tools = self
            .tools
            .iter()
            .map(|t| quote(t))
            .collect::<Vec<_>>()
            .join(", ");

        format!(
            "{DELIMITER}\nname: {}\ndescription: {}\nversion: {}\ntools: [{}]\n{DELIMITER}\n",
            quote(&self.name),
            quote(&self.description),
            quote(&self.version),
            tools
        )
    }
}

/// Double-quoted scalar. JSON string escaping is a subset of YAML's, but
/// JSON leaves DEL, the C1 controls and the BMP noncharacters raw, and YAML
/// rejects those outright, so they get `\u` escapes too.
fn quote(value: &str) -> String {
    let json = serde_json::Value::String(value.to_string()).to_string();
    if json.chars().all(is_yaml_printable) {
        return json;
    }

    let mut out = String::with_capacity(json.len() + 8);
    for c in json.chars() {
        if is_yaml_printable(c) {
            out.push(c);
        } else {
            out.push_str(&format!("\\u{:04X}", u32::from(c)));
        }
    }
    out
}

/// YAML 1.2 `c-printable`.
fn is_yaml_printable(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n' | '\r'
            | '\u{20}'..='\u{7e}'
            | '\u{85}'
            | '\u{a0}'..='\u{d7ff}'
            | '\u{e000}'..='\u{fffd}'
            | '\u{10000}'..='\u{10ffff}'
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header() -> Frontmatter {
        Frontmatter {
            name: "go-specialist".to_string(),
            description: "You are a Go expert.".to_string(),
            version: "1.0".to_string(),
            tools: vec!["*".to_string()],
        }
    }

    #[test]
    fn test_render_fixed_schema() {
        let rendered = header().render();
        assert_eq!(
            rendered,
            "---\nname: \"go-specialist\"\ndescription: \"You are a Go expert.\"\nversion: \"1.0\"\ntools: [\"*\"]\n---\n"
        );
    }

    #[test]
    fn test_render_escapes_quotes_and_parses_as_yaml() {
        let mut fm = header();
        fm.description = r#"Reviews "unsafe" code: C:\paths and all"#.to_string();
        fm.tools = vec!["Read".to_string(), "Grep".to_string()];

        let rendered = fm.render();
        let split = split_frontmatter(&rendered);
        let value: serde_yaml::Value = serde_yaml::from_str(split.frontmatter.unwrap()).unwrap();

        assert_eq!(value["description"].as_str(), Some(fm.description.as_str()));
        assert_eq!(value["version"].as_str(), Some("1.0"));
        assert_eq!(value["tools"][1].as_str(), Some("Grep"));
        assert_eq!(split.body, "");
    }

    #[test]
    fn test_render_escapes_yaml_forbidden_chars() {
        let mut fm = header();
        fm.description = "Go\u{7f} expert\u{80}\u{9f} with \u{fffe}\u{ffff} noise, caf\u{e9} \u{1f600}".to_string();

        let rendered = fm.render();
        assert!(!rendered.contains('\u{7f}'));
        assert!(!rendered.contains('\u{fffe}'));
        assert!(rendered.contains("\\u007F"));
        assert!(rendered.contains("caf\u{e9}"));

        let yaml = split_frontmatter(&rendered).frontmatter.unwrap();
        let value: serde_yaml::Value = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(value["description"].as_str(), Some(fm.description.as_str()));
    }

    #[test]
    fn test_split_with_frontmatter() {
        let doc = "---\nname: old\ndescription: Old one\n---\n# Agent\n\nBody\n";
        let split = split_frontmatter(doc);
        assert_eq!(split.frontmatter, Some("name: old\ndescription: Old one\n"));
        assert_eq!(split.body, "# Agent\n\nBody\n");
    }

    #[test]
    fn test_split_without_frontmatter() {
        let doc = "# Agent\n---\nnot a header\n";
        let split = split_frontmatter(doc);
        assert!(split.frontmatter.is_none());
        assert_eq!(split.body, doc);
    }

    #[test]
    fn test_split_unclosed_block_is_body() {
        let doc = "---\nname: dangling\n# Agent\n";
        let split = split_frontmatter(doc);
        assert!(split.frontmatter.is_none());
        assert_eq!(split.body, doc);
    }

    #[test]
    fn test_split_crlf_delimiters() {
        let doc = "---\r\nname: x\r\n---\r\nBody\r\n";
        let split = split_frontmatter(doc);
        assert_eq!(split.frontmatter, Some("name: x\r\n"));
        assert_eq!(split.body, "Body\r\n");
    }

    #[test]
    fn test_split_after_byte_order_mark() {
        let doc = "\u{feff}---\nname: go\ndescription: Old\n---\n# Agent\n";
        let split = split_frontmatter(doc);
        assert_eq!(split.frontmatter, Some("name: go\ndescription: Old\n"));
        assert_eq!(split.body, "# Agent\n");

        let plain = split_frontmatter("\u{feff}# Agent\n");
        assert!(plain.frontmatter.is_none());
        assert_eq!(plain.body, "# Agent\n");
    }

    #[test]
    fn test_existing_frontmatter_description() {
        let existing = ExistingFrontmatter::parse("name: x\ndescription: \"  Handles Go  \"\nextra: 1\n").unwrap();
        assert_eq!(existing.name.as_deref(), Some("x"));
        assert_eq!(existing.description(), Some("Handles Go"));

        let blank = ExistingFrontmatter::parse("description: \"\"\n").unwrap();
        assert_eq!(blank.description(), None);

        assert!(ExistingFrontmatter::parse("- just\n- a list\n").is_err());
        assert!(ExistingFrontmatter::parse("").unwrap().description().is_none());
    }
}
