//! Table output for agent listings using comfy-table.

use comfy_table::{presets, Attribute, Cell, Color, ContentArrangement, Table};
use std::env;

use crate::domain::models::description::truncate_chars;
use crate::services::AgentSummary;

const ROLE_COLUMN_CHARS: usize = 60;

/// Table formatter for CLI output
pub struct AgentTableFormatter {
    /// Whether to use colors in output
    use_colors: bool,
    /// Maximum width for tables (None = auto)
    max_width: Option<usize>,
}

impl AgentTableFormatter {
    pub fn new() -> Self {
        Self {
            use_colors: supports_color(),
            max_width: None,
        }
    }

    pub fn with_config(use_colors: bool, max_width: Option<usize>) -> Self {
        Self {
            use_colors,
            max_width,
        }
    }

    /// Format installed agents as a table
    pub fn format_agents(&self, agents: &[AgentSummary]) -> String {
        let mut table = self.create_base_table();

        table.set_header(vec![
            Cell::new("Name").add_attribute(Attribute::Bold),
            Cell::new("Size").add_attribute(Attribute::Bold),
            Cell::new("Modified").add_attribute(Attribute::Bold),
            Cell::new("Role").add_attribute(Attribute::Bold),
        ]);

        for agent in agents {
            let name_cell = if self.use_colors {
                Cell::new(&agent.name).fg(Color::Cyan)
            } else {
                Cell::new(&agent.name)
            };
            let modified = agent
                .modified
                .map(|m| m.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| "-".to_string());

            table.add_row(vec![
                name_cell,
                Cell::new(format_size(agent.size)),
                Cell::new(modified),
                Cell::new(truncate_chars(&agent.role, ROLE_COLUMN_CHARS)),
            ]);
        }

        table.to_string()
    }

    fn create_base_table(&self) -> Table {
        let mut table = Table::new();

        table
            .load_preset(presets::UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);

        if let Some(width) = self.max_width {
            table.set_width(u16::try_from(width).unwrap_or(u16::MAX));
        }

        table
    }
}

impl Default for AgentTableFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// Check if color output is supported
fn supports_color() -> bool {
    // Respect NO_COLOR environment variable
    if env::var("NO_COLOR").is_ok() {
        return false;
    }

    if let Ok(term) = env::var("TERM") {
        if term == "dumb" {
            return false;
        }
    }

    true
}

fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{bytes} B")
    } else {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn summary(name: &str, role: &str) -> AgentSummary {
        AgentSummary {
            name: name.to_string(),
            file: PathBuf::from(format!("{name}.md")),
            size: 2048,
            modified: None,
            role: role.to_string(),
        }
    }

    #[test]
    fn test_format_agents_plain() {
        let formatter = AgentTableFormatter::with_config(false, Some(120));
        let out = formatter.format_agents(&[
            summary("go-specialist", "You are a Go expert."),
            summary("rust-specialist", "You are a Rust expert."),
        ]);

        assert!(out.contains("Name"));
        assert!(out.contains("go-specialist"));
        assert!(out.contains("2.0 KB"));
        assert!(out.contains("You are a Rust expert."));
    }

    #[test]
    fn test_long_role_is_truncated() {
        let formatter = AgentTableFormatter::with_config(false, Some(200));
        let role = format!("{}tail", "ab ".repeat(30));
        let out = formatter.format_agents(&[summary("go-specialist", &role)]);

        let expected = truncate_chars(&role, ROLE_COLUMN_CHARS);
        assert!(expected.ends_with("ab ab..."));
        assert!(out.contains(&expected));
        assert!(!out.contains("tail"));
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(1536), "1.5 KB");
    }
}
