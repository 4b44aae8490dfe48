//! Table output for stored repositories using comfy-table.

use std::env;

use comfy_table::{presets, Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::domain::models::Repository;

use super::truncate;

const DESCRIPTION_WIDTH: usize = 50;

/// Table formatter for CLI output
pub struct TableFormatter {
    use_colors: bool,
    /// Maximum width for tables (None = auto)
    max_width: Option<u16>,
}

impl TableFormatter {
    pub fn new() -> Self {
        Self {
            use_colors: supports_color(),
            max_width: None,
        }
    }

    pub fn with_config(use_colors: bool, max_width: Option<u16>) -> Self {
        Self {
            use_colors,
            max_width,
        }
    }

    pub fn format_repositories(&self, repositories: &[Repository]) -> String {
        let mut table = self.create_base_table();

        table.set_header(
            ["ID", "Repository", "Stars", "Open issues", "Contributors", "Description"]
                .into_iter()
                .map(|h| Cell::new(h).add_attribute(Attribute::Bold)),
        );

        for repo in repositories {
            let name = if self.use_colors {
                Cell::new(&repo.full_name).fg(Color::Cyan)
            } else {
                Cell::new(&repo.full_name)
            };

            table.add_row(vec![
                Cell::new(repo.id).set_alignment(CellAlignment::Right),
                name,
                Cell::new(repo.stars).set_alignment(CellAlignment::Right),
                Cell::new(repo.open_issues_count).set_alignment(CellAlignment::Right),
                Cell::new(repo.contributors_count).set_alignment(CellAlignment::Right),
                Cell::new(truncate(
                    repo.description.as_deref().unwrap_or("-"),
                    DESCRIPTION_WIDTH,
                )),
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
            table.set_width(width);
        }

        table
    }
}

impl Default for TableFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// Check if color output is supported
fn supports_color() -> bool {
    if env::var_os("NO_COLOR").is_some() {
        return false;
    }

    !matches!(env::var("TERM").as_deref(), Ok("dumb"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repository(id: i64, full_name: &str, description: Option<&str>) -> Repository {
        Repository {
            id,
            full_name: full_name.to_string(),
            description: description.map(str::to_string),
            html_url: format!("https://github.com/{full_name}"),
            stars: 1200,
            open_issues_count: 4,
            contributors_count: 31,
        }
    }

    #[test]
    fn test_table_formatter_with_config() {
        let formatter = TableFormatter::with_config(false, Some(120));
        assert!(!formatter.use_colors);
        assert_eq!(formatter.max_width, Some(120));
    }

    #[test]
    fn test_format_repositories() {
        let formatter = TableFormatter::with_config(false, Some(200));
        let output = formatter.format_repositories(&[
            repository(1, "serde-rs/json", Some("Strongly typed JSON library")),
            repository(2, "simd-lite/simd-json", None),
        ]);

        assert!(output.contains("Repository"));
        assert!(output.contains("serde-rs/json"));
        assert!(output.contains("Strongly typed JSON library"));
        assert!(output.contains("1200"));
        assert!(output.contains("simd-lite/simd-json"));
    }
}
