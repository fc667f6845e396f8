//! Check command - Report dependency problems in a roadmap
//!
//! Lists the warnings attached by the roadmap source: dangling references,
//! duplicate ids, cycles and cross-phase parents. `--strict` turns any
//! warning into a failing exit code, for CI.

use crate::config::RmapConfig;
use crate::locate;
use crate::output::{Alignment, Column, Output, OutputConfig, OutputFormat, Outputter, TableOutput};
use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

const MIN_MESSAGE_WIDTH: usize = 40;

/// One reported problem.
#[derive(Debug, Clone, Serialize)]
pub struct CheckWarning {
    pub index: usize,
    pub message: String,
}

/// Result of checking a roadmap.
#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    pub path: String,
    pub item_count: usize,
    pub warnings: Vec<CheckWarning>,
}

impl CheckReport {
    pub fn new(path: String, item_count: usize, warnings: &[String]) -> Self {
        Self {
            path,
            item_count,
            warnings: warnings
                .iter()
                .enumerate()
                .map(|(i, message)| CheckWarning {
                    index: i + 1,
                    message: message.clone(),
                })
                .collect(),
        }
    }

    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

impl Outputter for CheckReport {
    fn to_table(&self, config: &OutputConfig) -> String {
        if self.is_clean() {
            return format!(
                "{} {} items in {}, no problems found",
                "OK:".green().bold(),
                self.item_count,
                self.path
            );
        }

        // Room for the index column and the borders
        let message_width = config.effective_width().saturating_sub(12).max(MIN_MESSAGE_WIDTH);
        let columns = vec![
            Column::new("#", "index").with_alignment(Alignment::Right),
            Column::new("Warning", "message").with_max_width(message_width),
        ];
        format!(
            "{} {} problem(s) in {}\n{}",
            "WARNING:".yellow().bold(),
            self.warnings.len(),
            self.path,
            TableOutput::format_with_columns(&self.warnings, &columns, config)
        )
    }

    fn to_markdown(&self, _config: &OutputConfig) -> String {
        if self.is_clean() {
            return format!("No problems found in `{}`.", self.path);
        }
        let mut lines = vec![format!("## Problems in `{}`", self.path), String::new()];
        for warning in &self.warnings {
            lines.push(format!("{}. {}", warning.index, warning.message));
        }
        lines.join("\n")
    }
}

/// Run the check command.
pub async fn run(
    path: Option<&str>,
    strict: bool,
    config: &RmapConfig,
    format: OutputFormat,
) -> Result<()> {
    let roadmap_path = locate::resolve_roadmap_path(path, config)?;
    let data = locate::load(&roadmap_path)?;

    let report = CheckReport::new(
        roadmap_path.display().to_string(),
        data.items.len(),
        &data.warnings,
    );
    let problems = report.warnings.len();

    Output::with_config(report, super::output_config(format, config)).render()?;

    if strict && problems > 0 {
        anyhow::bail!("{} problem(s) found", problems);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(format: OutputFormat) -> OutputConfig {
        OutputConfig::new(format).without_colors().without_truncation()
    }

    #[test]
    fn test_clean_report() {
        colored::control::set_override(false);
        let report = CheckReport::new("ROADMAP.md".to_string(), 3, &[]);
        assert!(report.is_clean());
        assert_eq!(
            report.to_table(&plain(OutputFormat::Table)),
            "OK: 3 items in ROADMAP.md, no problems found"
        );
    }

    #[test]
    fn test_report_numbers_warnings() {
        let warnings = vec![
            "Item 'b' depends on 'ghost' which does not exist".to_string(),
            "Duplicate id 'a'".to_string(),
        ];
        let report = CheckReport::new("ROADMAP.md".to_string(), 4, &warnings);

        assert_eq!(report.warnings[1].index, 2);
        let md = report.to_markdown(&plain(OutputFormat::Markdown));
        assert!(md.contains("1. Item 'b' depends on 'ghost' which does not exist"));
        assert!(md.contains("2. Duplicate id 'a'"));
    }

    #[test]
    fn test_table_honours_output_config() {
        colored::control::set_override(false);
        let long = format!("Item 'a' depends on '{}' which does not exist", "x".repeat(1000));
        let report = CheckReport::new("ROADMAP.md".to_string(), 1, &[long.clone()]);

        let full = report.to_table(&plain(OutputFormat::Table));
        assert!(full.contains(&long));
        assert!(full.contains('\u{256d}'));

        let compact = report.to_table(&OutputConfig::new(OutputFormat::Table).without_colors().compact());
        assert!(!compact.contains(&long));
        assert!(compact.contains("..."));
        assert!(!compact.contains('\u{256d}'));
    }
}
