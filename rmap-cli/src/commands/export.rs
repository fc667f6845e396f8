//! Export command - Write the roadmap in a shareable format
//!
//! Formats:
//! - outline: indented plain text with status markers
//! - markdown: a roadmap file that parses back to the same structure;
//!   sections with duplicate ids are written in file order
//! - json: the full rendering plan

use crate::config::RmapConfig;
use crate::locate;
use crate::output::{Output, OutputFormat, TableDisplay};
use anyhow::{Context, Result};
use colored::Colorize;
use rmap_core::exporter::{self, ExportFormat};
use rmap_core::{build_render_plan, build_render_plan_with_mode};
use serde::Serialize;
use std::fs;

/// Result of an export run.
#[derive(Debug, Serialize)]
pub struct ExportResult {
    pub format: String,
    pub item_count: usize,
    pub section_count: usize,
    pub output_path: Option<String>,
    pub content: String,
}

impl TableDisplay for ExportResult {
    fn to_table(&self) -> String {
        match self.output_path {
            Some(ref path) => format!(
                "{} Exported {} items in {} sections to {}",
                "SUCCESS:".green().bold(),
                self.item_count,
                self.section_count,
                path.cyan()
            ),
            None => self.content.clone(),
        }
    }

    fn to_markdown(&self) -> String {
        self.to_table()
    }
}

/// Run the export command.
pub async fn run(
    path: Option<&str>,
    export_format: &str,
    output_path: Option<&str>,
    hide_ids: bool,
    flat: bool,
    config: &RmapConfig,
    format: OutputFormat,
) -> Result<()> {
    let exp_format: ExportFormat = export_format.parse().map_err(|e: String| {
        anyhow::anyhow!("{}. Valid formats: outline, markdown, json", e)
    })?;

    let roadmap_path = locate::resolve_roadmap_path(path, config)?;
    let data = locate::load(&roadmap_path)?;
    let plan = if flat {
        build_render_plan_with_mode(&data, false)
    } else {
        build_render_plan(&data)
    };

    let content = exporter::export(&plan, exp_format, &config.export_config(hide_ids))
        .context("Failed to serialize roadmap")?;

    if let Some(out) = output_path {
        fs::write(out, &content).with_context(|| format!("Failed to write {}", out))?;
        tracing::info!(path = out, format = %exp_format, "exported roadmap");
    }

    let result = ExportResult {
        format: exp_format.as_str().to_string(),
        item_count: plan.len(),
        section_count: plan.sections.len(),
        output_path: output_path.map(str::to_string),
        content: if output_path.is_some() {
            String::new()
        } else {
            content
        },
    };

    Output::with_config(result, super::output_config(format, config)).render()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_table_prints_content_without_file() {
        colored::control::set_override(false);
        let result = ExportResult {
            format: "outline".to_string(),
            item_count: 1,
            section_count: 1,
            output_path: None,
            content: "Progress: 0%\n\nGeneral\n  [ ] A\n".to_string(),
        };
        assert_eq!(TableDisplay::to_table(&result), result.content);
    }

    #[test]
    fn test_result_table_reports_file() {
        colored::control::set_override(false);
        let result = ExportResult {
            format: "json".to_string(),
            item_count: 3,
            section_count: 2,
            output_path: Some("plan.json".to_string()),
            content: String::new(),
        };
        assert_eq!(
            TableDisplay::to_table(&result),
            "SUCCESS: Exported 3 items in 2 sections to plan.json"
        );
    }
}
