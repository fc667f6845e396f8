//! Status command - Summarize roadmap progress
//!
//! Shows item counts per status, the active item and how many integrity
//! warnings the roadmap carries.

use crate::config::RmapConfig;
use crate::locate;
use crate::output::{Output, OutputConfig, OutputFormat, TableDisplay, TableOutput};
use anyhow::Result;
use colored::Colorize;
use rmap_core::plan::group_by_phase;
use rmap_core::source::active_item;
use rmap_core::{has_dependency_info, ItemStatus, RoadmapData};
use serde::Serialize;
use std::path::Path;
use std::time::Instant;

/// Item count for one status.
#[derive(Debug, Clone, Serialize)]
pub struct StatusCount {
    pub status: ItemStatus,
    pub count: usize,
}

/// Status information for a roadmap.
#[derive(Debug, Clone, Serialize)]
pub struct StatusInfo {
    /// Roadmap file that was read
    pub path: String,
    pub total: usize,
    /// Progress as supplied by the source, clamped
    pub progress_percent: f64,
    pub counts: Vec<StatusCount>,
    /// Text of the first active item
    pub active: Option<String>,
    /// Whether the roadmap renders as a dependency tree
    pub dependency_mode: bool,
    /// Phase labels in first-seen order
    pub phases: Vec<String>,
    pub warning_count: usize,
    /// Time taken to gather status (in milliseconds)
    pub duration_ms: u64,
}

impl StatusInfo {
    pub fn from_data(path: &Path, data: &RoadmapData) -> Self {
        let counts = ItemStatus::ALL
            .iter()
            .map(|&status| StatusCount {
                status,
                count: data.items.iter().filter(|i| i.status == status).count(),
            })
            .collect();

        let phases = group_by_phase(&data.items)
            .into_iter()
            .filter_map(|g| g.phase.map(str::to_string))
            .collect();

        Self {
            path: path.display().to_string(),
            total: data.items.len(),
            progress_percent: data.display_progress(),
            counts,
            active: active_item(&data.items).map(|i| i.item_text.clone()),
            dependency_mode: has_dependency_info(&data.items),
            phases,
            warning_count: data.warnings.len(),
            duration_ms: 0,
        }
    }

    fn count(&self, status: ItemStatus) -> usize {
        self.counts
            .iter()
            .find(|c| c.status == status)
            .map_or(0, |c| c.count)
    }
}

impl TableDisplay for StatusInfo {
    fn to_table(&self) -> String {
        let mut lines = vec![format!("{} {}", "Roadmap:".green().bold(), self.path)];

        let mut pairs = vec![
            ("Progress", format!("{:.0}%", self.progress_percent)),
            ("Items", self.total.to_string()),
        ];
        for status in ItemStatus::ALL {
            pairs.push((status.as_str(), self.count(status).to_string()));
        }
        pairs.push(("Phases", self.phases.len().to_string()));
        pairs.push((
            "Layout",
            if self.dependency_mode { "tree" } else { "flat" }.to_string(),
        ));
        let config = OutputConfig::new(OutputFormat::Table).without_truncation();
        lines.push(TableOutput::format_key_value(&pairs, &config));

        if let Some(active) = &self.active {
            lines.push(format!("{}: {}", "Active".cyan(), active));
        }

        if self.warning_count > 0 {
            lines.push(format!(
                "{}: {} (run `rmap check` for details)",
                "Warnings".yellow(),
                self.warning_count
            ));
        }

        lines.push(format!("{}", format!("({} ms)", self.duration_ms).dimmed()));

        lines.join("\n")
    }
}

/// Run the status command.
pub async fn run(path: Option<&str>, config: &RmapConfig, format: OutputFormat) -> Result<()> {
    let start = Instant::now();

    let roadmap_path = locate::resolve_roadmap_path(path, config)?;
    let data = locate::load(&roadmap_path)?;

    let mut status = StatusInfo::from_data(&roadmap_path, &data);
    status.duration_ms = start.elapsed().as_millis() as u64;

    Output::with_config(status, super::output_config(format, config)).render()
}
