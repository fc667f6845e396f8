//! Show command - Render the roadmap as a dependency tree
//!
//! Items are grouped by phase; inside a phase each item hangs under its last
//! dependency. Without any ids or dependencies the roadmap renders flat.

use anyhow::Result;
use colored::Colorize;
use rmap_core::exporter::markdown;
use rmap_core::types::clamp_percent;
use rmap_core::{
    build_render_plan, build_render_plan_with_mode, ExportConfig, FlatEntry, ItemStatus,
    RenderPlan, RoadmapData, RoadmapItem,
};
use serde::Serialize;
use std::path::Path;

use crate::config::RmapConfig;
use crate::locate;
use crate::output::{
    truncate, Column, CsvOutput, NodeKind, Output, OutputConfig, OutputFormat, Outputter,
    TreeNode, TreeOutput,
};

const BAR_WIDTH: usize = 30;

/// Glyph drawn in front of an item.
pub fn status_glyph(status: ItemStatus) -> &'static str {
    match status {
        ItemStatus::Done => "\u{2713}",
        ItemStatus::Active => "\u{25b6}",
        ItemStatus::Pending => "\u{25cb}",
        ItemStatus::Suspended => "\u{2016}",
        ItemStatus::Blocked => "\u{2717}",
    }
}

fn colored_glyph(status: ItemStatus) -> String {
    let glyph = status_glyph(status);
    match status {
        ItemStatus::Done => glyph.green().to_string(),
        ItemStatus::Active => glyph.cyan().bold().to_string(),
        ItemStatus::Pending => glyph.dimmed().to_string(),
        ItemStatus::Suspended => glyph.yellow().to_string(),
        ItemStatus::Blocked => glyph.red().bold().to_string(),
    }
}

/// Fixed-width progress bar; out-of-range input is clamped first.
pub fn progress_bar(percent: f64, width: usize) -> String {
    let filled = ((clamp_percent(percent) / 100.0) * width as f64).round() as usize;
    let filled = filled.min(width);
    format!("{}{}", "\u{2588}".repeat(filled), "\u{2591}".repeat(width - filled))
}

/// A rendering plan together with the display settings used to draw it.
#[derive(Debug, Serialize)]
pub struct RoadmapView<'a> {
    #[serde(flatten)]
    pub plan: RenderPlan<'a>,
    #[serde(skip)]
    pub display: ExportConfig,
}

/// One CSV row per rendered item.
#[derive(Debug, Serialize)]
struct ItemRow<'a> {
    phase: Option<&'a str>,
    depth: usize,
    status: ItemStatus,
    id: Option<&'a str>,
    item: &'a str,
    depends_on: &'a [String],
}

impl<'a> RoadmapView<'a> {
    /// Build the view; `flat` forces the plain phase-grouped list.
    pub fn new(data: &'a RoadmapData, display: ExportConfig, flat: bool) -> Self {
        let plan = if flat {
            build_render_plan_with_mode(data, false)
        } else {
            build_render_plan(data)
        };
        Self { plan, display }
    }

    fn phase_heading(&self, phase: Option<&str>) -> String {
        phase.unwrap_or(self.display.no_phase_label.as_str()).to_string()
    }

    fn item_line(&self, entry: &FlatEntry<'_>, config: &OutputConfig) -> String {
        let indent = " ".repeat((entry.depth + 1) * self.display.indent);
        let item = entry.item;

        let mut text = item.item_text.clone();
        if config.should_truncate() {
            let room = config.effective_width().saturating_sub(indent.len() + 2);
            text = truncate(&text, room.max(8));
        }
        let text = match item.status {
            ItemStatus::Done => text.dimmed().to_string(),
            ItemStatus::Active => text.bold().to_string(),
            _ => text,
        };

        let mut line = format!("{}{} {}", indent, colored_glyph(item.status), text);
        if self.display.show_ids {
            if let Some(id) = item.id() {
                line.push_str(&format!(" {}", format!("[{}]", id).dimmed()));
            }
        }
        line
    }

    fn tree_nodes(&self, entries: &[FlatEntry<'_>]) -> Vec<TreeNode> {
        let mut roots = Vec::new();
        let mut open: Vec<TreeNode> = Vec::new();

        for entry in entries {
            while open.len() > entry.depth {
                close_node(&mut open, &mut roots);
            }
            open.push(self.item_node(entry.item));
        }
        while !open.is_empty() {
            close_node(&mut open, &mut roots);
        }

        roots
    }

    fn item_node(&self, item: &RoadmapItem) -> TreeNode {
        let node = TreeNode::new(
            format!("{} {}", status_glyph(item.status), item.item_text),
            NodeKind::Item(item.status),
        );
        match item.id() {
            Some(id) if self.display.show_ids => node.with_suffix(format!("[{}]", id)),
            _ => node,
        }
    }
}

/// Pop the innermost open node and attach it to its parent or the roots.
fn close_node(open: &mut Vec<TreeNode>, roots: &mut Vec<TreeNode>) {
    if let Some(done) = open.pop() {
        match open.last_mut() {
            Some(parent) => parent.children.push(done),
            None => roots.push(done),
        }
    }
}

impl Outputter for RoadmapView<'_> {
    fn to_table(&self, config: &OutputConfig) -> String {
        let percent = self.plan.progress_percent;
        let mut lines = vec![format!(
            "{} {} {:.0}%",
            "Progress".bold(),
            progress_bar(percent, BAR_WIDTH).green(),
            percent
        )];

        if self.plan.is_empty() {
            lines.push(String::new());
            lines.push(format!("{}", "(no items)".dimmed()));
        }

        for section in &self.plan.sections {
            lines.push(String::new());
            lines.push(self.phase_heading(section.phase).blue().bold().to_string());
            for entry in &section.entries {
                lines.push(self.item_line(entry, config));
            }
        }

        if !self.plan.warnings.is_empty() {
            lines.push(String::new());
            for warning in self.plan.warnings {
                lines.push(format!("{} {}", "WARNING:".yellow().bold(), warning));
            }
        }

        lines.join("\n")
    }

    fn to_csv(&self, config: &OutputConfig) -> String {
        let rows: Vec<ItemRow<'_>> = self
            .plan
            .sections
            .iter()
            .flat_map(|section| {
                section.entries.iter().map(move |entry| ItemRow {
                    phase: section.phase,
                    depth: entry.depth,
                    status: entry.item.status,
                    id: entry.item.id(),
                    item: &entry.item.item_text,
                    depends_on: &entry.item.depends_on,
                })
            })
            .collect();

        let columns = vec![
            Column::new("phase", "phase"),
            Column::new("depth", "depth"),
            Column::new("status", "status"),
            Column::new("id", "id"),
            Column::new("item", "item"),
            Column::new("depends_on", "depends_on"),
        ];
        CsvOutput::format_with_columns(&rows, &columns, config)
    }

    fn to_tree(&self, config: &OutputConfig) -> String {
        let sections: Vec<TreeNode> = self
            .plan
            .sections
            .iter()
            .map(|section| {
                TreeNode::new(self.phase_heading(section.phase), NodeKind::Phase)
                    .with_children(self.tree_nodes(&section.entries))
            })
            .collect();

        let root = format!("Roadmap ({:.0}%)", self.plan.progress_percent);
        TreeOutput::from_nodes(&root, &sections, config)
    }

    fn to_markdown(&self, _config: &OutputConfig) -> String {
        markdown::export(&self.plan, &self.display)
    }
}

/// Load and render the roadmap at `path` with the given output settings.
pub fn render(
    path: &Path,
    hide_ids: bool,
    flat: bool,
    config: &RmapConfig,
    output: OutputConfig,
) -> Result<String> {
    let data = locate::load(path)?;
    let view = RoadmapView::new(&data, config.export_config(hide_ids), flat);
    Ok(Output::with_config(view, output).render_to_string())
}

/// Run the show command.
pub async fn run(
    path: Option<&str>,
    hide_ids: bool,
    flat: bool,
    config: &RmapConfig,
    format: OutputFormat,
) -> Result<()> {
    let path = locate::resolve_roadmap_path(path, config)?;
    let output = super::output_config(format, config);
    println!("{}", render(&path, hide_ids, flat, config, output)?.trim_end());
    Ok(())
}
