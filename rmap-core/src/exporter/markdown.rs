//! Markdown format exporter.
//!
//! Writes a roadmap file the markdown source can read back. The no-phase
//! section is written first, before any `##` heading, since a heading
//! applies to every item below it. Grouping puts that section last again
//! on re-parse, so the rendered result is unchanged.
//!
//! A section holding a duplicate id is written in file order, still indented
//! by depth. References resolve to the last duplicate, so moving the
//! duplicates into tree order could change which item they resolve to.

use std::collections::HashSet;

use crate::plan::{PlanSection, RenderPlan};
use crate::source::markdown::format_item;
use crate::types::{ExportConfig, RoadmapItem};

/// Export the rendering plan to roadmap markdown.
pub fn export(plan: &RenderPlan<'_>, config: &ExportConfig) -> String {
    let mut lines = vec!["# Roadmap".to_string(), String::new()];

    let (unphased, phased): (Vec<&PlanSection<'_>>, Vec<&PlanSection<'_>>) =
        plan.sections.iter().partition(|s| s.phase.is_none());

    for section in unphased {
        export_entries(section, config, &mut lines);
        lines.push(String::new());
    }

    for section in phased {
        if let Some(phase) = section.phase {
            lines.push(format!("## {}", phase));
        }
        export_entries(section, config, &mut lines);
        lines.push(String::new());
    }

    let mut output = lines.join("\n");
    output.truncate(output.trim_end().len());
    output.push('\n');
    output
}

fn export_entries(section: &PlanSection<'_>, config: &ExportConfig, lines: &mut Vec<String>) {
    if !has_duplicate_ids(section) {
        for entry in &section.entries {
            push_item(entry.item, entry.depth, config, lines);
        }
        return;
    }

    for &item in &section.source_order {
        let depth = section
            .entries
            .iter()
            .find(|entry| std::ptr::eq(entry.item, item))
            .map_or(0, |entry| entry.depth);
        push_item(item, depth, config, lines);
    }
}

fn has_duplicate_ids(section: &PlanSection<'_>) -> bool {
    let mut seen = HashSet::new();
    section
        .source_order
        .iter()
        .filter_map(|item| item.id())
        .any(|id| !seen.insert(id))
}

fn push_item(item: &RoadmapItem, depth: usize, config: &ExportConfig, lines: &mut Vec<String>) {
    let indent = " ".repeat(depth * config.indent);
    lines.push(format!("{}{}", indent, export_item(item, config)));
}

/// Export a single item line, without indentation.
fn export_item(item: &RoadmapItem, config: &ExportConfig) -> String {
    if config.show_ids {
        return format_item(item);
    }
    // Ids are what depends_on points at; dropping only the id would leave
    // dangling references behind, so the whole block goes.
    format!("- [{}] {}", item.status.marker(), item.item_text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::build_render_plan;
    use crate::source::parse_roadmap_data;

    const ROADMAP: &str = "\
- [ ] Loose end

## Phase 1
- [x] Design {id: design}
- [>] Implement {id: impl, depends: design}
- [ ] Orphan {depends: missing}

## Phase 2
- [ ] Ship {depends: impl}
";

    #[test]
    fn test_export_markdown() {
        let data = parse_roadmap_data(ROADMAP);
        let output = export(&build_render_plan(&data), &ExportConfig::default());

        assert!(output.starts_with("# Roadmap\n\n- [ ] Loose end\n\n## Phase 1\n"));
        assert!(output.contains("\n  - [>] Implement {id: impl, depends: design}\n"));
        assert!(output.contains("\n- [ ] Orphan {depends: missing}\n"));
        assert!(output.ends_with("## Phase 2\n- [ ] Ship {depends: impl}\n"));
    }

    #[test]
    fn test_export_reparses_to_same_plan() {
        let data = parse_roadmap_data(ROADMAP);
        let output = export(&build_render_plan(&data), &ExportConfig::default());
        let reparsed = parse_roadmap_data(&output);

        let before: Vec<(String, usize)> = build_render_plan(&data)
            .entries()
            .map(|e| (e.item.item_text.clone(), e.depth))
            .collect();
        let after: Vec<(String, usize)> = build_render_plan(&reparsed)
            .entries()
            .map(|e| (e.item.item_text.clone(), e.depth))
            .collect();
        assert_eq!(before, after);
        assert_eq!(data.progress_percent, reparsed.progress_percent);
    }

    fn shape(data: &crate::types::RoadmapData) -> Vec<(String, usize)> {
        build_render_plan(data)
            .entries()
            .map(|e| (e.item.item_text.clone(), e.depth))
            .collect()
    }

    #[test]
    fn test_duplicate_ids_keep_file_order() {
        let roadmap = "\
## P
- [ ] A {id: x, depends: y}
- [ ] B {id: x}
- [ ] Y {id: y}
- [ ] C {depends: x}
";
        let data = parse_roadmap_data(roadmap);
        let output = export(&build_render_plan(&data), &ExportConfig::default());

        assert!(output.contains(
            "## P\n  - [ ] A {id: x, depends: y}\n- [ ] B {id: x}\n- [ ] Y {id: y}\n  - [ ] C {depends: x}\n"
        ));

        let reparsed = parse_roadmap_data(&output);
        assert_eq!(
            shape(&reparsed),
            vec![
                ("B".to_string(), 0),
                ("C".to_string(), 1),
                ("Y".to_string(), 0),
                ("A".to_string(), 1),
            ]
        );
        assert_eq!(shape(&data), shape(&reparsed));
    }

    #[test]
    fn test_export_without_ids() {
        let data = parse_roadmap_data(ROADMAP);
        let config = ExportConfig {
            show_ids: false,
            indent: 4,
            ..Default::default()
        };
        let output = export(&build_render_plan(&data), &config);
        assert!(!output.contains('{'));
        assert!(output.contains("\n    - [>] Implement\n"));
    }
}
