//! Phase grouping and the rendering plan.
//!
//! Items are partitioned by phase label before any tree is built, and each
//! phase gets its own forest. A dependency whose target lives in another
//! phase is therefore unresolved inside the bucket and its item renders as a
//! root there.

use serde::Serialize;
use std::collections::HashMap;

use crate::graph::{build_tree, has_dependency_info, FlatEntry};
use crate::types::{clamp_percent, RoadmapData, RoadmapItem};

/// Items sharing a phase label, in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseGroup<'a> {
    /// `None` for the no-phase bucket.
    pub phase: Option<&'a str>,
    pub items: Vec<&'a RoadmapItem>,
}

/// Partition `items` by phase.
///
/// Phased groups come first, ordered by the first occurrence of their
/// label. Items with an absent or empty phase form a trailing group, which
/// is omitted when empty.
pub fn group_by_phase(items: &[RoadmapItem]) -> Vec<PhaseGroup<'_>> {
    let mut groups: Vec<PhaseGroup<'_>> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut no_phase = Vec::new();

    for item in items {
        match item.phase_label() {
            Some(phase) => {
                let pos = *positions.entry(phase).or_insert_with(|| {
                    groups.push(PhaseGroup {
                        phase: Some(phase),
                        items: Vec::new(),
                    });
                    groups.len() - 1
                });
                groups[pos].items.push(item);
            }
            None => no_phase.push(item),
        }
    }

    if !no_phase.is_empty() {
        groups.push(PhaseGroup {
            phase: None,
            items: no_phase,
        });
    }

    groups
}

/// One rendered section: a phase heading and its ordered entries.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanSection<'a> {
    pub phase: Option<&'a str>,
    pub entries: Vec<FlatEntry<'a>>,
    /// The section's items in input order.
    #[serde(skip)]
    pub source_order: Vec<&'a RoadmapItem>,
}

/// Everything a renderer needs to draw a roadmap.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderPlan<'a> {
    /// Source-supplied progress, clamped to `[0, 100]`.
    pub progress_percent: f64,
    /// Whether entries are tree-ordered (true) or in plain input order.
    pub dependency_mode: bool,
    pub sections: Vec<PlanSection<'a>>,
    /// Passed through verbatim from the source.
    pub warnings: &'a [String],
}

impl<'a> RenderPlan<'a> {
    /// All entries across sections, in rendering order.
    pub fn entries(&self) -> impl Iterator<Item = &FlatEntry<'a>> + '_ {
        self.sections.iter().flat_map(|s| s.entries.iter())
    }

    /// Total number of entries.
    pub fn len(&self) -> usize {
        self.sections.iter().map(|s| s.entries.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.iter().all(|s| s.entries.is_empty())
    }
}

/// Build the rendering plan for `data`.
///
/// In dependency mode each phase group is turned into a forest and
/// flattened on its own. Otherwise entries keep input order at depth 0.
pub fn build_render_plan(data: &RoadmapData) -> RenderPlan<'_> {
    build_render_plan_with_mode(data, has_dependency_info(&data.items))
}

/// Same as [`build_render_plan`] with the display mode forced.
pub fn build_render_plan_with_mode(data: &RoadmapData, dependency_mode: bool) -> RenderPlan<'_> {
    let sections = group_by_phase(&data.items)
        .into_iter()
        .map(|group| {
            let entries = if dependency_mode {
                build_tree(group.items.iter().copied()).flatten()
            } else {
                group
                    .items
                    .iter()
                    .map(|&item| FlatEntry { item, depth: 0 })
                    .collect()
            };
            PlanSection {
                phase: group.phase,
                entries,
                source_order: group.items,
            }
        })
        .collect();

    RenderPlan {
        progress_percent: clamp_percent(data.progress_percent),
        dependency_mode,
        sections,
        warnings: &data.warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ItemStatus;

    fn phased(text: &str, phase: Option<&str>) -> RoadmapItem {
        let item = RoadmapItem::new(text, ItemStatus::Pending);
        match phase {
            Some(p) => item.with_phase(p),
            None => item,
        }
    }

    fn data(items: Vec<RoadmapItem>) -> RoadmapData {
        RoadmapData {
            items,
            progress_percent: 50.0,
            warnings: Vec::new(),
        }
    }

    #[test]
    fn test_group_first_seen_order_and_no_phase_last() {
        let items = vec![
            phased("a", None),
            phased("b", Some("Beta")),
            phased("c", Some("Alpha")),
            phased("d", Some("")),
            phased("e", Some("Beta")),
        ];
        let groups = group_by_phase(&items);

        let phases: Vec<Option<&str>> = groups.iter().map(|g| g.phase).collect();
        assert_eq!(phases, vec![Some("Beta"), Some("Alpha"), None]);

        let beta: Vec<&str> = groups[0].items.iter().map(|i| i.item_text.as_str()).collect();
        assert_eq!(beta, vec!["b", "e"]);

        let rest: Vec<&str> = groups[2].items.iter().map(|i| i.item_text.as_str()).collect();
        assert_eq!(rest, vec!["a", "d"]);
    }

    #[test]
    fn test_no_phase_group_omitted_when_empty() {
        let items = vec![phased("a", Some("P"))];
        let groups = group_by_phase(&items);
        assert_eq!(groups.len(), 1);
        assert!(group_by_phase(&[]).is_empty());
    }

    #[test]
    fn test_flat_mode_keeps_input_order() {
        let input = data(vec![
            phased("one", Some("P")),
            phased("two", Some("P")),
        ]);
        let plan = build_render_plan(&input);

        assert!(!plan.dependency_mode);
        let entries: Vec<(&str, usize)> = plan
            .entries()
            .map(|e| (e.item.item_text.as_str(), e.depth))
            .collect();
        assert_eq!(entries, vec![("one", 0), ("two", 0)]);
    }

    #[test]
    fn test_cross_phase_dependency_becomes_root() {
        let input = data(vec![
            phased("Design", Some("P1")).with_id("design"),
            phased("Build", Some("P2"))
                .with_id("build")
                .with_depends_on(["design"]),
            phased("Test", Some("P2"))
                .with_id("test")
                .with_depends_on(["build"]),
        ]);
        let plan = build_render_plan(&input);

        assert!(plan.dependency_mode);
        assert_eq!(plan.sections.len(), 2);
        let p2: Vec<(&str, usize)> = plan.sections[1]
            .entries
            .iter()
            .map(|e| (e.item.item_text.as_str(), e.depth))
            .collect();
        assert_eq!(p2, vec![("Build", 0), ("Test", 1)]);
    }

    #[test]
    fn test_forced_flat_mode_ignores_dependencies() {
        let roadmap = data(vec![
            phased("A", None).with_id("a"),
            phased("B", None).with_depends_on(["a"]),
        ]);
        let plan = build_render_plan_with_mode(&roadmap, false);
        assert!(plan.entries().all(|e| e.depth == 0));
    }

    #[test]
    fn test_warnings_and_progress_pass_through() {
        let roadmap = RoadmapData {
            items: vec![phased("A", None)],
            progress_percent: 250.0,
            warnings: vec!["Item 'x' depends on 'y' which does not exist".to_string()],
        };
        let plan = build_render_plan(&roadmap);

        assert_eq!(plan.progress_percent, 100.0);
        assert_eq!(plan.warnings, roadmap.warnings.as_slice());
        assert_eq!(plan.len(), 1);
        assert!(!plan.is_empty());
    }

    #[test]
    fn test_plan_serializes() {
        let roadmap = data(vec![phased("A", Some("P")).with_id("a")]);
        let plan = build_render_plan(&roadmap);
        let json = serde_json::to_value(&plan).unwrap();

        assert_eq!(json["dependency_mode"], true);
        assert_eq!(json["sections"][0]["phase"], "P");
        assert_eq!(json["sections"][0]["entries"][0]["depth"], 0);
        assert_eq!(json["sections"][0]["entries"][0]["item"]["item_id"], "a");
    }
}
