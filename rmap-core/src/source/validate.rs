//! Dependency integrity checks run by the roadmap source.
//!
//! The builder never derives warnings. These checks produce the free-text
//! warnings a source attaches to `RoadmapData` before handing it over.

use petgraph::algo::kosaraju_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::{HashMap, HashSet};

use crate::types::RoadmapItem;

/// Check every dependency reference and return one warning per problem.
///
/// Reports, in order:
/// - references to ids no item carries
/// - ids defined more than once
/// - items depending on themselves
/// - dependency cycles (strongly connected components over all edges)
/// - structural parents that live in a different phase
pub fn validate_dependencies(items: &[RoadmapItem]) -> Vec<String> {
    let mut warnings = dangling_references(items);
    warnings.extend(duplicate_ids(items));
    warnings.extend(dependency_cycles(items));
    warnings.extend(cross_phase_parents(items));
    warnings
}

fn dangling_references(items: &[RoadmapItem]) -> Vec<String> {
    let known_ids: HashSet<&str> = items.iter().filter_map(RoadmapItem::id).collect();

    let mut warnings = Vec::new();
    for item in items {
        for dep in &item.depends_on {
            if !known_ids.contains(dep.as_str()) {
                warnings.push(format!(
                    "Item '{}' depends on '{}' which does not exist",
                    item.label(),
                    dep
                ));
            }
        }
    }
    warnings
}

fn duplicate_ids(items: &[RoadmapItem]) -> Vec<String> {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for id in items.iter().filter_map(RoadmapItem::id) {
        match positions.get(id) {
            Some(&pos) => counts[pos].1 += 1,
            None => {
                positions.insert(id, counts.len());
                counts.push((id, 1));
            }
        }
    }

    counts
        .into_iter()
        .filter(|&(_, count)| count > 1)
        .map(|(id, count)| {
            format!(
                "Item id '{}' is defined {} times; references resolve to the last one",
                id, count
            )
        })
        .collect()
}

fn dependency_cycles(items: &[RoadmapItem]) -> Vec<String> {
    let mut graph: DiGraph<&str, ()> = DiGraph::new();
    let mut node_map: HashMap<&str, NodeIndex> = HashMap::new();

    for id in items.iter().filter_map(RoadmapItem::id) {
        node_map.entry(id).or_insert_with(|| graph.add_node(id));
    }

    let mut warnings = Vec::new();
    let mut self_loops: HashSet<&str> = HashSet::new();

    for item in items {
        let Some(id) = item.id() else {
            continue;
        };
        let src = node_map[id];
        for dep in &item.depends_on {
            if dep == id {
                if self_loops.insert(id) {
                    warnings.push(format!("Item '{}' depends on itself", id));
                }
                continue;
            }
            if let Some(&dst) = node_map.get(dep.as_str()) {
                graph.update_edge(src, dst, ());
            }
        }
    }

    let mut cycles: Vec<Vec<NodeIndex>> = kosaraju_scc(&graph)
        .into_iter()
        .filter(|scc| scc.len() > 1)
        .map(|mut scc| {
            scc.sort_unstable();
            scc
        })
        .collect();
    cycles.sort_unstable_by_key(|scc| scc[0]);

    for scc in cycles {
        let members: Vec<&str> = scc.iter().map(|&idx| graph[idx]).collect();
        warnings.push(format!("Dependency cycle between: {}", members.join(", ")));
    }

    warnings
}

fn cross_phase_parents(items: &[RoadmapItem]) -> Vec<String> {
    // Last definition wins, matching how the builder resolves parents.
    let mut phase_of: HashMap<&str, Option<&str>> = HashMap::new();
    for item in items {
        if let Some(id) = item.id() {
            phase_of.insert(id, item.phase_label());
        }
    }

    items
        .iter()
        .filter_map(|item| {
            let parent = item.parent_ref()?;
            let parent_phase = phase_of.get(parent)?;
            (*parent_phase != item.phase_label()).then(|| {
                format!(
                    "Item '{}' depends on '{}' from another phase; it is shown as a root of its own phase",
                    item.label(),
                    parent
                )
            })
        })
        .collect()
}
