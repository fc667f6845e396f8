//! rmap core - roadmap dependency-graph builder.
//!
//! Turns the flat item list of a roadmap into the structure a renderer
//! draws: items grouped by phase, each phase arranged as a forest where an
//! item hangs under its last dependency, flattened into a depth-annotated
//! rendering order.
//!
//! # Features
//!
//! - **Forest construction**: arena-backed, tolerant of dangling references,
//!   duplicate ids and dependency loops
//! - **Phase grouping**: one forest per phase, no-phase items last
//! - **Markdown source**: checklist parsing, attribute blocks, dependency validation
//! - **Multiple export formats**: outline, markdown, JSON
//!
//! # Usage
//!
//! ```
//! use rmap_core::{build_render_plan, source::parse_roadmap_data};
//!
//! let data = parse_roadmap_data("## P1\n- [x] Design {id: d}\n- [ ] Build {depends: d}\n");
//! let plan = build_render_plan(&data);
//!
//! let depths: Vec<usize> = plan.entries().map(|e| e.depth).collect();
//! assert_eq!(depths, vec![0, 1]);
//! ```

pub mod error;
pub mod exporter;
pub mod graph;
pub mod plan;
pub mod source;
pub mod types;

pub use error::{Result, RoadmapError};
pub use graph::{build_tree, flatten_tree, has_dependency_info, FlatEntry, Forest, TreeNode};
pub use plan::{
    build_render_plan, build_render_plan_with_mode, group_by_phase, PhaseGroup, PlanSection,
    RenderPlan,
};
pub use types::{ExportConfig, ItemStatus, RoadmapData, RoadmapItem};

/// Version of rmap-core.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
