//! Shared utilities for finding and loading the roadmap file.
//!
//! Lookup order: explicit path argument, `[roadmap] path` from
//! `.rmaprc.toml`, then the conventional file names in the working directory.

use anyhow::{Context, Result};
use rmap_core::source::load_roadmap;
use rmap_core::RoadmapData;
use std::path::{Path, PathBuf};

use crate::config::RmapConfig;

/// Conventional roadmap locations, tried in order.
pub const DEFAULT_ROADMAP_FILES: &[&str] = &["ROADMAP.md", "roadmap.md", "docs/ROADMAP.md"];

/// Resolve the roadmap path relative to the working directory.
pub fn resolve_roadmap_path(explicit: Option<&str>, config: &RmapConfig) -> Result<PathBuf> {
    resolve_roadmap_path_in(Path::new("."), explicit, config)
}

/// Resolve the roadmap path relative to `root`.
///
/// An explicit or configured path is returned without checking that it
/// exists; loading reports that with the path in the error.
pub fn resolve_roadmap_path_in(
    root: &Path,
    explicit: Option<&str>,
    config: &RmapConfig,
) -> Result<PathBuf> {
    if let Some(path) = explicit.or_else(|| config.roadmap_path()) {
        return Ok(root.join(path));
    }

    find_default_roadmap(root).ok_or_else(|| {
        anyhow::anyhow!(
            "No roadmap found. Looked for {} in {}.\n\
             Pass a path or set [roadmap] path in .rmaprc.toml.",
            DEFAULT_ROADMAP_FILES.join(", "),
            root.display()
        )
    })
}

/// First conventional roadmap file present in `root`.
pub fn find_default_roadmap(root: &Path) -> Option<PathBuf> {
    DEFAULT_ROADMAP_FILES
        .iter()
        .map(|name| root.join(name))
        .find(|path| path.is_file())
}

/// Load roadmap data, attaching the path to any error.
pub fn load(path: &Path) -> Result<RoadmapData> {
    load_roadmap(path).with_context(|| format!("Failed to load roadmap {}", path.display()))
}
