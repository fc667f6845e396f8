//! Roadmap source: where `RoadmapData` comes from.
//!
//! Two formats are understood:
//! - markdown roadmap files (see [`markdown`]), for which progress and
//!   warnings are computed here;
//! - JSON snapshots of [`RoadmapData`] as returned by a backend, taken as-is.

pub mod markdown;
pub mod validate;

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{Result, RoadmapError};
use crate::types::{ItemStatus, RoadmapData, RoadmapItem};

pub use markdown::{format_item, mark_complete, parse_attributes, parse_roadmap};
pub use validate::validate_dependencies;

/// Share of done items, rounded to a whole percent. 0 for an empty roadmap.
pub fn progress_percent(items: &[RoadmapItem]) -> f64 {
    if items.is_empty() {
        return 0.0;
    }
    let done = items
        .iter()
        .filter(|i| i.status == ItemStatus::Done)
        .count();
    (done as f64 / items.len() as f64 * 100.0).round()
}

/// First item currently marked active.
pub fn active_item(items: &[RoadmapItem]) -> Option<&RoadmapItem> {
    items.iter().find(|i| i.status == ItemStatus::Active)
}

/// Parse markdown into items, progress and dependency warnings.
pub fn parse_roadmap_data(content: &str) -> RoadmapData {
    let items = parse_roadmap(content);
    let progress_percent = progress_percent(&items);
    let warnings = validate_dependencies(&items);
    RoadmapData {
        items,
        progress_percent,
        warnings,
    }
}

/// Whether `path` names a JSON snapshot rather than a markdown roadmap.
pub fn is_json_snapshot(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

/// Load roadmap data from a file.
///
/// `.json` files are decoded as a `RoadmapData` snapshot and passed through
/// unchanged; anything else is parsed as markdown.
pub fn load_roadmap(path: &Path) -> Result<RoadmapData> {
    let content = fs::read_to_string(path).map_err(|e| RoadmapError::io(path, e))?;

    let data = if is_json_snapshot(path) {
        serde_json::from_str(&content).map_err(|source| RoadmapError::Json {
            path: path.to_path_buf(),
            source,
        })?
    } else {
        parse_roadmap_data(&content)
    };

    debug!(
        path = %path.display(),
        items = data.items.len(),
        warnings = data.warnings.len(),
        "loaded roadmap"
    );
    Ok(data)
}

/// Mark an item done in a markdown roadmap file, returning the new content.
///
/// With `write == false` the file is left untouched.
pub fn complete_item(path: &Path, item_text: &str, write: bool) -> Result<String> {
    let content = fs::read_to_string(path).map_err(|e| RoadmapError::io(path, e))?;
    let updated = mark_complete(&content, item_text).ok_or_else(|| RoadmapError::ItemNotFound {
        text: item_text.to_string(),
    })?;

    if write {
        fs::write(path, &updated).map_err(|e| RoadmapError::io(path, e))?;
        debug!(path = %path.display(), item = item_text, "marked item complete");
    }
    Ok(updated)
}
