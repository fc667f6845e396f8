//! Markdown roadmap format.
//!
//! ```markdown
//! ## Phase 1: Data Prep
//! - [x] Download dataset {id: data}
//! - [>] Train model {id: train, depends: data}
//! - [ ] Evaluate {depends: train, data}
//! ```
//!
//! Only a trailing `{...}` block starting with `id:` or `depends:` carries
//! attributes; any other braces stay part of the item text.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::{ItemStatus, RoadmapItem};

// Checkbox marker plus the full remaining text
static ITEM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-\s+\[([ x>~!])\]\s+(.+?)\s*$").unwrap());

// Trailing attribute block, keyword-led only
static ATTR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*\{((?:id|depends)\s*:[^}]*)\}\s*$").unwrap());

static PHASE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^##\s+(.+)$").unwrap());

const ID_KEY: &str = "id:";
const DEPENDS_KEY: &str = "depends:";

/// Split an attribute block body such as `id: train, depends: a, b`.
///
/// `depends:` collects a comma-separated list up to the next `id:` keyword.
/// Empty values are dropped and unknown tokens skipped.
pub fn parse_attributes(attrs: &str) -> (Option<String>, Vec<String>) {
    let mut id = None;
    let mut depends = Vec::new();
    let mut remaining = attrs.trim();

    while !remaining.is_empty() {
        remaining = remaining.trim_start_matches(|c: char| c == ',' || c.is_whitespace());
        if remaining.is_empty() {
            break;
        }

        if let Some(rest) = remaining.strip_prefix(ID_KEY) {
            let end = rest.find(DEPENDS_KEY).unwrap_or(rest.len());
            let value = rest[..end].trim().trim_end_matches(',').trim();
            if !value.is_empty() {
                id = Some(value.to_string());
            }
            remaining = &rest[end..];
        } else if let Some(rest) = remaining.strip_prefix(DEPENDS_KEY) {
            let end = rest.find(ID_KEY).unwrap_or(rest.len());
            depends.extend(
                rest[..end]
                    .split(',')
                    .map(str::trim)
                    .filter(|v| !v.is_empty())
                    .map(str::to_string),
            );
            remaining = &rest[end..];
        } else if let Some(pos) = remaining.find(',') {
            remaining = &remaining[pos + 1..];
        } else {
            break;
        }
    }

    (id, depends)
}

/// Split item text into display text and attribute block.
fn split_attributes(full_text: &str) -> (String, Option<String>, Vec<String>) {
    match ATTR_RE.captures(full_text) {
        Some(caps) => {
            let start = caps.get(0).map_or(full_text.len(), |m| m.start());
            let (id, depends) = parse_attributes(&caps[1]);
            (full_text[..start].trim().to_string(), id, depends)
        }
        None => (full_text.trim().to_string(), None, Vec::new()),
    }
}

/// Parse every checklist item of a markdown roadmap.
pub fn parse_roadmap(content: &str) -> Vec<RoadmapItem> {
    let mut items = Vec::new();
    let mut current_phase: Option<String> = None;

    for (idx, line) in content.lines().enumerate() {
        let trimmed = line.trim();

        if let Some(caps) = PHASE_RE.captures(trimmed) {
            current_phase = Some(caps[1].trim().to_string());
            continue;
        }

        let Some(caps) = ITEM_RE.captures(trimmed) else {
            continue;
        };
        let Some(status) = caps[1].chars().next().and_then(ItemStatus::from_marker) else {
            continue;
        };

        let (item_text, item_id, depends_on) = split_attributes(&caps[2]);
        items.push(RoadmapItem {
            phase: current_phase.clone(),
            item_text,
            status,
            item_id,
            depends_on,
            line_number: Some(idx + 1),
        });
    }

    items
}

/// Format an attribute block for `item`, empty when it has none.
pub fn format_attributes(item: &RoadmapItem) -> String {
    let mut parts = Vec::new();
    if let Some(id) = item.id() {
        parts.push(format!("id: {}", id));
    }
    if !item.depends_on.is_empty() {
        parts.push(format!("depends: {}", item.depends_on.join(", ")));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!("{{{}}}", parts.join(", "))
    }
}

/// Render one item as a markdown checklist line (without indentation).
pub fn format_item(item: &RoadmapItem) -> String {
    let attrs = format_attributes(item);
    if attrs.is_empty() {
        format!("- [{}] {}", item.status.marker(), item.item_text)
    } else {
        format!("- [{}] {} {}", item.status.marker(), item.item_text, attrs)
    }
}

/// Mark the first item whose text equals `item_text` as done.
///
/// The attribute block of the line is kept. The next pending item after it
/// is promoted to active. Every other byte, line endings included, is left
/// as it was. Returns `None` when no item matches.
pub fn mark_complete(content: &str, item_text: &str) -> Option<String> {
    let mut lines: Vec<String> = content.split_inclusive('\n').map(str::to_string).collect();

    let target = lines.iter().position(|line| {
        ITEM_RE
            .captures(line.trim())
            .is_some_and(|caps| split_attributes(&caps[2]).0 == item_text)
    })?;

    lines[target] = set_marker(&lines[target], ItemStatus::Done);

    for line in lines.iter_mut().skip(target + 1) {
        let is_pending = ITEM_RE
            .captures(line.trim())
            .is_some_and(|caps| &caps[1] == " ");
        if is_pending {
            *line = set_marker(line, ItemStatus::Active);
            break;
        }
    }

    Some(lines.concat())
}

/// Replace the checkbox marker of an item line, keeping its indentation and
/// line ending.
fn set_marker(line: &str, status: ItemStatus) -> String {
    let body = line.trim_end_matches(['\r', '\n']);
    let ending = &line[body.len()..];
    let indent_len = body.len() - body.trim_start().len();
    let (indent, rest) = body.split_at(indent_len);
    let replaced = ITEM_RE.replace(rest.trim_end(), |caps: &regex::Captures<'_>| {
        format!("- [{}] {}", status.marker(), &caps[2])
    });
    format!("{}{}{}", indent, replaced, ending)
}
