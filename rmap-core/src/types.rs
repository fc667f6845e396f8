//! Data models for roadmap items.
//!
//! These types describe one render pass worth of roadmap data as supplied
//! by a roadmap source: the flat item list, the externally computed
//! progress aggregate, and any warnings the source wants surfaced.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::RoadmapError;

/// Lifecycle status of a roadmap item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    /// `[x]`
    Done,
    /// `[>]`
    Active,
    /// `[ ]`
    Pending,
    /// `[~]`
    Suspended,
    /// `[!]`
    Blocked,
}

impl ItemStatus {
    /// All statuses in display order.
    pub const ALL: [ItemStatus; 5] = [
        ItemStatus::Done,
        ItemStatus::Active,
        ItemStatus::Pending,
        ItemStatus::Suspended,
        ItemStatus::Blocked,
    ];

    /// Map a markdown checkbox marker to a status.
    pub fn from_marker(marker: char) -> Option<Self> {
        match marker {
            'x' => Some(ItemStatus::Done),
            '>' => Some(ItemStatus::Active),
            ' ' => Some(ItemStatus::Pending),
            '~' => Some(ItemStatus::Suspended),
            '!' => Some(ItemStatus::Blocked),
            _ => None,
        }
    }

    /// The markdown checkbox marker for this status.
    pub fn marker(self) -> char {
        match self {
            ItemStatus::Done => 'x',
            ItemStatus::Active => '>',
            ItemStatus::Pending => ' ',
            ItemStatus::Suspended => '~',
            ItemStatus::Blocked => '!',
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ItemStatus::Done => "done",
            ItemStatus::Active => "active",
            ItemStatus::Pending => "pending",
            ItemStatus::Suspended => "suspended",
            ItemStatus::Blocked => "blocked",
        }
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemStatus {
    type Err = RoadmapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "done" => Ok(ItemStatus::Done),
            "active" => Ok(ItemStatus::Active),
            "pending" => Ok(ItemStatus::Pending),
            "suspended" => Ok(ItemStatus::Suspended),
            "blocked" => Ok(ItemStatus::Blocked),
            _ => Err(RoadmapError::UnknownStatus {
                value: s.to_string(),
            }),
        }
    }
}

/// One checklist entry of a roadmap.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoadmapItem {
    /// Group label; `None` and `Some("")` both mean "no phase".
    #[serde(default)]
    pub phase: Option<String>,
    pub item_text: String,
    pub status: ItemStatus,
    /// Identifier other items may reference in `depends_on`.
    #[serde(default)]
    pub item_id: Option<String>,
    /// Referenced identifiers. May dangle, may be cyclic.
    #[serde(default)]
    pub depends_on: Vec<String>,
    /// 1-based line in the markdown file the item was read from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_number: Option<usize>,
}

impl RoadmapItem {
    pub fn new(item_text: impl Into<String>, status: ItemStatus) -> Self {
        Self {
            phase: None,
            item_text: item_text.into(),
            status,
            item_id: None,
            depends_on: Vec::new(),
            line_number: None,
        }
    }

    /// Builder: set the phase label
    pub fn with_phase(mut self, phase: impl Into<String>) -> Self {
        self.phase = Some(phase.into());
        self
    }

    /// Builder: set the identifier
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.item_id = Some(id.into());
        self
    }

    /// Builder: set the dependency list
    pub fn with_depends_on<I, S>(mut self, deps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.depends_on = deps.into_iter().map(Into::into).collect();
        self
    }

    /// The identifier, if present and non-empty.
    pub fn id(&self) -> Option<&str> {
        self.item_id.as_deref().filter(|id| !id.is_empty())
    }

    /// The phase label, if present and non-empty.
    pub fn phase_label(&self) -> Option<&str> {
        self.phase.as_deref().filter(|p| !p.is_empty())
    }

    /// The entry used as the structural parent reference: the last one.
    pub fn parent_ref(&self) -> Option<&str> {
        self.depends_on.last().map(String::as_str)
    }

    /// Label used in messages: the id when there is one, otherwise the text.
    pub fn label(&self) -> &str {
        self.id().unwrap_or(&self.item_text)
    }
}

/// Roadmap aggregate handed to the builder.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RoadmapData {
    pub items: Vec<RoadmapItem>,
    /// Owned by the source. Not recomputed by the builder, clamped only for display.
    #[serde(default)]
    pub progress_percent: f64,
    #[serde(default)]
    pub warnings: Vec<String>,
}

impl RoadmapData {
    /// Progress clamped to `[0, 100]`; NaN reads as 0.
    pub fn display_progress(&self) -> f64 {
        clamp_percent(self.progress_percent)
    }
}

/// Options shared by the exporters.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Append `[id]` (outline) or keep attribute blocks (markdown).
    pub show_ids: bool,
    /// Spaces per depth level.
    pub indent: usize,
    pub pretty_print: bool,
    /// Heading used for items without a phase.
    pub no_phase_label: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            show_ids: true,
            indent: 2,
            pretty_print: false,
            no_phase_label: "General".to_string(),
        }
    }
}

impl ExportConfig {
    pub fn new(show_ids: bool, indent: usize, pretty_print: bool) -> Self {
        Self {
            show_ids,
            indent,
            pretty_print,
            ..Default::default()
        }
    }
}

/// Clamp a percentage for display.
pub fn clamp_percent(percent: f64) -> f64 {
    if percent.is_nan() {
        0.0
    } else {
        percent.clamp(0.0, 100.0)
    }
}
