//! rmap configuration loading from `.rmaprc.toml`.
//!
//! Configuration is optional. Every setting has a default, and command-line
//! flags override whatever the file says.
//!
//! # Example Configuration
//!
//! ```toml
//! [roadmap]
//! path = "docs/ROADMAP.md"
//!
//! [display]
//! show_ids = true
//! no_phase_label = "General"
//! indent = 2
//!
//! [output]
//! format = "table"
//! color = true
//! compact = false
//!
//! [watch]
//! debounce_ms = 200
//! ```

use rmap_core::ExportConfig;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Name of the config file looked up in the working directory.
pub const CONFIG_FILE: &str = ".rmaprc.toml";

/// Root configuration structure loaded from `.rmaprc.toml`.
///
/// All sections are optional and will use defaults if not specified.
#[derive(Debug, Deserialize, Default)]
pub struct RmapConfig {
    /// Where the roadmap lives.
    #[serde(default)]
    pub roadmap: RoadmapSection,

    /// How items are drawn.
    #[serde(default)]
    pub display: DisplaySettings,

    /// Output formatting preferences.
    #[serde(default)]
    pub output: OutputSettings,

    /// File watching for `rmap watch`.
    #[serde(default)]
    pub watch: WatchSettings,
}

#[derive(Debug, Deserialize, Default)]
pub struct RoadmapSection {
    /// Roadmap file, relative to the working directory.
    ///
    /// When unset, `ROADMAP.md`, `roadmap.md` and `docs/ROADMAP.md` are tried
    /// in that order.
    #[serde(default)]
    pub path: Option<String>,
}

/// Display preferences for rendered roadmaps.
#[derive(Debug, Deserialize)]
pub struct DisplaySettings {
    /// Show item ids next to item text. `--no-ids` turns this off.
    #[serde(default = "default_show_ids")]
    pub show_ids: bool,

    /// Heading for items that belong to no phase.
    #[serde(default = "default_no_phase_label")]
    pub no_phase_label: String,

    /// Spaces per tree level.
    #[serde(default = "default_indent")]
    pub indent: usize,
}

fn default_show_ids() -> bool {
    true
}

fn default_no_phase_label() -> String {
    "General".to_string()
}

fn default_indent() -> usize {
    2
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            show_ids: default_show_ids(),
            no_phase_label: default_no_phase_label(),
            indent: default_indent(),
        }
    }
}

/// Output formatting preferences.
///
/// Distinct from the runtime `OutputConfig` in the output module, which
/// handles actual rendering.
#[derive(Debug, Deserialize, Default)]
pub struct OutputSettings {
    /// Default output format: `table`, `json`, `csv`, `tree` or `markdown`.
    #[serde(default)]
    pub format: Option<String>,

    /// Whether to use colored output. Auto-detected from the TTY when unset.
    #[serde(default)]
    pub color: Option<bool>,

    /// Single-line JSON and borderless tables. `--compact` turns this on.
    #[serde(default)]
    pub compact: bool,
}

#[derive(Debug, Deserialize)]
pub struct WatchSettings {
    /// Quiet period after the last change before re-rendering.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

fn default_debounce_ms() -> u64 {
    200
}

impl Default for WatchSettings {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
        }
    }
}

impl RmapConfig {
    /// Load configuration from `.rmaprc.toml` in the given directory.
    ///
    /// A missing file yields defaults. Read and parse errors are logged as
    /// warnings and also yield defaults.
    pub fn load(root: &Path) -> Self {
        let config_path = root.join(CONFIG_FILE);
        if config_path.exists() {
            match std::fs::read_to_string(&config_path) {
                Ok(content) => match toml::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!("Failed to parse {}: {}", CONFIG_FILE, e);
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read {}: {}", CONFIG_FILE, e);
                }
            }
        }
        Self::default()
    }

    /// Configured roadmap path, if any.
    pub fn roadmap_path(&self) -> Option<&str> {
        self.roadmap.path.as_deref().filter(|p| !p.is_empty())
    }

    /// Get the default output format, if configured.
    pub fn default_format(&self) -> Option<&str> {
        self.output.format.as_deref()
    }

    /// Configured color preference, `None` to auto-detect.
    pub fn use_color(&self) -> Option<bool> {
        self.output.color
    }

    pub fn compact(&self) -> bool {
        self.output.compact
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.watch.debounce_ms)
    }

    /// Exporter options from the display settings.
    ///
    /// `hide_ids` is the `--no-ids` flag, which wins over the file.
    pub fn export_config(&self, hide_ids: bool) -> ExportConfig {
        ExportConfig {
            show_ids: self.display.show_ids && !hide_ids,
            indent: self.display.indent,
            pretty_print: true,
            no_phase_label: self.display.no_phase_label.clone(),
        }
    }
}
