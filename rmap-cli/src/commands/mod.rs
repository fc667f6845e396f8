//! Command implementations for the rmap CLI
//!
//! Each command module provides a `run` function that executes the command logic.

pub mod check;
pub mod complete;
pub mod completions;
pub mod export;
pub mod show;
pub mod status;
pub mod watch;

use crate::config::RmapConfig;
use crate::output::{OutputConfig, OutputFormat};

/// Output settings for a command: TTY detection with the configured color
/// and compact preferences applied on top.
pub(crate) fn output_config(format: OutputFormat, config: &RmapConfig) -> OutputConfig {
    let output = OutputConfig::auto_detect_with_color_override(format, config.use_color());
    if config.compact() {
        output.compact()
    } else {
        output
    }
}
