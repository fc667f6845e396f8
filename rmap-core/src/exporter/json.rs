//! JSON format exporter.

use crate::plan::RenderPlan;
use crate::types::ExportConfig;

/// Export the rendering plan to JSON.
pub fn export(plan: &RenderPlan<'_>, config: &ExportConfig) -> Result<String, serde_json::Error> {
    if config.pretty_print {
        serde_json::to_string_pretty(plan)
    } else {
        serde_json::to_string(plan)
    }
}
