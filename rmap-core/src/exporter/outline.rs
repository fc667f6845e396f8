//! Plain-text outline exporter.
//!
//! ```text
//! Progress: 50%
//!
//! Phase 1
//!   [x] Design [design]
//!     [>] Implement [impl]
//! ```

use crate::plan::RenderPlan;
use crate::types::ExportConfig;

const WARNING_PREFIX: &str = "warning:";

/// Export the rendering plan as an indented outline.
pub fn export(plan: &RenderPlan<'_>, config: &ExportConfig) -> String {
    let mut lines = vec![format!("Progress: {:.0}%", plan.progress_percent)];

    for section in &plan.sections {
        lines.push(String::new());
        lines.push(
            section
                .phase
                .unwrap_or(config.no_phase_label.as_str())
                .to_string(),
        );

        for entry in &section.entries {
            let indent = " ".repeat((entry.depth + 1) * config.indent);
            let mut line = format!(
                "{}[{}] {}",
                indent,
                entry.item.status.marker(),
                entry.item.item_text
            );
            if config.show_ids {
                if let Some(id) = entry.item.id() {
                    line.push_str(&format!(" [{}]", id));
                }
            }
            lines.push(line);
        }
    }

    if !plan.warnings.is_empty() {
        lines.push(String::new());
        for warning in plan.warnings {
            lines.push(format!("{} {}", WARNING_PREFIX, warning));
        }
    }

    let mut output = lines.join("\n");
    output.push('\n');
    output
}
