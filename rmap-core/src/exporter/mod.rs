//! Exporters for a rendering plan.
//!
//! Every exporter consumes a [`RenderPlan`](crate::plan::RenderPlan), so the
//! phase grouping and tree order are decided once, in the builder.

pub mod json;
pub mod markdown;
pub mod outline;

use std::fmt;
use std::str::FromStr;

use crate::plan::RenderPlan;
use crate::types::ExportConfig;

/// Supported export formats.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Outline,
    Markdown,
    Json,
}

impl ExportFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            ExportFormat::Outline => "outline",
            ExportFormat::Markdown => "markdown",
            ExportFormat::Json => "json",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "outline" | "txt" | "text" => Ok(ExportFormat::Outline),
            "markdown" | "md" => Ok(ExportFormat::Markdown),
            "json" => Ok(ExportFormat::Json),
            _ => Err(format!("Unknown export format: {}", s)),
        }
    }
}

/// Export `plan` in the requested format.
pub fn export(
    plan: &RenderPlan<'_>,
    format: ExportFormat,
    config: &ExportConfig,
) -> Result<String, serde_json::Error> {
    match format {
        ExportFormat::Outline => Ok(outline::export(plan, config)),
        ExportFormat::Markdown => Ok(markdown::export(plan, config)),
        ExportFormat::Json => json::export(plan, config),
    }
}
