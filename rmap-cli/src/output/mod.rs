//! Rendering of command results.
//!
//! A command builds a serializable result and hands it to [`Output`], which
//! picks one of five renderings: `table` for people, `json` and `csv` for
//! scripts, `tree` for hierarchy and `markdown` for pasting into documents.
//!
//! When stdout is piped, colors and truncation are switched off.

use clap::ValueEnum;
use serde::Serialize;
use std::io::IsTerminal;
use std::str::FromStr;

mod csv;
mod json;
mod table;
mod tree;

pub use self::csv::CsvOutput;
pub use self::json::JsonOutput;
pub use self::table::TableOutput;
pub use self::tree::{NodeKind, TreeNode, TreeOutput};

/// Rendering selected with `--format` or `[output] format`.
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    /// Styled text for the terminal (default)
    #[default]
    Table,
    /// Pretty-printed JSON
    Json,
    /// Comma-separated rows with a header line
    Csv,
    /// Box-drawing hierarchy
    Tree,
    /// Markdown, re-readable as a roadmap where it applies
    Markdown,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let format = match s.to_ascii_lowercase().as_str() {
            "table" => OutputFormat::Table,
            "json" => OutputFormat::Json,
            "csv" => OutputFormat::Csv,
            "tree" => OutputFormat::Tree,
            "markdown" | "md" => OutputFormat::Markdown,
            other => return Err(format!("Unknown output format: '{}'", other)),
        };
        Ok(format)
    }
}

/// Runtime rendering settings.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub no_color: bool,
    /// Keep long cells and item text intact
    pub no_truncate: bool,
    /// Single-line JSON, borderless tables
    pub compact: bool,
}

impl OutputConfig {
    /// Colors and truncation on, width from the terminal.
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            no_color: false,
            no_truncate: false,
            compact: false,
        }
    }

    pub fn auto_detect(format: OutputFormat) -> Self {
        Self::auto_detect_with_color_override(format, None)
    }

    /// Settings for the current stdout.
    ///
    /// Off a TTY nothing is truncated. Colors follow the TTY unless
    /// `color_override` says otherwise.
    pub fn auto_detect_with_color_override(
        format: OutputFormat,
        color_override: Option<bool>,
    ) -> Self {
        let tty = is_tty();
        Self {
            no_color: !color_override.unwrap_or(tty),
            no_truncate: !tty,
            ..Self::new(format)
        }
    }

    pub fn effective_width(&self) -> usize {
        terminal_width()
    }

    pub fn use_colors(&self) -> bool {
        !self.no_color
    }

    pub fn should_truncate(&self) -> bool {
        !self.no_truncate
    }

    pub fn without_colors(self) -> Self {
        Self {
            no_color: true,
            ..self
        }
    }

    pub fn without_truncation(self) -> Self {
        Self {
            no_truncate: true,
            ..self
        }
    }

    pub fn compact(self) -> Self {
        Self {
            compact: true,
            ..self
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::auto_detect(OutputFormat::default())
    }
}

/// A table or CSV column: header text plus the serialized field it reads.
#[derive(Debug, Clone)]
pub struct Column {
    pub name: String,
    pub key: String,
    /// Cells longer than this are cut with `...` when truncating
    pub max_width: Option<usize>,
    pub align: Alignment,
}

impl Column {
    pub fn new(name: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            key: key.into(),
            max_width: None,
            align: Alignment::default(),
        }
    }

    pub fn with_max_width(self, max_width: usize) -> Self {
        Self {
            max_width: Some(max_width),
            ..self
        }
    }

    pub fn with_alignment(self, align: Alignment) -> Self {
        Self { align, ..self }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Alignment {
    #[default]
    Left,
    Right,
}

/// A command result that can be drawn in every [`OutputFormat`].
///
/// Only the table rendering is required. JSON, CSV and tree fall back to
/// the serialized value, and markdown falls back to the table.
pub trait Outputter: Serialize + Sized {
    fn to_table(&self, config: &OutputConfig) -> String;

    fn to_json(&self, config: &OutputConfig) -> String {
        JsonOutput::format(self, config)
    }

    fn to_csv(&self, config: &OutputConfig) -> String {
        CsvOutput::format(self, config)
    }

    fn to_tree(&self, config: &OutputConfig) -> String {
        TreeOutput::format(self, config)
    }

    fn to_markdown(&self, config: &OutputConfig) -> String {
        self.to_table(config)
    }

    fn render(&self, config: &OutputConfig) -> String {
        let render_fn: fn(&Self, &OutputConfig) -> String = match config.format {
            OutputFormat::Table => Self::to_table,
            OutputFormat::Json => Self::to_json,
            OutputFormat::Csv => Self::to_csv,
            OutputFormat::Tree => Self::to_tree,
            OutputFormat::Markdown => Self::to_markdown,
        };
        render_fn(self, config)
    }

    /// Print the rendering to stdout with a single trailing newline.
    fn output(&self, config: &OutputConfig) {
        println!("{}", self.render(config).trim_end());
    }
}

/// A result paired with the settings to draw it.
pub struct Output<T> {
    data: T,
    config: OutputConfig,
}

impl<T: Outputter> Output<T> {
    /// Settings detected from stdout.
    pub fn new(data: T, format: OutputFormat) -> Self {
        Self::with_config(data, OutputConfig::auto_detect(format))
    }

    pub fn with_config(data: T, config: OutputConfig) -> Self {
        Self { data, config }
    }

    pub fn render(&self) -> anyhow::Result<()> {
        self.data.output(&self.config);
        Ok(())
    }

    pub fn render_to_string(&self) -> String {
        self.data.render(&self.config)
    }
}

/// Results whose human rendering ignores the output settings.
///
/// JSON, CSV and tree output come from the serialized form.
pub trait TableDisplay: Serialize {
    fn to_table(&self) -> String;

    fn to_markdown(&self) -> String {
        self.to_table()
    }
}

impl<T: TableDisplay> Outputter for T {
    fn to_table(&self, _config: &OutputConfig) -> String {
        TableDisplay::to_table(self)
    }

    fn to_markdown(&self, _config: &OutputConfig) -> String {
        TableDisplay::to_markdown(self)
    }
}

/// Cut `s` to at most `max_width` characters, ending in `...` when cut.
pub fn truncate(s: &str, max_width: usize) -> String {
    if s.chars().count() <= max_width {
        return s.to_string();
    }
    if max_width <= 3 {
        return s.chars().take(max_width).collect();
    }
    let mut cut: String = s.chars().take(max_width - 3).collect();
    cut.push_str("...");
    cut
}

pub fn is_tty() -> bool {
    std::io::stdout().is_terminal()
}

/// Terminal columns, 80 when there is no terminal.
pub fn terminal_width() -> usize {
    terminal_size::terminal_size().map_or(80, |(width, _)| usize::from(width.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Train", 10), "Train");
        assert_eq!(truncate("Train baseline", 8), "Train...");
        assert_eq!(truncate("Train baseline", 2), "Tr");
    }

    #[test]
    fn test_truncate_counts_chars() {
        assert_eq!(truncate("\u{25b6} ship it", 9), "\u{25b6} ship it");
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("md".parse::<OutputFormat>().unwrap(), OutputFormat::Markdown);
        assert_eq!("TREE".parse::<OutputFormat>().unwrap(), OutputFormat::Tree);
        assert!("yaml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_output_config_builders() {
        let config = OutputConfig::new(OutputFormat::Json)
            .without_colors()
            .without_truncation()
            .compact();

        assert_eq!(config.format, OutputFormat::Json);
        assert!(!config.use_colors());
        assert!(!config.should_truncate());
        assert!(config.compact);
    }

    #[test]
    fn test_color_override_wins_over_tty() {
        let off = OutputConfig::auto_detect_with_color_override(OutputFormat::Table, Some(false));
        assert!(!off.use_colors());
        let on = OutputConfig::auto_detect_with_color_override(OutputFormat::Table, Some(true));
        assert!(on.use_colors());
    }

    #[derive(Serialize)]
    struct Note {
        text: String,
    }

    impl TableDisplay for Note {
        fn to_table(&self) -> String {
            format!("note: {}", self.text)
        }
    }

    #[test]
    fn test_render_dispatches_on_format() {
        let note = Note {
            text: "ship".to_string(),
        };
        let table = OutputConfig::new(OutputFormat::Table);
        let markdown = OutputConfig::new(OutputFormat::Markdown);
        let json = OutputConfig::new(OutputFormat::Json).compact();

        assert_eq!(note.render(&table), "note: ship");
        assert_eq!(note.render(&markdown), "note: ship");
        assert_eq!(note.render(&json), r#"{"text":"ship"}"#);
    }
}
