//! Tables drawn with `tabled`.
//!
//! Rows are serialized first and cells read by column key, so any
//! `Serialize` row type works. On a TTY the table is wrapped to the
//! terminal width.

use super::{truncate, Alignment, Column, OutputConfig};
use serde::Serialize;
use serde_json::Value;
use tabled::{
    builder::Builder,
    settings::{object::Columns, style::Style, Alignment as CellAlignment, Modify, Width},
    Table,
};

pub struct TableOutput;

impl TableOutput {
    /// One row per item of `data`, one column per entry of `columns`.
    pub fn format_with_columns<T: Serialize>(
        data: &[T],
        columns: &[Column],
        config: &OutputConfig,
    ) -> String {
        if data.is_empty() {
            return "(no results)".to_string();
        }

        let mut builder = Builder::default();
        builder.push_record(columns.iter().map(|c| c.name.clone()));
        for row in data {
            let value = serde_json::to_value(row).unwrap_or_default();
            builder.push_record(columns.iter().map(|c| Self::cell(&value, c, config)));
        }

        let mut table = builder.build();
        for (idx, column) in columns.iter().enumerate() {
            if column.align == Alignment::Right {
                table.with(Modify::new(Columns::single(idx)).with(CellAlignment::right()));
            }
        }
        Self::finish(table, config)
    }

    /// Two columns, labels right-aligned against their values.
    pub fn format_key_value(pairs: &[(&str, String)], config: &OutputConfig) -> String {
        let mut builder = Builder::default();
        for (label, value) in pairs {
            builder.push_record([label.to_string(), value.clone()]);
        }

        let mut table = builder.build();
        table.with(Modify::new(Columns::first()).with(CellAlignment::right()));
        Self::finish(table, config)
    }

    fn finish(mut table: Table, config: &OutputConfig) -> String {
        if config.compact {
            table.with(Style::blank());
        } else {
            table.with(Style::rounded());
        }
        if config.should_truncate() {
            table.with(Width::wrap(config.effective_width()));
        }
        table.to_string()
    }

    fn cell(row: &Value, column: &Column, config: &OutputConfig) -> String {
        let text = Self::display(row.get(&column.key).unwrap_or(&Value::Null));
        match column.max_width {
            Some(max) if config.should_truncate() => truncate(&text, max),
            _ => text,
        }
    }

    /// Missing values show as `-`, lists as comma-separated text.
    fn display(value: &Value) -> String {
        match value {
            Value::Null => "-".to_string(),
            Value::String(s) => s.clone(),
            Value::Array(values) => values
                .iter()
                .map(Self::display)
                .collect::<Vec<_>>()
                .join(", "),
            Value::Object(fields) => format!("{} fields", fields.len()),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputFormat;

    #[derive(Serialize)]
    struct Row {
        item: String,
        depth: usize,
        depends_on: Vec<String>,
    }

    fn rows() -> Vec<Row> {
        vec![
            Row {
                item: "Design".to_string(),
                depth: 0,
                depends_on: Vec::new(),
            },
            Row {
                item: "Implement".to_string(),
                depth: 1,
                depends_on: vec!["design".to_string(), "spike".to_string()],
            },
        ]
    }

    #[test]
    fn test_columns_render_cells() {
        let columns = vec![
            Column::new("Item", "item"),
            Column::new("Depth", "depth").with_alignment(Alignment::Right),
            Column::new("Depends", "depends_on"),
        ];
        let config = OutputConfig::new(OutputFormat::Table).without_truncation();
        let output = TableOutput::format_with_columns(&rows(), &columns, &config);

        assert!(output.contains("Implement"));
        assert!(output.contains("design, spike"));
        // Design has no dependencies
        assert!(output.contains(" - "));
    }

    #[test]
    fn test_max_width_truncates() {
        let columns = vec![Column::new("Item", "item").with_max_width(5)];
        let config = OutputConfig::new(OutputFormat::Table);
        let output = TableOutput::format_with_columns(&rows(), &columns, &config);

        assert!(output.contains("Im..."));
        assert!(!output.contains("Implement"));
    }

    #[test]
    fn test_no_rows() {
        let columns = vec![Column::new("Item", "item")];
        let config = OutputConfig::new(OutputFormat::Table);
        assert_eq!(
            TableOutput::format_with_columns::<Row>(&[], &columns, &config),
            "(no results)"
        );
    }

    #[test]
    fn test_key_value() {
        let pairs = vec![("Progress", "40%".to_string()), ("Active", "Train".to_string())];
        let config = OutputConfig::new(OutputFormat::Table).without_truncation().compact();
        let output = TableOutput::format_key_value(&pairs, &config);

        assert!(output.contains("Progress"));
        assert!(output.contains("Train"));
        assert!(!output.contains('\u{256d}'));
    }
}
