//! CSV rendering.
//!
//! Cells holding `,`, quotes or line breaks are quoted. List cells, such as
//! `depends_on`, are joined with `;` so they stay in one column.

use super::{Column, OutputConfig};
use serde::Serialize;
use serde_json::{Map, Value};

pub struct CsvOutput;

impl CsvOutput {
    /// Render any serializable value.
    ///
    /// A list of objects becomes one row per object under the keys of the
    /// first. A single object becomes one header row and one value row.
    pub fn format<T: Serialize>(data: &T, _config: &OutputConfig) -> String {
        match serde_json::to_value(data) {
            Ok(Value::Array(values)) => Self::records(&values),
            Ok(Value::Object(record)) => Self::records(&[Value::Object(record)]),
            Ok(other) => Self::cell(&other),
            Err(_) => String::new(),
        }
    }

    /// Render rows under explicit columns. The header line is always written.
    pub fn format_with_columns<T: Serialize>(
        data: &[T],
        columns: &[Column],
        _config: &OutputConfig,
    ) -> String {
        let header: Vec<String> = columns.iter().map(|c| Self::quote(&c.name)).collect();
        let mut lines = vec![header.join(",")];

        for value in data.iter().filter_map(|row| serde_json::to_value(row).ok()) {
            let cells: Vec<String> = columns
                .iter()
                .map(|c| value.get(&c.key).map(Self::cell).unwrap_or_default())
                .collect();
            lines.push(cells.join(","));
        }

        lines.join("\n")
    }

    fn records(values: &[Value]) -> String {
        let Some(Value::Object(first)) = values.first() else {
            return values.iter().map(Self::cell).collect::<Vec<_>>().join("\n");
        };
        let keys: Vec<&String> = first.keys().collect();

        let mut lines = vec![keys
            .iter()
            .map(|k| Self::quote(k))
            .collect::<Vec<_>>()
            .join(",")];
        lines.extend(
            values
                .iter()
                .filter_map(Value::as_object)
                .map(|record| Self::record_line(record, &keys)),
        );
        lines.join("\n")
    }

    fn record_line(record: &Map<String, Value>, keys: &[&String]) -> String {
        keys.iter()
            .map(|k| record.get(k.as_str()).map(Self::cell).unwrap_or_default())
            .collect::<Vec<_>>()
            .join(",")
    }

    fn cell(value: &Value) -> String {
        match value {
            Value::Null => String::new(),
            Value::String(s) => Self::quote(s),
            Value::Array(values) => {
                let joined: Vec<String> = values
                    .iter()
                    .map(|v| v.as_str().map_or_else(|| v.to_string(), str::to_string))
                    .collect();
                Self::quote(&joined.join(";"))
            }
            Value::Object(record) => format!("{} fields", record.len()),
            other => other.to_string(),
        }
    }

    /// Quote `s` when needed, doubling embedded quotes.
    fn quote(s: &str) -> String {
        if s.contains([',', '"', '\n', '\r']) {
            format!("\"{}\"", s.replace('"', "\"\""))
        } else {
            s.to_string()
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
        depends_on: Vec<String>,
    }

    fn rows() -> Vec<Row> {
        vec![
            Row {
                item: "Design".to_string(),
                depends_on: Vec::new(),
            },
            Row {
                item: "Build, test".to_string(),
                depends_on: vec!["design".to_string(), "spike".to_string()],
            },
        ]
    }

    fn config() -> OutputConfig {
        OutputConfig::new(OutputFormat::Csv)
    }

    #[test]
    fn test_list_of_records() {
        let output = CsvOutput::format(&rows(), &config());

        // serde_json maps keep keys sorted
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines, vec!["depends_on,item", ",Design", "design;spike,\"Build, test\""]);
    }

    #[test]
    fn test_single_record() {
        let output = CsvOutput::format(&rows()[0], &config());
        assert_eq!(output, "depends_on,item\n,Design");
    }

    #[test]
    fn test_quote() {
        assert_eq!(CsvOutput::quote("Train"), "Train");
        assert_eq!(CsvOutput::quote("Train, eval"), "\"Train, eval\"");
        assert_eq!(CsvOutput::quote("line\nbreak"), "\"line\nbreak\"");
        assert_eq!(CsvOutput::quote("the \"big\" one"), "\"the \"\"big\"\" one\"");
    }

    #[test]
    fn test_columns_pick_fields() {
        let columns = vec![Column::new("Item", "item"), Column::new("Depends", "depends_on")];
        let output = CsvOutput::format_with_columns(&rows(), &columns, &config());

        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "Item,Depends");
        assert_eq!(lines[2], "\"Build, test\",design;spike");
    }

    #[test]
    fn test_empty_rows_keep_header() {
        let columns = vec![Column::new("Item", "item")];
        let output = CsvOutput::format_with_columns::<Row>(&[], &columns, &config());
        assert_eq!(output, "Item");
    }
}
