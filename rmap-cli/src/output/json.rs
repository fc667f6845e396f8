//! JSON rendering through serde_json.

use super::OutputConfig;
use serde::Serialize;

pub struct JsonOutput;

impl JsonOutput {
    /// Pretty-printed, or on one line when `config.compact` is set.
    ///
    /// A value that fails to serialize renders as an `{"error": ...}` object.
    pub fn format<T: Serialize + ?Sized>(data: &T, config: &OutputConfig) -> String {
        let rendered = if config.compact {
            serde_json::to_string(data)
        } else {
            serde_json::to_string_pretty(data)
        };
        rendered.unwrap_or_else(|e| serde_json::json!({ "error": e.to_string() }).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Serialize)]
    struct Progress {
        phase: String,
        percent: f64,
    }

    fn sample() -> Progress {
        Progress {
            phase: "Training".to_string(),
            percent: 40.0,
        }
    }

    #[test]
    fn test_format_pretty() {
        let config = OutputConfig::new(super::super::OutputFormat::Json);
        let output = JsonOutput::format(&sample(), &config);

        assert!(output.contains("\"phase\": \"Training\""));
        assert!(output.contains("40.0"));
        assert!(output.contains('\n'));
    }

    #[test]
    fn test_format_compact() {
        let config = OutputConfig::new(super::super::OutputFormat::Json).compact();
        let output = JsonOutput::format(&sample(), &config);

        assert_eq!(output, r#"{"phase":"Training","percent":40.0}"#);
    }

    #[test]
    fn test_format_slice() {
        let rows = vec![sample(), sample()];
        let config = OutputConfig::new(super::super::OutputFormat::Json).compact();
        let output = JsonOutput::format(rows.as_slice(), &config);

        assert!(output.starts_with('['));
        assert!(output.ends_with(']'));
    }
}
