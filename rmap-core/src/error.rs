//! Error types for rmap-core.
//!
//! Only the roadmap source can fail. Building, grouping and flattening are
//! total over their input and have no error type.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for rmap-core operations.
pub type Result<T> = std::result::Result<T, RoadmapError>;

/// Errors that can occur while loading or editing roadmap data.
#[derive(Error, Debug)]
pub enum RoadmapError {
    /// Roadmap file could not be read or written.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// File being accessed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// JSON snapshot could not be decoded.
    #[error("Invalid roadmap JSON in {}: {source}", path.display())]
    Json {
        /// File being decoded.
        path: PathBuf,
        /// Underlying decode error.
        #[source]
        source: serde_json::Error,
    },

    /// A status string outside the known set.
    #[error("Unknown roadmap status: '{value}'")]
    UnknownStatus {
        /// The rejected value.
        value: String,
    },

    /// No item with the requested text exists.
    #[error("No roadmap item matches '{text}'")]
    ItemNotFound {
        /// Text that was searched for.
        text: String,
    },
}

impl RoadmapError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        RoadmapError::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RoadmapError::io(
            "/tmp/ROADMAP.md",
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        );
        assert!(err.to_string().contains("/tmp/ROADMAP.md"));

        let err = RoadmapError::UnknownStatus {
            value: "finished".to_string(),
        };
        assert!(err.to_string().contains("finished"));
    }
}
