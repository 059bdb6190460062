use std::path::PathBuf;

use thiserror::Error;

use crate::integrity::IntegrityIssue;

/// Error type for the organizer core
#[derive(Debug, Error)]
pub enum OrganizerError {
    /// Reading or writing a file failed
    #[error("IO error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// File extension or format name that no loader/exporter understands
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Authored data failed validation
    #[error("Reference data has {} integrity issue(s): {}", .0.len(), summarize(.0))]
    Integrity(Vec<IntegrityIssue>),

    #[error("Unknown methodology '{0}' (expected sdlc or stlc)")]
    UnknownMethodology(String),

    #[error("Role '{0}' not found")]
    UnknownRole(String),

    #[error("Requirement '{0}' not found")]
    UnknownRequirement(String),

    #[error("Phase {index} out of range ({len} phases in {methodology})")]
    PhaseOutOfRange {
        methodology: String,
        index: usize,
        len: usize,
    },
}

impl OrganizerError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        OrganizerError::Io {
            path: path.into(),
            source,
        }
    }
}

fn summarize(issues: &[IntegrityIssue]) -> String {
    issues
        .iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

pub type Result<T> = std::result::Result<T, OrganizerError>;
