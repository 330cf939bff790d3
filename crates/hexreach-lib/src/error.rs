use std::path::PathBuf;

use thiserror::Error;

/// Convenient result alias for the hexreach library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
///
/// The distance engine itself never fails; these variants cover snapshot
/// loading and the strict entry points used by front-ends.
#[derive(Debug, Error)]
pub enum Error {
    /// Map snapshot could not be located at the resolved path.
    #[error("map snapshot not found at {path}")]
    SnapshotNotFound { path: PathBuf },

    /// Raised when two records in a snapshot share a label.
    #[error("duplicate hex label in snapshot: {label}")]
    DuplicateLabel { label: String },

    /// Raised when a hyperlane matrix is not 6x6.
    #[error("hex {label} has a malformed hyperlane matrix ({rows} rows, expected 6x6)")]
    MalformedMatrix { label: String, rows: usize },

    /// Raised when a side-keyed map uses an index outside `0..6`.
    #[error("hex {label} references side {side} in {field}; sides must be in 0..6")]
    InvalidSide {
        label: String,
        field: &'static str,
        side: u8,
    },

    /// Raised when a hex label could not be found in the map.
    #[error("unknown hex label: {label}{}", format_suggestions(.suggestions))]
    UnknownHex {
        label: String,
        suggestions: Vec<String>,
    },

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for JSON decoding errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}
