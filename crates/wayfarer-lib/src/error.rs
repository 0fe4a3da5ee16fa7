use std::path::PathBuf;

use thiserror::Error;

use crate::map::CellId;

/// Convenient result alias for the Wayfarer library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
///
/// Unreachable destinations are not errors: route queries report them as an
/// empty list of paths.
#[derive(Debug, Error)]
pub enum Error {
    /// Map file could not be located at the resolved path.
    #[error("map file not found at {path}")]
    MapNotFound { path: PathBuf },

    /// No suitable project directories could be resolved for this platform.
    #[error("failed to resolve project directories for the default map location")]
    ProjectDirsUnavailable,

    /// The map file parsed but its contents are unusable.
    #[error("invalid map data: {message}")]
    InvalidMap { message: String },

    /// Raised when a settlement name could not be found in the map.
    #[error("unknown settlement name: {name}{}", format_suggestions(.suggestions))]
    UnknownSettlement {
        name: String,
        suggestions: Vec<String>,
    },

    /// Raised when a cell identifier is not part of the loaded graph.
    #[error("unknown cell id: {id}")]
    UnknownCell { id: CellId },

    /// Raised when a named request uses the same settlement at both ends.
    #[error("start and destination must be different (both are {name})")]
    IdenticalEndpoints { name: String },

    /// Raised when an edge specification such as `3-4` cannot be parsed.
    #[error("invalid edge '{value}': expected two cell ids separated by '-'")]
    InvalidEdge { value: String },

    /// Raised when rendering a summary for a path without cells.
    #[error("route plan was empty")]
    EmptyRoutePlan,

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
