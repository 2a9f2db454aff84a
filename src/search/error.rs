//! Error types for search option handling.

use std::fmt;

/// Errors that can occur while building or validating search options.
///
/// Every variant is raised before traversal starts; once a search is running
/// it cannot fail, it can only record unprocessed paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// An option name the engine does not recognize.
    UnknownOption { name: String },
    /// A verbosity level outside the supported range.
    InvalidVerboseLevel { level: u8 },
    /// An exclusion kind label that names no known category.
    UnknownKind { name: String },
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchError::UnknownOption { name } => {
                write!(f, "Unknown search option '{}'", name)
            }
            SearchError::InvalidVerboseLevel { level } => {
                write!(f, "Invalid verbose level {}, expected 1 or 2", level)
            }
            SearchError::UnknownKind { name } => {
                write!(f, "Unknown kind '{}' in exclude_kinds", name)
            }
        }
    }
}

impl std::error::Error for SearchError {}
