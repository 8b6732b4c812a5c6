//! Profile Error Types

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    #[error("A profile needs at least one key prefix")]
    NoPrefixes,

    #[error("Key prefixes cannot be empty")]
    EmptyPrefix,

    #[error("Key prefix '{prefix}' is declared more than once")]
    DuplicatePrefix { prefix: String },

    #[error("Quote entry '{value}' must be a single character")]
    InvalidQuote { value: String },

    #[error("Assignment '{value}' must be a single character")]
    InvalidAssignment { value: String },

    #[error("Assignment character '{ch}' conflicts with a quote or key prefix")]
    AssignmentConflict { ch: char },

    #[error("Unknown convention: {name}")]
    UnknownConvention { name: String },

    #[error("Cannot read profile file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot parse profile: {message}")]
    Parse { message: String },
}

/// Result type for profile operations
pub type ProfileResult<T> = Result<T, ProfileError>;
