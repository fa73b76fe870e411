//! Core error types

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A single archive record could not be normalized. Callers skip it.
    #[error("Malformed game: {0}")]
    MalformedGame(String),

    /// Ordering-dependent aggregates need games ascending by end time.
    #[error("Games are not in chronological order (first offending index {index})")]
    UnsortedInput { index: usize },

    #[error("Illegal or unparsable move {token:?} at ply {ply}")]
    IllegalMove { ply: usize, token: String },
}
