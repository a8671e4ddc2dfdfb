//! Error types for the diff engine.
//!
//! Any two strings are valid diff input, so the only failure class is a
//! practical resource limit being hit on very large or very dissimilar inputs.

use std::fmt;

/// Errors that can occur while computing a diff.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DiffError {
    /// The computation hit a memory or configured size limit.
    ///
    /// Retrying with the same input will fail again; callers must reduce the
    /// input size or raise the limit.
    #[error("resource exhausted: {reason}")]
    ResourceExhausted { reason: ResourceLimit },
}

impl DiffError {
    pub(crate) fn exhausted(reason: ResourceLimit) -> Self {
        Self::ResourceExhausted { reason }
    }
}

/// The limit that caused [`DiffError::ResourceExhausted`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceLimit {
    /// An allocation for the search trace or output could not be satisfied.
    Allocation,
    /// More distinct lines than the symbol space can address.
    SymbolSpace { distinct: usize },
    /// Combined line count exceeded the configured maximum.
    LineLimit { lines: usize, limit: usize },
    /// The edit distance exceeded the configured maximum.
    EditLimit { limit: usize },
}

impl fmt::Display for ResourceLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Allocation => write!(f, "allocation failed"),
            Self::SymbolSpace { distinct } => {
                write!(f, "{distinct} distinct lines exceed the symbol space")
            }
            Self::LineLimit { lines, limit } => {
                write!(f, "{lines} lines exceed the limit of {limit}")
            }
            Self::EditLimit { limit } => {
                write!(f, "edit distance exceeds the limit of {limit}")
            }
        }
    }
}

/// Convenience alias for diff results.
pub type DiffResult<T> = Result<T, DiffError>;
