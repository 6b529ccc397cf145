//! Errors raised by [`Standing`](crate::Standing) operations.

use thiserror::Error;

/// Failure of a single standing operation. Nothing is retried; the
/// container is left untouched when an operation fails.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StandingError {
    #[error("key {0} is already present in the standing")]
    KeyConflict(String),

    #[error("key {0} is not present in the standing")]
    UnknownKey(String),

    #[error("index {index} out of range for a standing of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("invalid permutation: {0}")]
    InvalidPermutation(String),

    #[error("{0} is not a valid standing value")]
    InvalidValue(f64),

    #[error("operation needs a non-empty standing")]
    Empty,
}
