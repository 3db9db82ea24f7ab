//! Error surface shared by both dictionary backends.

use thiserror::Error;

pub type Result<T, E = DictError> = std::result::Result<T, E>;

/// Failures reported synchronously at the point of misuse. There is no
/// recoverable-vs-fatal split; every failure goes straight to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DictError {
    /// The requested key is not present in the dictionary.
    #[error("key not found")]
    KeyNotFound,

    /// The cursor has no further entries.
    #[error("iterator exhausted")]
    IteratorExhausted,
}
