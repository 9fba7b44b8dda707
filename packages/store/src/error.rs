use thiserror::Error;

/// Failure of a persistence operation.
///
/// Every [`crate::Repository`] call returns this instead of swallowing errors, so
/// the view layer can tell "no data yet" apart from "could not load".
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    #[error("{0}")]
    Validation(String),
    /// Missing id, or an id owned by someone else.
    #[error("Record not found")]
    NotFound,
    #[error("Failed to load records: {0}")]
    Read(String),
    #[error("Failed to save changes: {0}")]
    Write(String),
}

impl StoreError {
    pub fn validation(reason: impl Into<String>) -> Self {
        StoreError::Validation(reason.into())
    }
}
