//! Errors surfaced by the scheduler.

use overlap_db::StoreError;

/// Errors returned by [`Scheduler`](crate::Scheduler) operations.
///
/// The HTTP layer maps these one-to-one onto status codes, so the
/// [`Validation`](Self::Validation) message is shown to the caller verbatim
/// while [`Storage`](Self::Storage) details only ever reach the logs.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// The request was malformed.
    #[error("{0}")]
    Validation(String),

    /// No event exists with this id.
    #[error("event not found: {0}")]
    NotFound(String),

    /// The storage backend failed or is unreachable.
    #[error("storage unavailable: {0}")]
    Storage(#[from] StoreError),
}

impl ServiceError {
    /// Shorthand for a [`ServiceError::Validation`].
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}
