use thiserror::Error;

/// Error taxonomy for storage and domain operations.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// Unique-constraint violation on (user, title). Surfaced as its
    /// own variant so callers can show the specific notice instead of a
    /// generic storage failure.
    #[error("You've already reviewed this title. Edit your existing review instead.")]
    DuplicateReview,

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;
