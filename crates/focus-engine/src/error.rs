//! Error types for focus-engine operations.

use thiserror::Error;

/// Failure reported by an [`EventStore`](crate::store::EventStore).
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Event store unavailable: {0}")]
    Unavailable(String),

    #[error("Malformed event data: {0}")]
    Malformed(String),
}

#[derive(Error, Debug)]
pub enum FocusError {
    #[error("Invalid work hours: {0}")]
    InvalidWorkHours(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    /// No valid local time follows a work-window boundary within a day.
    #[error("Work window boundary {0} does not exist in the configured timezone")]
    NonexistentLocalTime(String),

    #[error("Date out of range: {0}")]
    DateOutOfRange(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type Result<T> = std::result::Result<T, FocusError>;
