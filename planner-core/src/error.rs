//! Error types for the planner engine.

use thiserror::Error;

/// A violated event invariant, detected before anything is written.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Title must not be empty")]
    EmptyTitle,

    #[error("Start date must not be after end date")]
    DateOrderInvalid,

    #[error("Series id is missing or not positive")]
    MissingOrInvalidRepeatId,

    #[error("Weekly repetition needs at least one weekday")]
    WeeklyRepeatDaysRequired,

    #[error("Start must not be after end")]
    DateTimeInvalid,
}

impl ValidationError {
    /// Name of the event field the error refers to, for field-level messages.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::EmptyTitle => "title",
            ValidationError::DateOrderInvalid => "start_date",
            ValidationError::MissingOrInvalidRepeatId => "repeat_id",
            ValidationError::WeeklyRepeatDaysRequired => "repeat_days",
            ValidationError::DateTimeInvalid => "start_time",
        }
    }
}

/// Failures raised by an [`EventStore`](crate::store::EventStore) backend.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Event has no id")]
    MissingId,

    #[error("Event {0} not found")]
    NotFound(i64),
}

/// Errors that can occur in planner operations.
#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("Invalid event: {0}")]
    Validation(#[from] ValidationError),

    #[error("No series found for repeat id {0:?}")]
    SeriesNotFound(Option<i64>),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for planner operations.
pub type PlannerResult<T> = Result<T, PlannerError>;

/// Result type alias for store backends.
pub type StoreResult<T> = Result<T, StoreError>;
