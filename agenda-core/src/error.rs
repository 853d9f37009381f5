//! Error types for the agenda ecosystem.

use thiserror::Error;

/// Errors that can occur in agenda operations.
#[derive(Error, Debug)]
pub enum AgendaError {
    #[error("Invalid instant '{0}': expected an ISO-8601 date/time")]
    InvalidInstant(String),

    #[error("Window bounds are required: supply both start and end")]
    MissingWindowBounds,
}

/// Result type alias for agenda operations.
pub type AgendaResult<T> = Result<T, AgendaError>;
