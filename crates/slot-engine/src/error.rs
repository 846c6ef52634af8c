//! Error types for slot-engine operations.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SchedulerError {
    /// A rule's start or end time is not a valid `HH:MM` time of day.
    #[error("Invalid time format: {0}")]
    InvalidTimeFormat(String),

    /// A caller-supplied argument is out of range (e.g., a non-positive slot duration).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The provider has no availability rules on file at all.
    #[error("Provider {0} not found or has no schedule rules defined")]
    ProviderNotFound(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SchedulerError>;
