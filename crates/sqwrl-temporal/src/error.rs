//! Errors for datetime string processing

use thiserror::Error;

use crate::granularity::Granularity;

/// Result type for temporal operations
pub type TemporalResult<T> = Result<T, TemporalError>;

/// Errors that can occur while processing datetime strings
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TemporalError {
    /// Malformed datetime string
    #[error("Invalid datetime string: {value}")]
    InvalidDatetime { value: String },

    /// Unknown granularity name
    #[error("Unknown granularity: {name}")]
    UnknownGranularity { name: String },

    /// Month outside 1..=12
    #[error("Invalid month: {month}")]
    InvalidMonth { month: i64 },

    /// Component finer than the datetime specifies
    #[error("Cannot extract {granularity} from incomplete datetime {value}")]
    IncompleteDatetime {
        granularity: Granularity,
        value: String,
    },

    /// Granule count outside the representable calendar
    #[error("Granule count {count} at {granularity} is out of range")]
    OutOfRange { count: i64, granularity: Granularity },
}

impl TemporalError {
    /// Create an invalid datetime error
    pub fn invalid_datetime(value: impl Into<String>) -> Self {
        Self::InvalidDatetime {
            value: value.into(),
        }
    }
}
