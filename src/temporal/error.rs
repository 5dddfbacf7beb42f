//! Error types for the temporal module
//!
//! Defines error types specific to instant arithmetic and period computation.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors that can occur during temporal computations
#[derive(Error, Debug)]
pub enum TemporalError {
    /// Error when a period is constructed with start after end
    #[error("Invalid time period: start {start} is after end {end}")]
    InvalidPeriod {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    /// Error when a granularity outside the enumerated set is requested
    #[error("Unsupported granularity: {0}")]
    UnsupportedGranularity(String),

    /// Error when instant arithmetic leaves the representable time range
    #[error("Instant out of range: {0}")]
    OutOfRange(String),
}

/// Result type for temporal operations
pub type TemporalResult<T> = std::result::Result<T, TemporalError>;

impl TemporalError {
    /// Create a new invalid period error
    pub fn invalid_period(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self::InvalidPeriod { start, end }
    }

    /// Create a new unsupported granularity error
    pub fn unsupported_granularity(name: impl Into<String>) -> Self {
        Self::UnsupportedGranularity(name.into())
    }

    /// Create a new out of range error
    pub fn out_of_range(message: impl Into<String>) -> Self {
        Self::OutOfRange(message.into())
    }

    /// Check if this is an invalid period error
    pub fn is_invalid_period(&self) -> bool {
        matches!(self, Self::InvalidPeriod { .. })
    }

    /// Check if this is an unsupported granularity error
    pub fn is_unsupported_granularity(&self) -> bool {
        matches!(self, Self::UnsupportedGranularity(_))
    }

    /// Check if this is an out of range error
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, Self::OutOfRange(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_temporal_error_creation() {
        let start = Utc.with_ymd_and_hms(1996, 4, 18, 22, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(1996, 4, 4, 22, 0, 0).unwrap();

        let err = TemporalError::invalid_period(start, end);
        assert!(matches!(
            err,
            TemporalError::InvalidPeriod { start: s, end: e } if s == start && e == end
        ));
        assert!(err.is_invalid_period());
        assert!(!err.is_unsupported_granularity());

        let err = TemporalError::unsupported_granularity("fortnight");
        assert!(err.is_unsupported_granularity());
        assert_eq!(err.to_string(), "Unsupported granularity: fortnight");

        let err = TemporalError::out_of_range("shift overflows the calendar");
        assert!(err.is_out_of_range());
    }
}
