//! Half-open time periods
//!
//! A period is an immutable interval [start, end) over UTC instants. Every
//! computation constructs a fresh period; none are mutated in place.

use std::fmt;

use chrono::{DateTime, Duration as ChronoDuration, Utc};

use crate::temporal::{TemporalError, TemporalResult};

/// Half-open interval [start, end) over instants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Period {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl Period {
    /// Create a new period
    ///
    /// Fails with an invalid period error when `start` is strictly after
    /// `end`. Equal bounds are allowed and produce an empty period.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> TemporalResult<Self> {
        if start > end {
            return Err(TemporalError::invalid_period(start, end));
        }

        Ok(Self { start, end })
    }

    /// Get the inclusive start of the period
    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// Get the exclusive end of the period
    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Check if an instant falls within the period
    pub fn contains(&self, instant: &DateTime<Utc>) -> bool {
        *instant >= self.start && *instant < self.end
    }

    /// Get the length of the period
    pub fn duration(&self) -> ChronoDuration {
        self.end.signed_duration_since(self.start)
    }

    /// Check if the period covers no time at all
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}
