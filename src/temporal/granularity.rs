//! Time granularities for instant arithmetic
//!
//! Defines the units an instant can be shifted by, from nanoseconds up to
//! millennia, and classifies them as fixed-duration or calendar-relative.

use std::fmt;
use std::str::FromStr;

use crate::temporal::{TemporalError, TemporalResult};

const NANOS_PER_MICRO: i64 = 1_000;
const NANOS_PER_MILLI: i64 = 1_000_000;
const NANOS_PER_SECOND: i64 = 1_000_000_000;
const NANOS_PER_MINUTE: i64 = 60 * NANOS_PER_SECOND;
const NANOS_PER_HOUR: i64 = 60 * NANOS_PER_MINUTE;
const NANOS_PER_HALF_DAY: i64 = 12 * NANOS_PER_HOUR;
const NANOS_PER_DAY: i64 = 24 * NANOS_PER_HOUR;

/// Unit of time for shifting an instant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Granularity {
    /// One billionth of a second
    Nanosecond,
    /// One millionth of a second
    Microsecond,
    /// One thousandth of a second
    Millisecond,
    /// One second
    Second,
    /// One minute (60 seconds)
    Minute,
    /// One hour (60 minutes)
    Hour,
    /// Half a day (12 hours)
    HalfDay,
    /// One day (24 hours)
    Day,
    /// One week (7 days), shifted as whole calendar weeks
    Week,
    /// One calendar month (variable length)
    Month,
    /// One calendar year (variable length)
    Year,
    /// Ten calendar years
    Decade,
    /// One hundred calendar years
    Century,
    /// One thousand calendar years
    Millennium,
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl Granularity {
    /// Get the lowercase name of the granularity
    pub fn name(&self) -> &'static str {
        match self {
            Self::Nanosecond => "nanosecond",
            Self::Microsecond => "microsecond",
            Self::Millisecond => "millisecond",
            Self::Second => "second",
            Self::Minute => "minute",
            Self::Hour => "hour",
            Self::HalfDay => "half-day",
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
            Self::Decade => "decade",
            Self::Century => "century",
            Self::Millennium => "millennium",
        }
    }

    /// Check if this granularity has a constant length
    ///
    /// Fixed-duration units are safely convertible to a flat duration;
    /// the remaining units depend on calendar position.
    pub fn is_fixed_duration(&self) -> bool {
        matches!(
            self,
            Self::Nanosecond
                | Self::Microsecond
                | Self::Millisecond
                | Self::Second
                | Self::Minute
                | Self::Hour
                | Self::HalfDay
                | Self::Day
        )
    }

    /// Check if this granularity's length depends on calendar position
    pub fn is_calendar_relative(&self) -> bool {
        !self.is_fixed_duration()
    }

    /// Get the flat length of a fixed-duration granularity in nanoseconds
    ///
    /// Returns `None` for calendar-relative granularities.
    pub fn fixed_duration_nanos(&self) -> Option<i64> {
        match self {
            Self::Nanosecond => Some(1),
            Self::Microsecond => Some(NANOS_PER_MICRO),
            Self::Millisecond => Some(NANOS_PER_MILLI),
            Self::Second => Some(NANOS_PER_SECOND),
            Self::Minute => Some(NANOS_PER_MINUTE),
            Self::Hour => Some(NANOS_PER_HOUR),
            Self::HalfDay => Some(NANOS_PER_HALF_DAY),
            Self::Day => Some(NANOS_PER_DAY),
            _ => None,
        }
    }

    /// Get all granularities, finest first
    pub fn all() -> [Self; 14] {
        [
            Self::Nanosecond,
            Self::Microsecond,
            Self::Millisecond,
            Self::Second,
            Self::Minute,
            Self::Hour,
            Self::HalfDay,
            Self::Day,
            Self::Week,
            Self::Month,
            Self::Year,
            Self::Decade,
            Self::Century,
            Self::Millennium,
        ]
    }
}

impl TryFrom<u8> for Granularity {
    type Error = TemporalError;

    /// Convert a raw index (position in [`Granularity::all`]) into a granularity
    fn try_from(index: u8) -> TemporalResult<Self> {
        Granularity::all()
            .get(index as usize)
            .copied()
            .ok_or_else(|| {
                TemporalError::unsupported_granularity(format!("index {}", index))
            })
    }
}

impl FromStr for Granularity {
    type Err = TemporalError;

    fn from_str(s: &str) -> TemporalResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nanosecond" | "nanos" => Ok(Self::Nanosecond),
            "microsecond" | "micros" => Ok(Self::Microsecond),
            "millisecond" | "millis" => Ok(Self::Millisecond),
            "second" => Ok(Self::Second),
            "minute" => Ok(Self::Minute),
            "hour" => Ok(Self::Hour),
            "half-day" | "half_day" | "halfday" => Ok(Self::HalfDay),
            "day" => Ok(Self::Day),
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            "year" => Ok(Self::Year),
            "decade" => Ok(Self::Decade),
            "century" => Ok(Self::Century),
            "millennium" => Ok(Self::Millennium),
            other => Err(TemporalError::unsupported_granularity(other)),
        }
    }
}
