//! Calendar-aligned period boundaries
//!
//! Computes the rolling "past X" window and the aligned "last X" / "next X"
//! windows relative to a reference instant. Aligned windows are truncated to
//! the canonical start of their unit: weeks start Monday 00:00:00, trimesters
//! and semesters anchor to January 1, years to January 1. All windows are
//! half-open periods.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Duration as ChronoDuration, Months, TimeZone, Timelike, Utc};

use crate::temporal::arithmetic::shift_months;
use crate::temporal::{shift, Direction, Granularity, Period, TemporalError, TemporalResult};

const TRIMESTER_MONTHS: u32 = 3;
const SEMESTER_MONTHS: u32 = 6;

/// Unit of a calendar-aligned or rolling window
///
/// Distinct from [`Granularity`]: trimesters and semesters are first-class
/// only for window alignment and are expressed as 3- and 6-month shifts
/// everywhere else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlignedUnit {
    /// One whole second
    Second,
    /// One whole minute
    Minute,
    /// One whole hour
    Hour,
    /// One whole day, midnight to midnight
    Day,
    /// One whole week, Monday to Monday
    Week,
    /// One whole calendar month
    Month,
    /// One quarter of a year, anchored to January 1
    Trimester,
    /// One half of a year, anchored to January 1
    Semester,
    /// One whole calendar year
    Year,
}

impl fmt::Display for AlignedUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl AlignedUnit {
    /// Get the lowercase name of the unit
    pub fn name(&self) -> &'static str {
        match self {
            Self::Second => "second",
            Self::Minute => "minute",
            Self::Hour => "hour",
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
            Self::Trimester => "trimester",
            Self::Semester => "semester",
            Self::Year => "year",
        }
    }

    /// Get all window units, finest first
    pub fn all() -> [Self; 9] {
        [
            Self::Second,
            Self::Minute,
            Self::Hour,
            Self::Day,
            Self::Week,
            Self::Month,
            Self::Trimester,
            Self::Semester,
            Self::Year,
        ]
    }
}

impl FromStr for AlignedUnit {
    type Err = TemporalError;

    fn from_str(s: &str) -> TemporalResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "second" => Ok(Self::Second),
            "minute" => Ok(Self::Minute),
            "hour" => Ok(Self::Hour),
            "day" => Ok(Self::Day),
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            "trimester" | "quarter" => Ok(Self::Trimester),
            "semester" => Ok(Self::Semester),
            "year" => Ok(Self::Year),
            other => Err(TemporalError::unsupported_granularity(other)),
        }
    }
}

/// Compute the rolling window ending at the reference instant
///
/// The window is `[reference shifted one unit into the past, reference)`.
/// It follows the reference exactly and is not calendar-aligned.
pub fn past_period(reference: DateTime<Utc>, unit: AlignedUnit) -> TemporalResult<Period> {
    let start = match unit {
        AlignedUnit::Second => shift(reference, 1, Granularity::Second, Direction::Past)?,
        AlignedUnit::Minute => shift(reference, 1, Granularity::Minute, Direction::Past)?,
        AlignedUnit::Hour => shift(reference, 1, Granularity::Hour, Direction::Past)?,
        AlignedUnit::Day => shift(reference, 1, Granularity::Day, Direction::Past)?,
        AlignedUnit::Week => shift(reference, 1, Granularity::Week, Direction::Past)?,
        AlignedUnit::Month => shift(reference, 1, Granularity::Month, Direction::Past)?,
        AlignedUnit::Trimester => {
            shift(reference, TRIMESTER_MONTHS, Granularity::Month, Direction::Past)?
        }
        AlignedUnit::Semester => {
            shift(reference, SEMESTER_MONTHS, Granularity::Month, Direction::Past)?
        }
        AlignedUnit::Year => shift(reference, 1, Granularity::Year, Direction::Past)?,
    };

    Period::new(start, reference)
}

/// Compute the previous whole unit before the reference instant
///
/// The reference is shifted one unit into the past and truncated to the
/// unit's canonical start; the window spans exactly one unit from there.
/// Trimesters and semesters use the month-of-year differential so their
/// boundaries anchor to January 1 regardless of the reference month.
pub fn last_period(reference: DateTime<Utc>, unit: AlignedUnit) -> TemporalResult<Period> {
    let start = match unit {
        AlignedUnit::Second => {
            start_of_second(shift(reference, 1, Granularity::Second, Direction::Past)?)?
        }
        AlignedUnit::Minute => {
            start_of_minute(shift(reference, 1, Granularity::Minute, Direction::Past)?)?
        }
        AlignedUnit::Hour => {
            start_of_hour(shift(reference, 1, Granularity::Hour, Direction::Past)?)?
        }
        AlignedUnit::Day => {
            start_of_day(shift(reference, 1, Granularity::Day, Direction::Past)?)?
        }
        AlignedUnit::Week => {
            start_of_week(shift(reference, 1, Granularity::Week, Direction::Past)?)?
        }
        AlignedUnit::Month => {
            start_of_month(shift(reference, 1, Granularity::Month, Direction::Past)?)?
        }
        AlignedUnit::Trimester => {
            let differential = (reference.month() - 1) % TRIMESTER_MONTHS;
            start_of_month(shift_months(
                reference,
                TRIMESTER_MONTHS + differential,
                Direction::Past,
            )?)?
        }
        AlignedUnit::Semester => {
            let differential = (reference.month() - 1) % SEMESTER_MONTHS;
            start_of_month(shift_months(
                reference,
                SEMESTER_MONTHS + differential,
                Direction::Past,
            )?)?
        }
        AlignedUnit::Year => {
            start_of_year(shift(reference, 1, Granularity::Year, Direction::Past)?)?
        }
    };

    Period::new(start, window_end(start, unit)?)
}

/// Compute the next whole unit after the reference instant
///
/// Mirror of [`last_period`]: the reference is shifted forward and truncated
/// to the unit's canonical start. For trimesters and semesters the forward
/// shift is `(month_of_year mod width) + 1` months.
pub fn next_period(reference: DateTime<Utc>, unit: AlignedUnit) -> TemporalResult<Period> {
    let start = match unit {
        AlignedUnit::Second => {
            start_of_second(shift(reference, 1, Granularity::Second, Direction::Future)?)?
        }
        AlignedUnit::Minute => {
            start_of_minute(shift(reference, 1, Granularity::Minute, Direction::Future)?)?
        }
        AlignedUnit::Hour => {
            start_of_hour(shift(reference, 1, Granularity::Hour, Direction::Future)?)?
        }
        AlignedUnit::Day => {
            start_of_day(shift(reference, 1, Granularity::Day, Direction::Future)?)?
        }
        AlignedUnit::Week => {
            start_of_week(shift(reference, 1, Granularity::Week, Direction::Future)?)?
        }
        AlignedUnit::Month => {
            start_of_month(shift(reference, 1, Granularity::Month, Direction::Future)?)?
        }
        AlignedUnit::Trimester => {
            let differential = reference.month() % TRIMESTER_MONTHS;
            start_of_month(shift_months(reference, differential + 1, Direction::Future)?)?
        }
        AlignedUnit::Semester => {
            let differential = reference.month() % SEMESTER_MONTHS;
            start_of_month(shift_months(reference, differential + 1, Direction::Future)?)?
        }
        AlignedUnit::Year => {
            start_of_year(shift(reference, 1, Granularity::Year, Direction::Future)?)?
        }
    };

    Period::new(start, window_end(start, unit)?)
}

fn window_end(start: DateTime<Utc>, unit: AlignedUnit) -> TemporalResult<DateTime<Utc>> {
    let end = match unit {
        AlignedUnit::Second => start.checked_add_signed(ChronoDuration::seconds(1)),
        AlignedUnit::Minute => start.checked_add_signed(ChronoDuration::minutes(1)),
        AlignedUnit::Hour => start.checked_add_signed(ChronoDuration::hours(1)),
        AlignedUnit::Day => start.checked_add_signed(ChronoDuration::days(1)),
        AlignedUnit::Week => start.checked_add_signed(ChronoDuration::days(7)),
        AlignedUnit::Month => start.checked_add_months(Months::new(1)),
        AlignedUnit::Trimester => start.checked_add_months(Months::new(TRIMESTER_MONTHS)),
        AlignedUnit::Semester => start.checked_add_months(Months::new(SEMESTER_MONTHS)),
        AlignedUnit::Year => start.checked_add_months(Months::new(12)),
    };

    end.ok_or_else(|| {
        TemporalError::out_of_range(format!(
            "Window end for a {} starting at {} leaves the supported date range",
            unit, start
        ))
    })
}

/// Truncate an instant to the start of its second
pub fn start_of_second(instant: DateTime<Utc>) -> TemporalResult<DateTime<Utc>> {
    instant
        .with_nanosecond(0)
        .ok_or_else(|| truncation_error(instant, AlignedUnit::Second))
}

/// Truncate an instant to the start of its minute
pub fn start_of_minute(instant: DateTime<Utc>) -> TemporalResult<DateTime<Utc>> {
    instant
        .with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .ok_or_else(|| truncation_error(instant, AlignedUnit::Minute))
}

/// Truncate an instant to the start of its hour
pub fn start_of_hour(instant: DateTime<Utc>) -> TemporalResult<DateTime<Utc>> {
    instant
        .with_minute(0)
        .and_then(|t| t.with_second(0))
        .and_then(|t| t.with_nanosecond(0))
        .ok_or_else(|| truncation_error(instant, AlignedUnit::Hour))
}

/// Truncate an instant to midnight of its day
pub fn start_of_day(instant: DateTime<Utc>) -> TemporalResult<DateTime<Utc>> {
    Utc.with_ymd_and_hms(instant.year(), instant.month(), instant.day(), 0, 0, 0)
        .single()
        .ok_or_else(|| truncation_error(instant, AlignedUnit::Day))
}

/// Truncate an instant to Monday 00:00:00 of its week
pub fn start_of_week(instant: DateTime<Utc>) -> TemporalResult<DateTime<Utc>> {
    let days_from_monday = instant.weekday().num_days_from_monday();
    let monday = instant
        .checked_sub_signed(ChronoDuration::days(days_from_monday as i64))
        .ok_or_else(|| truncation_error(instant, AlignedUnit::Week))?;

    start_of_day(monday)
}

/// Truncate an instant to the first day of its month
pub fn start_of_month(instant: DateTime<Utc>) -> TemporalResult<DateTime<Utc>> {
    Utc.with_ymd_and_hms(instant.year(), instant.month(), 1, 0, 0, 0)
        .single()
        .ok_or_else(|| truncation_error(instant, AlignedUnit::Month))
}

/// Truncate an instant to January 1 of its year
pub fn start_of_year(instant: DateTime<Utc>) -> TemporalResult<DateTime<Utc>> {
    Utc.with_ymd_and_hms(instant.year(), 1, 1, 0, 0, 0)
        .single()
        .ok_or_else(|| truncation_error(instant, AlignedUnit::Year))
}

fn truncation_error(instant: DateTime<Utc>, unit: AlignedUnit) -> TemporalError {
    TemporalError::out_of_range(format!(
        "Cannot truncate {} to the start of its {}",
        instant, unit
    ))
}

/// Get the decade-within-century marker of a year
///
/// Returns the 0-90 marker, so 1996 maps to 90 and 2005 maps to 0.
pub fn decade_of_year(year: i32) -> i32 {
    let year_of_century = year % 100;
    year_of_century - (year_of_century % 10)
}

/// Get the decade-within-century marker of an instant's year
pub fn decade_of(instant: &DateTime<Utc>) -> i32 {
    decade_of_year(instant.year())
}
