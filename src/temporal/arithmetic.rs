//! Instant shifting across fixed and calendar-relative granularities
//!
//! Shifts are exact flat-duration arithmetic for the fixed units and
//! calendar-aware arithmetic for weeks, months, years and their multiples.
//! Month and year shifts clamp the day-of-month when the target month is
//! shorter, so round-trips across month-length boundaries are not guaranteed.

use chrono::{DateTime, Duration as ChronoDuration, Months, Utc};

use crate::temporal::{Granularity, TemporalError, TemporalResult};

const DAYS_PER_WEEK: i64 = 7;
const MONTHS_PER_YEAR: u32 = 12;
const YEARS_PER_DECADE: u32 = 10;
const YEARS_PER_CENTURY: u32 = 100;
const YEARS_PER_MILLENNIUM: u32 = 1000;

/// Direction of a shift relative to the reference instant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Shift toward earlier instants
    Past,
    /// Shift toward later instants
    Future,
}

impl Direction {
    /// Check if the shift moves toward earlier instants
    pub fn is_past(&self) -> bool {
        matches!(self, Self::Past)
    }
}

/// Shift an instant by a whole number of granularity units
///
/// The amount is unsigned; the sign of the shift is carried by `direction`.
/// A zero amount returns the reference unchanged. Arithmetic that leaves
/// the representable time range fails with an out of range error.
pub fn shift(
    reference: DateTime<Utc>,
    amount: u32,
    unit: Granularity,
    direction: Direction,
) -> TemporalResult<DateTime<Utc>> {
    if let Some(unit_nanos) = unit.fixed_duration_nanos() {
        let total_nanos = (amount as i64).checked_mul(unit_nanos).ok_or_else(|| {
            TemporalError::out_of_range(format!(
                "Shift of {} {}s overflows the flat duration range",
                amount, unit
            ))
        })?;
        return apply_duration(reference, ChronoDuration::nanoseconds(total_nanos), direction);
    }

    match unit {
        Granularity::Week => apply_duration(
            reference,
            ChronoDuration::days(amount as i64 * DAYS_PER_WEEK),
            direction,
        ),
        Granularity::Month => shift_months(reference, amount, direction),
        Granularity::Year => shift_whole_years(reference, amount, 1, direction),
        Granularity::Decade => shift_whole_years(reference, amount, YEARS_PER_DECADE, direction),
        Granularity::Century => shift_whole_years(reference, amount, YEARS_PER_CENTURY, direction),
        Granularity::Millennium => {
            shift_whole_years(reference, amount, YEARS_PER_MILLENNIUM, direction)
        }
        other => Err(TemporalError::unsupported_granularity(other.name())),
    }
}

/// Shift an instant by whole calendar months, clamping the day-of-month
/// when the target month is shorter
pub(crate) fn shift_months(
    reference: DateTime<Utc>,
    months: u32,
    direction: Direction,
) -> TemporalResult<DateTime<Utc>> {
    let span = Months::new(months);
    let shifted = match direction {
        Direction::Future => reference.checked_add_months(span),
        Direction::Past => reference.checked_sub_months(span),
    };

    shifted.ok_or_else(|| {
        TemporalError::out_of_range(format!(
            "Shift of {} months from {} leaves the supported date range",
            months, reference
        ))
    })
}

fn shift_whole_years(
    reference: DateTime<Utc>,
    amount: u32,
    years_per_unit: u32,
    direction: Direction,
) -> TemporalResult<DateTime<Utc>> {
    let months = amount
        .checked_mul(years_per_unit)
        .and_then(|years| years.checked_mul(MONTHS_PER_YEAR))
        .ok_or_else(|| {
            TemporalError::out_of_range(format!(
                "Shift amount {} overflows the calendar month range",
                amount
            ))
        })?;

    shift_months(reference, months, direction)
}

fn apply_duration(
    reference: DateTime<Utc>,
    span: ChronoDuration,
    direction: Direction,
) -> TemporalResult<DateTime<Utc>> {
    let shifted = match direction {
        Direction::Future => reference.checked_add_signed(span),
        Direction::Past => reference.checked_sub_signed(span),
    };

    shifted.ok_or_else(|| {
        TemporalError::out_of_range(format!(
            "Shift of {} from {} leaves the supported date range",
            span, reference
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;

    fn instant(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
    ) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, hour, minute, second)
            .unwrap()
    }

    #[test]
    fn test_shift_zero_amount_is_identity() -> TemporalResult<()> {
        let reference = instant(1996, 4, 18, 22, 0, 0);

        for unit in Granularity::all() {
            assert_eq!(shift(reference, 0, unit, Direction::Past)?, reference);
            assert_eq!(shift(reference, 0, unit, Direction::Future)?, reference);
        }

        Ok(())
    }

    #[test]
    fn test_shift_subsecond_units() -> TemporalResult<()> {
        let reference = instant(1996, 4, 18, 22, 0, 0);

        // One million nanoseconds, two thousand microseconds and five
        // milliseconds are each exact sub-second offsets
        let shifted = shift(reference, 1_000_000, Granularity::Nanosecond, Direction::Past)?;
        assert_eq!(reference.signed_duration_since(shifted), ChronoDuration::milliseconds(1));

        let shifted = shift(reference, 2_000, Granularity::Microsecond, Direction::Future)?;
        assert_eq!(shifted.signed_duration_since(reference), ChronoDuration::milliseconds(2));

        let shifted = shift(reference, 5, Granularity::Millisecond, Direction::Past)?;
        assert_eq!(reference.signed_duration_since(shifted), ChronoDuration::milliseconds(5));

        Ok(())
    }

    #[test]
    fn test_shift_fixed_units() -> TemporalResult<()> {
        let reference = instant(1996, 4, 18, 22, 0, 0);

        assert_eq!(
            shift(reference, 30, Granularity::Second, Direction::Past)?,
            instant(1996, 4, 18, 21, 59, 30)
        );
        assert_eq!(
            shift(reference, 90, Granularity::Minute, Direction::Future)?,
            instant(1996, 4, 18, 23, 30, 0)
        );
        assert_eq!(
            shift(reference, 23, Granularity::Hour, Direction::Past)?,
            instant(1996, 4, 17, 23, 0, 0)
        );
        // Two half-days make one whole day
        assert_eq!(
            shift(reference, 2, Granularity::HalfDay, Direction::Past)?,
            shift(reference, 1, Granularity::Day, Direction::Past)?
        );
        assert_eq!(
            shift(reference, 3, Granularity::Day, Direction::Future)?,
            instant(1996, 4, 21, 22, 0, 0)
        );

        Ok(())
    }

    #[test]
    fn test_shift_weeks() -> TemporalResult<()> {
        let reference = instant(1996, 4, 18, 22, 0, 0);

        assert_eq!(
            shift(reference, 2, Granularity::Week, Direction::Past)?,
            instant(1996, 4, 4, 22, 0, 0)
        );
        assert_eq!(
            shift(reference, 2, Granularity::Week, Direction::Future)?,
            instant(1996, 5, 2, 22, 0, 0)
        );

        Ok(())
    }

    #[test]
    fn test_shift_months_preserves_day_where_possible() -> TemporalResult<()> {
        let reference = instant(1996, 4, 18, 22, 0, 0);

        assert_eq!(
            shift(reference, 2, Granularity::Month, Direction::Past)?,
            instant(1996, 2, 18, 22, 0, 0)
        );
        assert_eq!(
            shift(reference, 9, Granularity::Month, Direction::Future)?,
            instant(1997, 1, 18, 22, 0, 0)
        );

        Ok(())
    }

    #[test]
    fn test_shift_months_clamps_short_target_month() -> TemporalResult<()> {
        // 1996 is a leap year, so January 31 clamps to February 29
        let end_of_january = instant(1996, 1, 31, 12, 0, 0);
        let shifted = shift(end_of_january, 1, Granularity::Month, Direction::Future)?;
        assert_eq!(shifted, instant(1996, 2, 29, 12, 0, 0));

        // The round trip does not return to January 31
        let back = shift(shifted, 1, Granularity::Month, Direction::Past)?;
        assert_eq!(back, instant(1996, 1, 29, 12, 0, 0));

        Ok(())
    }

    #[test]
    fn test_shift_years_and_multiples() -> TemporalResult<()> {
        let reference = instant(1996, 4, 18, 22, 0, 0);

        assert_eq!(
            shift(reference, 3, Granularity::Year, Direction::Past)?,
            instant(1993, 4, 18, 22, 0, 0)
        );
        assert_eq!(
            shift(reference, 1, Granularity::Decade, Direction::Past)?,
            instant(1986, 4, 18, 22, 0, 0)
        );
        assert_eq!(
            shift(reference, 1, Granularity::Century, Direction::Future)?,
            instant(2096, 4, 18, 22, 0, 0)
        );
        assert_eq!(
            shift(reference, 1, Granularity::Millennium, Direction::Past)?,
            instant(996, 4, 18, 22, 0, 0)
        );

        Ok(())
    }

    #[test]
    fn test_shift_leap_day_year_clamp() -> TemporalResult<()> {
        let leap_day = instant(1996, 2, 29, 0, 0, 0);

        // 1997 has no February 29, so the year shift clamps to the 28th
        assert_eq!(
            shift(leap_day, 1, Granularity::Year, Direction::Future)?,
            instant(1997, 2, 28, 0, 0, 0)
        );
        // 2000 is a leap year again
        assert_eq!(
            shift(leap_day, 4, Granularity::Year, Direction::Future)?,
            instant(2000, 2, 29, 0, 0, 0)
        );

        Ok(())
    }

    #[test]
    fn test_shift_out_of_range() {
        let reference = instant(1996, 4, 18, 22, 0, 0);

        let err = shift(reference, u32::MAX, Granularity::Millennium, Direction::Future)
            .unwrap_err();
        assert!(err.is_out_of_range());

        let err = shift(reference, 1_000_000, Granularity::Year, Direction::Future).unwrap_err();
        assert!(err.is_out_of_range());
    }

    #[test]
    fn test_direction_predicate() {
        assert!(Direction::Past.is_past());
        assert!(!Direction::Future.is_past());
    }

    prop_compose! {
        fn arb_instant()(
            secs in 0i64..4_102_444_800,
            nanos in 0u32..1_000_000_000,
        ) -> DateTime<Utc> {
            Utc.timestamp_opt(secs, nanos).unwrap()
        }
    }

    prop_compose! {
        fn arb_day_safe_instant()(
            year in 1970i32..2100,
            month in 1u32..=12,
            day in 1u32..=28,
            hour in 0u32..24,
            minute in 0u32..60,
            second in 0u32..60,
        ) -> DateTime<Utc> {
            Utc.with_ymd_and_hms(year, month, day, hour, minute, second).unwrap()
        }
    }

    proptest! {
        #[test]
        fn prop_fixed_unit_round_trip(
            reference in arb_instant(),
            amount in 0u32..100_000,
        ) {
            let fixed_units = [
                Granularity::Nanosecond,
                Granularity::Microsecond,
                Granularity::Millisecond,
                Granularity::Second,
                Granularity::Minute,
                Granularity::Hour,
                Granularity::HalfDay,
                Granularity::Day,
            ];

            for unit in fixed_units {
                let forward = shift(reference, amount, unit, Direction::Future).unwrap();
                let back = shift(forward, amount, unit, Direction::Past).unwrap();
                prop_assert_eq!(back, reference);
            }
        }

        #[test]
        fn prop_week_round_trip(
            reference in arb_instant(),
            amount in 0u32..10_000,
        ) {
            let forward = shift(reference, amount, Granularity::Week, Direction::Future).unwrap();
            let back = shift(forward, amount, Granularity::Week, Direction::Past).unwrap();
            prop_assert_eq!(back, reference);
        }

        // Calendar round trips hold away from variable-length month edges,
        // so day-of-month is capped at 28 here
        #[test]
        fn prop_calendar_round_trip_day_at_most_28(
            reference in arb_day_safe_instant(),
            amount in 0u32..48,
        ) {
            for unit in [Granularity::Month, Granularity::Year] {
                let forward = shift(reference, amount, unit, Direction::Future).unwrap();
                let back = shift(forward, amount, unit, Direction::Past).unwrap();
                prop_assert_eq!(back, reference);
            }
        }
    }
}
