//! Clock abstraction and the now-relative convenience facade
//!
//! The temporal engine works on explicit instants only. Callers that want
//! windows relative to "now" go through [`Almanac`], which reads a [`Clock`]
//! once per call and hands the reading to the pure engine. Tests and replay
//! tooling substitute [`FixedClock`] to pin the reading.

use chrono::{DateTime, Utc};

use crate::temporal::{
    decade_of, last_period, next_period, past_period, shift, AlignedUnit, Direction,
    Granularity, Period, TemporalResult,
};

/// Source of the current instant
pub trait Clock: Send + Sync {
    /// Read the current instant
    fn now(&self) -> DateTime<Utc>;
}

/// Clock backed by the system time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock that always reads the same instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Now-relative view of the temporal engine
///
/// Holds a clock and forwards each call to the corresponding pure function
/// with a fresh clock reading as the reference instant.
#[derive(Debug, Clone)]
pub struct Almanac<C: Clock = SystemClock> {
    clock: C,
}

impl Almanac<SystemClock> {
    /// Create an almanac reading the system clock
    pub fn system() -> Self {
        Self { clock: SystemClock }
    }
}

impl Default for Almanac<SystemClock> {
    fn default() -> Self {
        Self::system()
    }
}

impl<C: Clock> Almanac<C> {
    /// Create an almanac reading the given clock
    pub fn with_clock(clock: C) -> Self {
        Self { clock }
    }

    /// Read the underlying clock
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Shift the current instant by a whole number of granularity units
    pub fn shift_from_now(
        &self,
        amount: u32,
        unit: Granularity,
        direction: Direction,
    ) -> TemporalResult<DateTime<Utc>> {
        shift(self.clock.now(), amount, unit, direction)
    }

    /// Get the rolling window ending now
    pub fn past_period(&self, unit: AlignedUnit) -> TemporalResult<Period> {
        past_period(self.clock.now(), unit)
    }

    /// Get the previous whole unit before now
    pub fn last_period(&self, unit: AlignedUnit) -> TemporalResult<Period> {
        last_period(self.clock.now(), unit)
    }

    /// Get the next whole unit after now
    pub fn next_period(&self, unit: AlignedUnit) -> TemporalResult<Period> {
        next_period(self.clock.now(), unit)
    }

    /// Get the decade-within-century marker of the current year
    pub fn current_decade(&self) -> i32 {
        decade_of(&self.clock.now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_reference() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(1996, 4, 18, 9, 30, 45).unwrap()
    }

    #[test]
    fn test_fixed_clock_pins_the_reading() {
        let almanac = Almanac::with_clock(FixedClock(fixed_reference()));

        assert_eq!(almanac.now(), fixed_reference());
        assert_eq!(almanac.now(), fixed_reference());
    }

    #[test]
    fn test_almanac_forwards_to_the_engine() -> TemporalResult<()> {
        let reference = fixed_reference();
        let almanac = Almanac::with_clock(FixedClock(reference));

        assert_eq!(
            almanac.shift_from_now(2, Granularity::Week, Direction::Past)?,
            shift(reference, 2, Granularity::Week, Direction::Past)?
        );
        assert_eq!(
            almanac.past_period(AlignedUnit::Hour)?,
            past_period(reference, AlignedUnit::Hour)?
        );
        assert_eq!(
            almanac.last_period(AlignedUnit::Week)?,
            last_period(reference, AlignedUnit::Week)?
        );
        assert_eq!(
            almanac.next_period(AlignedUnit::Month)?,
            next_period(reference, AlignedUnit::Month)?
        );
        assert_eq!(almanac.current_decade(), 90);

        Ok(())
    }

    #[test]
    fn test_system_clock_advances() {
        let clock = SystemClock;
        let first = clock.now();
        let second = clock.now();

        assert!(second >= first);
    }
}
