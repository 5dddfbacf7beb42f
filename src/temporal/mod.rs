//! Calendar-relative instant and period computation
//!
//! This module shifts UTC instants by whole granularity units, computes
//! rolling and calendar-aligned windows around a reference instant, and
//! carries the half-open [`Period`] type those computations produce. All
//! operations are pure functions of their inputs; nothing here reads the
//! ambient clock or performs I/O.

mod arithmetic;
mod error;
mod granularity;
mod period;
mod window;

pub use arithmetic::{shift, Direction};
pub use error::{TemporalError, TemporalResult};
pub use granularity::Granularity;
pub use period::Period;
pub use window::{
    decade_of, decade_of_year, last_period, next_period, past_period, start_of_day,
    start_of_hour, start_of_minute, start_of_month, start_of_second, start_of_week,
    start_of_year, AlignedUnit,
};
