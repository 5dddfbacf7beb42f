//! # almanac_rs
//!
//! Calendar-relative time arithmetic and bucket housekeeping for
//! S3-compatible object stores.
//!
//! The core is a pure engine over UTC instants: shifting by granularities
//! from nanoseconds through millennia, computing aligned last/next/past
//! periods (weeks start Monday 00:00:00), and scaling quantities between
//! storage units (byte through brontobyte, powers of 1024). On top of it
//! sits an async delegation layer that lists, sizes, and sweeps bucket
//! contents by prefix, suffix, pattern, and modification time.
//!
//! ## Features
//!
//! - **Instant shifts**: fixed-duration units applied exactly; month and
//!   year family shifts follow calendar lengths with end-of-month clamping.
//! - **Aligned periods**: half-open `[start, end)` windows for the previous
//!   and next whole second/minute/hour/day/week/month/trimester/semester/year,
//!   plus rolling "past X" windows anchored at the reference instant.
//! - **Storage unit scaling**: ordinal-distance conversion between the ten
//!   capacity units.
//! - **Bucket housekeeping**: async listing/deletion/sizing over an
//!   [`ObjectStore`] trait with an AWS S3 implementation.
//!
//! ## Example
//!
//! ```rust
//! use almanac_rs::prelude::*;
//! use chrono::{TimeZone, Utc};
//!
//! let reference = Utc.with_ymd_and_hms(1996, 4, 18, 9, 30, 45).unwrap();
//!
//! // Two whole weeks back from the reference instant
//! let shifted = shift(reference, 2, Granularity::Week, Direction::Past).unwrap();
//! assert_eq!(shifted, Utc.with_ymd_and_hms(1996, 4, 4, 9, 30, 45).unwrap());
//!
//! // The previous whole week runs Monday to Monday
//! let week = last_period(reference, AlignedUnit::Week).unwrap();
//! assert_eq!(week.start(), Utc.with_ymd_and_hms(1996, 4, 8, 0, 0, 0).unwrap());
//! assert_eq!(week.end(), Utc.with_ymd_and_hms(1996, 4, 15, 0, 0, 0).unwrap());
//!
//! // One gigabyte expressed in kilobytes
//! let kilobytes = convert(1.0, StorageUnit::Gigabyte, StorageUnit::Kilobyte).unwrap();
//! assert_eq!(kilobytes, 1024.0 * 1024.0);
//! ```

pub mod bucket;
pub mod clock;
pub mod config;
pub mod error;
pub mod metrics;
pub mod storage;
pub mod temporal;

// Re-export commonly used types at the crate root
pub use bucket::{
    BucketDeletion, BucketError, BucketInfo, BucketResult, BucketService, ObjectInfo, ObjectStore,
    S3ObjectStore,
};
pub use clock::{Almanac, Clock, FixedClock, SystemClock};
pub use config::StoreConfig;
pub use error::{Error, Result};
pub use metrics::{MetricsCollector, MetricsSnapshot};
pub use storage::{convert, ConversionError, ConversionResult, StorageUnit};
pub use temporal::{
    decade_of, decade_of_year, last_period, next_period, past_period, shift, AlignedUnit,
    Direction, Granularity, Period, TemporalError, TemporalResult,
};

/// Prelude module for convenient imports.
///
/// ```
/// use almanac_rs::prelude::*;
/// ```
pub mod prelude {
    pub use crate::bucket::{BucketDeletion, BucketService, ObjectStore, S3ObjectStore};
    pub use crate::clock::{Almanac, Clock, FixedClock, SystemClock};
    pub use crate::config::StoreConfig;
    pub use crate::error::{Error, Result};
    pub use crate::storage::{convert, StorageUnit};
    pub use crate::temporal::{
        decade_of, decade_of_year, last_period, next_period, past_period, shift, AlignedUnit,
        Direction, Granularity, Period,
    };
}
