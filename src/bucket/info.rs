//! Listing records returned by the object-store client
//!
//! Thin, owned views of the provider's object and bucket metadata, carrying
//! only what the housekeeping operations filter on.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::bucket::util;
use crate::temporal::Period;

/// Metadata for one stored object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectInfo {
    /// Object key
    pub key: String,
    /// Object size in bytes
    pub size_bytes: u64,
    /// Instant the object was last modified
    pub last_modified: DateTime<Utc>,
}

impl ObjectInfo {
    /// Create a new object record
    pub fn new(
        key: impl Into<String>,
        size_bytes: u64,
        last_modified: DateTime<Utc>,
    ) -> Self {
        Self {
            key: key.into(),
            size_bytes,
            last_modified,
        }
    }

    /// Check if the object represents a directory
    pub fn is_directory(&self) -> bool {
        util::is_directory_key(&self.key)
    }

    /// Check if the object represents a file
    pub fn is_file(&self) -> bool {
        util::is_file_key(&self.key)
    }

    /// Check if the object was last modified strictly before an instant
    pub fn modified_before(&self, cutoff: &DateTime<Utc>) -> bool {
        self.last_modified < *cutoff
    }

    /// Check if the object was last modified strictly after an instant
    pub fn modified_after(&self, cutoff: &DateTime<Utc>) -> bool {
        self.last_modified > *cutoff
    }

    /// Check if the object was last modified within a half-open period
    pub fn modified_in(&self, period: &Period) -> bool {
        period.contains(&self.last_modified)
    }
}

/// Metadata for one bucket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketInfo {
    /// Bucket name
    pub name: String,
    /// Instant the bucket was created, when the provider reports one
    pub created_at: Option<DateTime<Utc>>,
}

impl BucketInfo {
    /// Create a new bucket record
    pub fn new(name: impl Into<String>, created_at: Option<DateTime<Utc>>) -> Self {
        Self {
            name: name.into(),
            created_at,
        }
    }

    /// Check if the bucket was created strictly before an instant
    ///
    /// Buckets without a reported creation instant never match.
    pub fn created_before(&self, cutoff: &DateTime<Utc>) -> bool {
        matches!(self.created_at, Some(created) if created < *cutoff)
    }

    /// Check if the bucket was created strictly after an instant
    pub fn created_after(&self, cutoff: &DateTime<Utc>) -> bool {
        matches!(self.created_at, Some(created) if created > *cutoff)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn instant(year: i32, month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_object_info_key_kinds() {
        let directory = ObjectInfo::new("logs/1996/", 0, instant(1996, 4, 18));
        assert!(directory.is_directory());
        assert!(!directory.is_file());

        let file = ObjectInfo::new("logs/1996/april.log", 2048, instant(1996, 4, 18));
        assert!(file.is_file());
        assert!(!file.is_directory());
    }

    #[test]
    fn test_object_info_modification_filters() {
        let object = ObjectInfo::new("logs/april.log", 2048, instant(1996, 4, 18));
        let cutoff = instant(1996, 5, 1);

        assert!(object.modified_before(&cutoff));
        assert!(!object.modified_after(&cutoff));

        // Boundary equality matches neither strict filter
        let boundary = object.last_modified;
        assert!(!object.modified_before(&boundary));
        assert!(!object.modified_after(&boundary));

        let april = Period::new(instant(1996, 4, 1), instant(1996, 5, 1)).unwrap();
        let may = Period::new(instant(1996, 5, 1), instant(1996, 6, 1)).unwrap();
        assert!(object.modified_in(&april));
        assert!(!object.modified_in(&may));
    }

    #[test]
    fn test_bucket_info_creation_filters() {
        let bucket = BucketInfo::new("archive", Some(instant(1996, 4, 18)));
        assert!(bucket.created_before(&instant(1996, 5, 1)));
        assert!(bucket.created_after(&instant(1996, 4, 1)));
        assert!(!bucket.created_before(&instant(1996, 4, 18)));

        let undated = BucketInfo::new("unknown", None);
        assert!(!undated.created_before(&instant(2100, 1, 1)));
        assert!(!undated.created_after(&instant(1900, 1, 1)));
    }
}
