//! Bucket housekeeping on top of an S3-compatible object store
//!
//! This module provides the client abstraction for talking to the store,
//! metadata types for buckets and objects, and a service exposing listing,
//! sizing, and deletion operations scoped by key patterns and time windows.

mod client;
mod error;
mod info;
mod service;
mod util;

pub use client::{ObjectStore, S3ObjectStore};
pub use error::{BucketError, BucketResult};
pub use info::{BucketInfo, ObjectInfo};
pub use service::{BucketDeletion, BucketService};
pub use util::{ensure_directory_key, is_directory_key, is_file_key, object_keys};

/// Delimiter that terminates directory keys
pub(crate) const DIRECTORY_DELIMITER: char = '/';

/// Upper bound on keys per delete request imposed by the store API
pub(crate) const MAX_DELETE_BATCH: usize = 1000;
