//! Object key helpers
//!
//! Utility functions for classifying object keys. Keys ending with the
//! directory delimiter denote directories; everything else is a file.

use crate::bucket::{BucketError, BucketResult, ObjectInfo, DIRECTORY_DELIMITER};

/// Check if a key denotes a directory
pub fn is_directory_key(key: &str) -> bool {
    key.ends_with(DIRECTORY_DELIMITER)
}

/// Check if a key denotes a file
pub fn is_file_key(key: &str) -> bool {
    !key.is_empty() && !is_directory_key(key)
}

/// Validate that a key denotes a directory
///
/// Directory-scoped operations validate their key before touching the
/// store; a non-directory key fails with an invalid path error.
pub fn ensure_directory_key(key: &str) -> BucketResult<&str> {
    if is_directory_key(key) {
        Ok(key)
    } else {
        Err(BucketError::invalid_directory_path(key))
    }
}

/// Collect the keys of a slice of object records
pub fn object_keys(objects: &[ObjectInfo]) -> Vec<String> {
    objects.iter().map(|object| object.key.clone()).collect()
}
