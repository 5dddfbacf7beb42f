//! Error types for the bucket module
//!
//! Defines error types specific to object-store calls and housekeeping
//! operations.

use thiserror::Error;

use crate::storage::ConversionError;
use crate::temporal::TemporalError;

/// Errors that can occur during bucket operations
#[derive(Error, Debug)]
pub enum BucketError {
    /// Error when a directory-scoped operation receives a non-directory key
    #[error("Invalid directory path {0:?}: directory keys end with '/'")]
    InvalidDirectoryPath(String),

    /// Error when a key pattern fails to compile
    #[error("Invalid key pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// Error returned by the object-store API
    #[error("Object store {operation} failed for {target}: {message}")]
    Api {
        operation: String,
        target: String,
        message: String,
    },

    /// Error after the retry budget for a call is spent
    #[error("Object store {operation} failed for {target} after {attempts} attempts: {message}")]
    RetriesExhausted {
        operation: String,
        target: String,
        attempts: u32,
        message: String,
    },

    /// Temporal computation error
    #[error("Time error: {0}")]
    Temporal(#[from] TemporalError),

    /// Storage-unit conversion error
    #[error("Storage unit error: {0}")]
    Conversion(#[from] ConversionError),
}

/// Result type for bucket operations
pub type BucketResult<T> = std::result::Result<T, BucketError>;

impl BucketError {
    /// Create a new invalid directory path error
    pub fn invalid_directory_path(path: impl Into<String>) -> Self {
        Self::InvalidDirectoryPath(path.into())
    }

    /// Create a new API error
    pub fn api(
        operation: impl Into<String>,
        target: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Api {
            operation: operation.into(),
            target: target.into(),
            message: message.into(),
        }
    }

    /// Create a new retries exhausted error
    pub fn retries_exhausted(
        operation: impl Into<String>,
        target: impl Into<String>,
        attempts: u32,
        message: impl Into<String>,
    ) -> Self {
        Self::RetriesExhausted {
            operation: operation.into(),
            target: target.into(),
            attempts,
            message: message.into(),
        }
    }

    /// Check if this is an invalid directory path error
    pub fn is_invalid_directory_path(&self) -> bool {
        matches!(self, Self::InvalidDirectoryPath(_))
    }

    /// Check if this is a pattern error
    pub fn is_pattern(&self) -> bool {
        matches!(self, Self::Pattern(_))
    }

    /// Check if this error came back from the object-store API
    pub fn is_api(&self) -> bool {
        matches!(self, Self::Api { .. } | Self::RetriesExhausted { .. })
    }

    /// Check if this is a temporal error
    pub fn is_temporal(&self) -> bool {
        matches!(self, Self::Temporal(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_error_creation() {
        let err = BucketError::invalid_directory_path("logs/2023");
        assert!(err.is_invalid_directory_path());
        assert_eq!(
            err.to_string(),
            "Invalid directory path \"logs/2023\": directory keys end with '/'"
        );

        let err = BucketError::api("ListObjectsV2", "archive", "access denied");
        assert!(err.is_api());
        assert!(!err.is_invalid_directory_path());

        let err = BucketError::retries_exhausted("DeleteBucket", "archive", 3, "timed out");
        assert!(err.is_api());
        assert!(err.to_string().contains("after 3 attempts"));
    }

    #[test]
    fn test_bucket_error_from_temporal() {
        let temporal = TemporalError::unsupported_granularity("fortnight");
        let err = BucketError::from(temporal);

        assert!(err.is_temporal());
        assert!(matches!(err, BucketError::Temporal(_)));
    }

    #[test]
    fn test_bucket_error_from_conversion() {
        let conversion =
            ConversionError::SameStorageUnit(crate::storage::StorageUnit::Byte);
        let err = BucketError::from(conversion);

        assert!(matches!(err, BucketError::Conversion(_)));
    }
}
