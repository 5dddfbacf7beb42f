//! Error handling for the almanac crate
//!
//! This module provides the crate-wide error type and result alias. Each
//! module carries its own narrower error; all of them convert into this one.

use thiserror::Error;

use crate::bucket::BucketError;
use crate::storage::ConversionError;
use crate::temporal::TemporalError;

/// Errors that can occur in almanac operations
#[derive(Error, Debug)]
pub enum Error {
    /// Errors from instant and period arithmetic
    #[error("Time error: {0}")]
    Temporal(#[from] TemporalError),

    /// Errors from storage unit conversion
    #[error("Storage unit error: {0}")]
    Conversion(#[from] ConversionError),

    /// Errors from bucket operations
    #[error("Bucket error: {0}")]
    Bucket(#[from] BucketError),

    /// Errors related to configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error type for other cases
    #[error("{0}")]
    Other(String),
}

/// Result type for almanac operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a new configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a new generic error
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other(message.into())
    }

    /// Check if this is a temporal error
    pub fn is_temporal_error(&self) -> bool {
        matches!(self, Self::Temporal(_))
    }

    /// Check if this is a storage conversion error
    pub fn is_conversion_error(&self) -> bool {
        matches!(self, Self::Conversion(_))
    }

    /// Check if this is a bucket error
    pub fn is_bucket_error(&self) -> bool {
        matches!(self, Self::Bucket(_))
    }

    /// Check if this is a configuration error
    pub fn is_config_error(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Get a user-friendly suggestion for resolving the error
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::Config(_) => Some("Check the store configuration values".to_string()),
            Self::Bucket(BucketError::InvalidDirectoryPath(_)) => {
                Some("Directory paths must end with '/'".to_string())
            }
            Self::Bucket(BucketError::RetriesExhausted { .. }) => {
                Some("Check connectivity to the object store endpoint".to_string())
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::StorageUnit;

    #[test]
    fn test_error_creation() {
        let config_err = Error::config("Region must not be empty");
        assert!(matches!(config_err, Error::Config(_)));
        assert!(config_err.is_config_error());

        let other_err = Error::other("something went sideways");
        assert!(matches!(other_err, Error::Other(_)));
    }

    #[test]
    fn test_error_conversion() {
        let temporal_err = Error::from(TemporalError::unsupported_granularity("eon"));
        assert!(temporal_err.is_temporal_error());

        let conversion_err = Error::from(ConversionError::SameStorageUnit(StorageUnit::Byte));
        assert!(conversion_err.is_conversion_error());

        let bucket_err = Error::from(BucketError::invalid_directory_path("logs/app"));
        assert!(bucket_err.is_bucket_error());
    }

    #[test]
    fn test_error_display_prefixes() {
        let err = Error::from(TemporalError::unsupported_granularity("eon"));
        assert!(err.to_string().starts_with("Time error:"));

        let err = Error::config("bad value");
        assert_eq!(err.to_string(), "Configuration error: bad value");
    }

    #[test]
    fn test_error_suggestion() {
        let err = Error::from(BucketError::invalid_directory_path("logs/app"));
        assert!(err.suggestion().unwrap().contains("'/'"));

        let err = Error::config("bad value");
        assert!(err.suggestion().is_some());

        let err = Error::other("no hint for this one");
        assert!(err.suggestion().is_none());
    }
}
