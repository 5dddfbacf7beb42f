//! Configuration for the object-store client and bucket service
//!
//! This module provides configuration options for connecting to the object
//! store and for the housekeeping service built on top of it.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::bucket::MAX_DELETE_BATCH;
use crate::error::{Error, Result};

/// Configuration options for the object store
#[derive(Debug, Clone, Serialize, Deserialize)]
#[non_exhaustive]
pub struct StoreConfig {
    // Connection settings
    /// Region the client talks to
    pub region: String,
    /// Custom endpoint URL, for S3-compatible stores
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint_url: Option<String>,
    /// Whether to address buckets by path rather than virtual host
    pub force_path_style: bool,

    // Retry policy
    /// Maximum number of attempts per API call
    pub max_retries: u32,
    /// Base delay between attempts; doubles per attempt
    pub retry_base_delay_ms: u64,

    // Deletion settings
    /// Number of keys per delete request
    pub delete_batch_size: usize,

    // Observability
    /// Enable metrics collection
    pub collect_metrics: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            // Connection settings
            region: "us-east-1".to_string(),
            endpoint_url: None,
            force_path_style: false,

            // Retry policy
            max_retries: 3,
            retry_base_delay_ms: 100,

            // Deletion settings
            delete_batch_size: MAX_DELETE_BATCH,

            // Observability
            collect_metrics: true,
        }
    }
}

impl StoreConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the region
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    /// Set a custom endpoint URL
    pub fn with_endpoint_url(mut self, url: impl Into<String>) -> Self {
        self.endpoint_url = Some(url.into());
        self
    }

    /// Set whether to address buckets by path rather than virtual host
    pub fn with_force_path_style(mut self, force: bool) -> Self {
        self.force_path_style = force;
        self
    }

    /// Set the maximum number of attempts per API call
    pub fn with_max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Set the base delay between attempts in milliseconds
    pub fn with_retry_base_delay_ms(mut self, millis: u64) -> Self {
        self.retry_base_delay_ms = millis;
        self
    }

    /// Set the number of keys per delete request
    pub fn with_delete_batch_size(mut self, size: usize) -> Self {
        self.delete_batch_size = size;
        self
    }

    /// Set whether to collect metrics
    pub fn with_collect_metrics(mut self, collect: bool) -> Self {
        self.collect_metrics = collect;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.region.trim().is_empty() {
            return Err(Error::config("Region must not be empty"));
        }

        if self.max_retries < 1 {
            return Err(Error::config("Retry budget must be at least 1 attempt"));
        }

        if self.max_retries > 12 {
            return Err(Error::config("Retry budget must be at most 12 attempts"));
        }

        if self.retry_base_delay_ms < 1 || self.retry_base_delay_ms > 60_000 {
            return Err(Error::config(
                "Retry base delay must be between 1ms and 60s",
            ));
        }

        if self.delete_batch_size < 1 || self.delete_batch_size > MAX_DELETE_BATCH {
            return Err(Error::config(format!(
                "Delete batch size must be between 1 and {}",
                MAX_DELETE_BATCH
            )));
        }

        Ok(())
    }

    /// Get the base retry delay as a Duration
    pub fn retry_base_delay(&self) -> Duration {
        Duration::from_millis(self.retry_base_delay_ms)
    }

    /// Create a human-readable string representation of the configuration
    pub fn to_string_pretty(&self) -> String {
        let mut result = String::new();

        result.push_str("=== Object Store Configuration ===\n\n");

        result.push_str("Connection:\n");
        result.push_str(&format!("  Region: {}\n", self.region));
        if let Some(ref endpoint) = self.endpoint_url {
            result.push_str(&format!("  Endpoint: {}\n", endpoint));
        }
        result.push_str(&format!("  Force Path Style: {}\n", self.force_path_style));

        result.push_str("\nRetry Policy:\n");
        result.push_str(&format!("  Max Retries: {}\n", self.max_retries));
        result.push_str(&format!("  Base Delay: {} ms\n", self.retry_base_delay_ms));

        result.push_str("\nDeletion:\n");
        result.push_str(&format!("  Delete Batch Size: {}\n", self.delete_batch_size));

        result.push_str("\nObservability:\n");
        result.push_str(&format!("  Collect Metrics: {}\n", self.collect_metrics));

        result
    }
}
