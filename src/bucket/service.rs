//! Bucket housekeeping operations over an [`ObjectStore`]

use std::time::Instant;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::bucket::{
    ensure_directory_key, object_keys, BucketInfo, BucketResult, ObjectInfo, ObjectStore,
    S3ObjectStore,
};
use crate::clock::{Clock, SystemClock};
use crate::config::StoreConfig;
use crate::error::Result;
use crate::metrics::MetricsCollector;
use crate::storage::{convert, StorageUnit};
use crate::temporal::{shift, Direction, Granularity, Period};

/// One request for [`BucketService::delete_buckets`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketDeletion {
    /// Bucket to delete
    pub bucket: String,
    /// Empty the bucket before deleting it
    pub force: bool,
}

impl BucketDeletion {
    /// Create a new deletion request
    pub fn new(bucket: impl Into<String>, force: bool) -> Self {
        Self {
            bucket: bucket.into(),
            force,
        }
    }
}

/// Housekeeping service over an object store
///
/// Couples the store to the temporal engine: time-scoped listings and sweeps
/// take their cutoffs from instants and periods computed against the
/// service's clock.
pub struct BucketService<S: ObjectStore> {
    store: S,
    clock: Box<dyn Clock>,
    metrics: MetricsCollector,
    collect_metrics: bool,
}

impl<S: ObjectStore> BucketService<S> {
    /// Create a service over the given store using the system clock
    pub fn new(store: S) -> Self {
        Self::with_clock(store, Box::new(SystemClock))
    }

    /// Create a service with an explicit clock
    pub fn with_clock(store: S, clock: Box<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            metrics: MetricsCollector::new(),
            collect_metrics: true,
        }
    }

    /// Create a service whose metrics toggle follows the configuration
    pub fn with_config(store: S, config: &StoreConfig) -> Self {
        Self::new(store).with_collect_metrics(config.collect_metrics)
    }

    /// Set whether to collect metrics
    pub fn with_collect_metrics(mut self, collect: bool) -> Self {
        self.collect_metrics = collect;
        self
    }

    /// Get the underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Get the metrics collector
    pub fn metrics(&self) -> &MetricsCollector {
        &self.metrics
    }

    // Listing operations

    /// List every object in the bucket
    pub async fn list_objects(&self, bucket: &str) -> BucketResult<Vec<ObjectInfo>> {
        self.list_with_prefix(bucket, None).await
    }

    /// List objects whose keys start with the given prefix
    pub async fn list_prefix_objects(
        &self,
        bucket: &str,
        prefix: &str,
    ) -> BucketResult<Vec<ObjectInfo>> {
        self.list_with_prefix(bucket, Some(prefix)).await
    }

    /// List objects whose keys end with the given suffix
    pub async fn list_suffix_objects(
        &self,
        bucket: &str,
        suffix: &str,
    ) -> BucketResult<Vec<ObjectInfo>> {
        let mut objects = self.list_objects(bucket).await?;
        objects.retain(|object| object.key.ends_with(suffix));
        Ok(objects)
    }

    /// List objects whose whole key matches the given regular expression
    ///
    /// The pattern must cover the entire key; unanchored fragments match
    /// nothing.
    pub async fn list_pattern_objects(
        &self,
        bucket: &str,
        pattern: &str,
    ) -> BucketResult<Vec<ObjectInfo>> {
        let matcher = Regex::new(&format!("^(?:{pattern})$"))?;
        let mut objects = self.list_objects(bucket).await?;
        objects.retain(|object| matcher.is_match(&object.key));
        Ok(objects)
    }

    /// List objects last modified strictly before the cutoff
    pub async fn list_objects_modified_before(
        &self,
        bucket: &str,
        cutoff: DateTime<Utc>,
    ) -> BucketResult<Vec<ObjectInfo>> {
        let mut objects = self.list_objects(bucket).await?;
        objects.retain(|object| object.modified_before(&cutoff));
        Ok(objects)
    }

    /// List objects last modified strictly after the cutoff
    pub async fn list_objects_modified_after(
        &self,
        bucket: &str,
        cutoff: DateTime<Utc>,
    ) -> BucketResult<Vec<ObjectInfo>> {
        let mut objects = self.list_objects(bucket).await?;
        objects.retain(|object| object.modified_after(&cutoff));
        Ok(objects)
    }

    /// List objects last modified within the half-open period
    pub async fn list_objects_modified_in(
        &self,
        bucket: &str,
        period: &Period,
    ) -> BucketResult<Vec<ObjectInfo>> {
        let mut objects = self.list_objects(bucket).await?;
        objects.retain(|object| object.modified_in(period));
        Ok(objects)
    }

    /// List objects last modified more than `amount` units before now
    pub async fn list_objects_older_than(
        &self,
        bucket: &str,
        amount: u32,
        unit: Granularity,
    ) -> BucketResult<Vec<ObjectInfo>> {
        let cutoff = shift(self.clock.now(), amount, unit, Direction::Past)?;
        debug!(bucket, %cutoff, "listing objects older than cutoff");
        self.list_objects_modified_before(bucket, cutoff).await
    }

    /// List every bucket
    pub async fn list_buckets(&self) -> BucketResult<Vec<BucketInfo>> {
        let started = Instant::now();
        let buckets = self.store.list_buckets().await?;

        if self.collect_metrics {
            self.metrics.increment_lists();
            self.metrics.record_list_duration(started.elapsed());
        }

        Ok(buckets)
    }

    /// List buckets created strictly before the cutoff
    pub async fn list_buckets_created_before(
        &self,
        cutoff: DateTime<Utc>,
    ) -> BucketResult<Vec<BucketInfo>> {
        let mut buckets = self.list_buckets().await?;
        buckets.retain(|bucket| bucket.created_before(&cutoff));
        Ok(buckets)
    }

    /// List buckets created strictly after the cutoff
    pub async fn list_buckets_created_after(
        &self,
        cutoff: DateTime<Utc>,
    ) -> BucketResult<Vec<BucketInfo>> {
        let mut buckets = self.list_buckets().await?;
        buckets.retain(|bucket| bucket.created_after(&cutoff));
        Ok(buckets)
    }

    // Deletion operations

    /// Delete the given keys, returning the keys the store removed
    pub async fn delete_objects(&self, bucket: &str, keys: &[String]) -> BucketResult<Vec<String>> {
        let started = Instant::now();
        let deleted = self.store.delete_objects(bucket, keys).await?;

        if self.collect_metrics {
            self.metrics.increment_deletes();
            self.metrics.add_objects_deleted(deleted.len());
            self.metrics.record_delete_duration(started.elapsed());
        }

        Ok(deleted)
    }

    /// Delete every object whose key starts with the given prefix
    pub async fn delete_prefix_objects(
        &self,
        bucket: &str,
        prefix: &str,
    ) -> BucketResult<Vec<String>> {
        let objects = self.list_prefix_objects(bucket, prefix).await?;
        self.delete_objects(bucket, &object_keys(&objects)).await
    }

    /// Delete every object under a directory key
    ///
    /// The path must name a directory, i.e. end with '/'.
    pub async fn delete_directory_objects(
        &self,
        bucket: &str,
        directory: &str,
    ) -> BucketResult<Vec<String>> {
        let directory = ensure_directory_key(directory)?;
        self.delete_prefix_objects(bucket, directory).await
    }

    /// Delete objects last modified strictly before the cutoff
    pub async fn delete_objects_modified_before(
        &self,
        bucket: &str,
        cutoff: DateTime<Utc>,
    ) -> BucketResult<Vec<String>> {
        let objects = self.list_objects_modified_before(bucket, cutoff).await?;
        debug!(bucket, %cutoff, count = objects.len(), "sweeping objects modified before cutoff");
        self.delete_objects(bucket, &object_keys(&objects)).await
    }

    /// Delete objects last modified strictly after the cutoff
    pub async fn delete_objects_modified_after(
        &self,
        bucket: &str,
        cutoff: DateTime<Utc>,
    ) -> BucketResult<Vec<String>> {
        let objects = self.list_objects_modified_after(bucket, cutoff).await?;
        debug!(bucket, %cutoff, count = objects.len(), "sweeping objects modified after cutoff");
        self.delete_objects(bucket, &object_keys(&objects)).await
    }

    /// Delete objects last modified within the half-open period
    pub async fn delete_objects_modified_in(
        &self,
        bucket: &str,
        period: &Period,
    ) -> BucketResult<Vec<String>> {
        let objects = self.list_objects_modified_in(bucket, period).await?;
        debug!(bucket, %period, count = objects.len(), "sweeping objects modified in period");
        self.delete_objects(bucket, &object_keys(&objects)).await
    }

    /// Delete every object in the bucket
    pub async fn empty_bucket(&self, bucket: &str) -> BucketResult<Vec<String>> {
        let objects = self.list_objects(bucket).await?;
        self.delete_objects(bucket, &object_keys(&objects)).await
    }

    /// Delete a bucket, optionally emptying it first
    ///
    /// Without `force` the store rejects deletion of a non-empty bucket.
    pub async fn delete_bucket(&self, bucket: &str, force: bool) -> BucketResult<()> {
        if force {
            self.empty_bucket(bucket).await?;
        }

        self.store.delete_bucket(bucket).await?;

        if self.collect_metrics {
            self.metrics.increment_bucket_deletes();
        }

        Ok(())
    }

    /// Delete several buckets, returning the names actually deleted
    ///
    /// With `continue_on_failure` a failed deletion is logged and skipped
    /// instead of aborting the remaining requests.
    pub async fn delete_buckets(
        &self,
        requests: &[BucketDeletion],
        continue_on_failure: bool,
    ) -> BucketResult<Vec<String>> {
        let mut deleted = Vec::with_capacity(requests.len());

        for request in requests {
            match self.delete_bucket(&request.bucket, request.force).await {
                Ok(()) => deleted.push(request.bucket.clone()),
                Err(error) if continue_on_failure => {
                    warn!(bucket = %request.bucket, %error, "skipping bucket that could not be deleted");
                }
                Err(error) => return Err(error),
            }
        }

        Ok(deleted)
    }

    // Size aggregation

    /// Total size of every object in the bucket, in bytes
    pub async fn bucket_size_bytes(&self, bucket: &str) -> BucketResult<u64> {
        let objects = self.list_objects(bucket).await?;
        Ok(self.measure(&objects))
    }

    /// Total size of every object in the bucket, in the given unit
    pub async fn bucket_size_in(&self, bucket: &str, unit: StorageUnit) -> BucketResult<f64> {
        let bytes = self.bucket_size_bytes(bucket).await?;
        bytes_in(bytes, unit)
    }

    /// Total size of every object under a directory key, in bytes
    ///
    /// The path must name a directory, i.e. end with '/'.
    pub async fn directory_size_bytes(&self, bucket: &str, directory: &str) -> BucketResult<u64> {
        let directory = ensure_directory_key(directory)?;
        let objects = self.list_prefix_objects(bucket, directory).await?;
        Ok(self.measure(&objects))
    }

    /// Total size of every object under a directory key, in the given unit
    pub async fn directory_size_in(
        &self,
        bucket: &str,
        directory: &str,
        unit: StorageUnit,
    ) -> BucketResult<f64> {
        let bytes = self.directory_size_bytes(bucket, directory).await?;
        bytes_in(bytes, unit)
    }

    async fn list_with_prefix(
        &self,
        bucket: &str,
        prefix: Option<&str>,
    ) -> BucketResult<Vec<ObjectInfo>> {
        let started = Instant::now();
        let objects = self.store.list_objects(bucket, prefix).await?;

        if self.collect_metrics {
            self.metrics.increment_lists();
            self.metrics.add_objects_listed(objects.len());
            self.metrics.record_list_duration(started.elapsed());
        }

        Ok(objects)
    }

    fn measure(&self, objects: &[ObjectInfo]) -> u64 {
        let total: u64 = objects.iter().map(|object| object.size_bytes).sum();

        if self.collect_metrics {
            self.metrics.increment_size_checks();
            self.metrics.add_bytes_measured(total);
        }

        total
    }
}

impl BucketService<S3ObjectStore> {
    /// Connect to S3 and build a service over the store
    ///
    /// The metrics toggle follows [`StoreConfig::collect_metrics`].
    pub async fn connect(config: StoreConfig) -> Result<Self> {
        let store = S3ObjectStore::connect(config).await?;
        let collect = store.config().collect_metrics;
        Ok(Self::new(store).with_collect_metrics(collect))
    }
}

/// Express a byte total in the requested unit
fn bytes_in(bytes: u64, unit: StorageUnit) -> BucketResult<f64> {
    if unit == StorageUnit::Byte {
        return Ok(bytes as f64);
    }

    Ok(convert(bytes as f64, StorageUnit::Byte, unit)?)
}
