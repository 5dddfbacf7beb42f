//! Object-store client abstraction and its AWS S3 implementation

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::config::Region;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::DateTime as SdkDateTime;
use aws_sdk_s3::types::{Bucket, Delete, Object, ObjectIdentifier};
use aws_sdk_s3::Client;
use chrono::{DateTime, TimeZone, Utc};
use tokio::time::sleep;
use tracing::debug;

use crate::bucket::{BucketError, BucketInfo, BucketResult, ObjectInfo};
use crate::config::StoreConfig;
use crate::error::Result;

/// Backend abstraction over an S3-compatible object store
///
/// The bucket service is generic over this trait so that housekeeping logic
/// can be tested against an in-memory store.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// List every bucket visible to the credentials in use
    async fn list_buckets(&self) -> BucketResult<Vec<BucketInfo>>;

    /// List every object in a bucket, optionally restricted to a key prefix
    ///
    /// Follows continuation tokens until the listing is exhausted.
    async fn list_objects(
        &self,
        bucket: &str,
        prefix: Option<&str>,
    ) -> BucketResult<Vec<ObjectInfo>>;

    /// Delete the given keys, returning the keys the store removed
    async fn delete_objects(&self, bucket: &str, keys: &[String]) -> BucketResult<Vec<String>>;

    /// Delete a bucket; fails unless the bucket is already empty
    async fn delete_bucket(&self, bucket: &str) -> BucketResult<()>;
}

/// [`ObjectStore`] implementation backed by `aws-sdk-s3`
///
/// Transient API failures are retried with exponential backoff up to the
/// configured attempt budget; exhausted budgets surface as
/// [`BucketError::RetriesExhausted`].
#[derive(Clone)]
pub struct S3ObjectStore {
    client: Client,
    config: StoreConfig,
}

impl S3ObjectStore {
    /// Connect to the object store using the given configuration
    ///
    /// Credentials are resolved through the standard AWS provider chain.
    pub async fn connect(config: StoreConfig) -> Result<Self> {
        config.validate()?;

        let shared = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .load()
            .await;

        let mut builder = aws_sdk_s3::config::Builder::from(&shared);

        if let Some(ref endpoint) = config.endpoint_url {
            builder = builder.endpoint_url(endpoint);
        }

        if config.force_path_style {
            builder = builder.force_path_style(true);
        }

        let client = Client::from_conf(builder.build());

        Ok(Self { client, config })
    }

    /// Get the configuration in use
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn list_buckets(&self) -> BucketResult<Vec<BucketInfo>> {
        let response = with_retries(&self.config, "ListBuckets", "*", || {
            self.client.list_buckets().send()
        })
        .await?;

        let buckets: Vec<BucketInfo> = response.buckets().iter().filter_map(bucket_info).collect();

        debug!(count = buckets.len(), "listed buckets");
        Ok(buckets)
    }

    async fn list_objects(
        &self,
        bucket: &str,
        prefix: Option<&str>,
    ) -> BucketResult<Vec<ObjectInfo>> {
        let objects = collect_pages(|continuation| async move {
            let page = with_retries(&self.config, "ListObjectsV2", bucket, || {
                let mut request = self.client.list_objects_v2().bucket(bucket);
                if let Some(prefix) = prefix {
                    request = request.prefix(prefix);
                }
                if let Some(ref token) = continuation {
                    request = request.continuation_token(token);
                }
                request.send()
            })
            .await?;

            let records: Vec<ObjectInfo> =
                page.contents().iter().filter_map(object_info).collect();
            let next = match page.next_continuation_token() {
                Some(token) if page.is_truncated() == Some(true) => Some(token.to_string()),
                _ => None,
            };

            Ok((records, next))
        })
        .await?;

        debug!(bucket, count = objects.len(), "listed objects");
        Ok(objects)
    }

    async fn delete_objects(&self, bucket: &str, keys: &[String]) -> BucketResult<Vec<String>> {
        if keys.is_empty() {
            return Ok(Vec::new());
        }

        let mut deleted = Vec::with_capacity(keys.len());

        for batch in keys.chunks(self.config.delete_batch_size) {
            let mut identifiers = Vec::with_capacity(batch.len());
            for key in batch {
                let identifier = ObjectIdentifier::builder()
                    .key(key)
                    .build()
                    .map_err(|e| BucketError::api("DeleteObjects", bucket, e.to_string()))?;
                identifiers.push(identifier);
            }

            let payload = Delete::builder()
                .set_objects(Some(identifiers))
                .build()
                .map_err(|e| BucketError::api("DeleteObjects", bucket, e.to_string()))?;

            let response = with_retries(&self.config, "DeleteObjects", bucket, || {
                self.client
                    .delete_objects()
                    .bucket(bucket)
                    .delete(payload.clone())
                    .send()
            })
            .await?;

            if let Some(first) = response.errors().first() {
                return Err(BucketError::api(
                    "DeleteObjects",
                    bucket,
                    format!(
                        "{} of {} keys rejected, first: {} ({})",
                        response.errors().len(),
                        batch.len(),
                        first.key().unwrap_or("<unknown>"),
                        first.message().unwrap_or("no message"),
                    ),
                ));
            }

            deleted.extend(
                response
                    .deleted()
                    .iter()
                    .filter_map(|object| object.key().map(String::from)),
            );
        }

        debug!(bucket, count = deleted.len(), "deleted objects");
        Ok(deleted)
    }

    async fn delete_bucket(&self, bucket: &str) -> BucketResult<()> {
        with_retries(&self.config, "DeleteBucket", bucket, || {
            self.client.delete_bucket().bucket(bucket).send()
        })
        .await?;

        debug!(bucket, "deleted bucket");
        Ok(())
    }
}

/// Run one store call under the configured retry budget
///
/// The call is rebuilt for every attempt. Failed attempts back off
/// exponentially, and a spent budget surfaces as
/// [`BucketError::RetriesExhausted`] carrying the final attempt count.
async fn with_retries<T, E, Fut>(
    config: &StoreConfig,
    operation: &str,
    target: &str,
    mut call: impl FnMut() -> Fut,
) -> BucketResult<T>
where
    E: std::error::Error,
    Fut: Future<Output = std::result::Result<T, E>>,
{
    let mut attempt = 0;
    loop {
        attempt += 1;
        match call().await {
            Ok(value) => return Ok(value),
            Err(_) if attempt < config.max_retries => {
                let delay = backoff_delay(config.retry_base_delay_ms, attempt);
                debug!(
                    operation,
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    "retrying object store call"
                );
                sleep(delay).await;
            }
            Err(e) => {
                return Err(BucketError::retries_exhausted(
                    operation,
                    target,
                    attempt,
                    format!("{}", DisplayErrorContext(&e)),
                ));
            }
        }
    }
}

/// Drain a paginated listing, feeding each continuation token back into the
/// next fetch until the store reports the final page
async fn collect_pages<F, Fut>(mut fetch: F) -> BucketResult<Vec<ObjectInfo>>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = BucketResult<(Vec<ObjectInfo>, Option<String>)>>,
{
    let mut objects = Vec::new();
    let mut continuation: Option<String> = None;

    loop {
        let (mut page, next) = fetch(continuation.take()).await?;
        objects.append(&mut page);

        match next {
            Some(token) => continuation = Some(token),
            None => break,
        }
    }

    Ok(objects)
}

fn backoff_delay(base_ms: u64, attempt: u32) -> Duration {
    Duration::from_millis(base_ms * (1 << (attempt - 1)))
}

fn bucket_info(bucket: &Bucket) -> Option<BucketInfo> {
    let name = bucket.name()?.to_string();
    let created_at = bucket.creation_date().and_then(instant_from_timestamp);
    Some(BucketInfo::new(name, created_at))
}

/// Convert an SDK object record, skipping records without a key
///
/// S3 listings always carry a last-modified timestamp; a record missing one
/// is stamped with the Unix epoch and therefore matches any age cutoff.
fn object_info(object: &Object) -> Option<ObjectInfo> {
    let key = object.key()?.to_string();
    let size_bytes = object.size().unwrap_or(0).max(0) as u64;
    let last_modified = object
        .last_modified()
        .and_then(instant_from_timestamp)
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH);
    Some(ObjectInfo::new(key, size_bytes, last_modified))
}

fn instant_from_timestamp(timestamp: &SdkDateTime) -> Option<DateTime<Utc>> {
    Utc.timestamp_opt(timestamp.secs(), timestamp.subsec_nanos())
        .single()
}
