use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use parking_lot::Mutex;

/// Performance metrics collector for the bucket service
#[derive(Debug)]
pub struct MetricsCollector {
    // Operation counts
    /// Number of listing operations
    list_count: AtomicUsize,
    /// Number of object deletion operations
    delete_count: AtomicUsize,
    /// Number of bucket deletion operations
    bucket_delete_count: AtomicUsize,
    /// Number of size aggregation operations
    size_count: AtomicUsize,

    // Data metrics
    /// Total objects returned by listings
    objects_listed: AtomicUsize,
    /// Total objects deleted
    objects_deleted: AtomicUsize,
    /// Total bytes summed by size aggregations
    bytes_measured: AtomicU64,

    // Timing metrics
    /// Total listing duration in nanoseconds
    list_duration_ns: AtomicU64,
    /// Total deletion duration in nanoseconds
    delete_duration_ns: AtomicU64,
    /// Last deletion duration
    last_delete_duration: Mutex<Duration>,

    // Internal state
    /// Start time of the metrics collector
    start_time: Instant,
}

/// Point-in-time view of the collector's counters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricsSnapshot {
    /// Number of listing operations
    pub list_count: usize,
    /// Number of object deletion operations
    pub delete_count: usize,
    /// Number of bucket deletion operations
    pub bucket_delete_count: usize,
    /// Number of size aggregation operations
    pub size_count: usize,
    /// Total objects returned by listings
    pub objects_listed: usize,
    /// Total objects deleted
    pub objects_deleted: usize,
    /// Total bytes summed by size aggregations
    pub bytes_measured: u64,
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsCollector {
    /// Create a new metrics collector
    pub fn new() -> Self {
        Self {
            // Operation counts
            list_count: AtomicUsize::new(0),
            delete_count: AtomicUsize::new(0),
            bucket_delete_count: AtomicUsize::new(0),
            size_count: AtomicUsize::new(0),

            // Data metrics
            objects_listed: AtomicUsize::new(0),
            objects_deleted: AtomicUsize::new(0),
            bytes_measured: AtomicU64::new(0),

            // Timing metrics
            list_duration_ns: AtomicU64::new(0),
            delete_duration_ns: AtomicU64::new(0),
            last_delete_duration: Mutex::new(Duration::from_secs(0)),

            // Internal state
            start_time: Instant::now(),
        }
    }

    // Operation count methods

    /// Increment listing count
    pub fn increment_lists(&self) {
        self.list_count.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment object deletion count
    pub fn increment_deletes(&self) {
        self.delete_count.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment bucket deletion count
    pub fn increment_bucket_deletes(&self) {
        self.bucket_delete_count.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment size aggregation count
    pub fn increment_size_checks(&self) {
        self.size_count.fetch_add(1, Ordering::Relaxed);
    }

    // Data metrics methods

    /// Add objects returned by a listing
    pub fn add_objects_listed(&self, count: usize) {
        self.objects_listed.fetch_add(count, Ordering::Relaxed);
    }

    /// Add objects removed by a deletion
    pub fn add_objects_deleted(&self, count: usize) {
        self.objects_deleted.fetch_add(count, Ordering::Relaxed);
    }

    /// Add bytes summed by a size aggregation
    pub fn add_bytes_measured(&self, bytes: u64) {
        self.bytes_measured.fetch_add(bytes, Ordering::Relaxed);
    }

    // Timing metrics methods

    /// Record a listing operation duration
    pub fn record_list_duration(&self, duration: Duration) {
        self.list_duration_ns
            .fetch_add(duration.as_nanos() as u64, Ordering::Relaxed);
    }

    /// Record a deletion operation duration
    pub fn record_delete_duration(&self, duration: Duration) {
        self.delete_duration_ns
            .fetch_add(duration.as_nanos() as u64, Ordering::Relaxed);
        *self.last_delete_duration.lock() = duration;
    }

    // Getters

    /// Get number of listing operations
    pub fn get_list_count(&self) -> usize {
        self.list_count.load(Ordering::Relaxed)
    }

    /// Get number of object deletion operations
    pub fn get_delete_count(&self) -> usize {
        self.delete_count.load(Ordering::Relaxed)
    }

    /// Get number of bucket deletion operations
    pub fn get_bucket_delete_count(&self) -> usize {
        self.bucket_delete_count.load(Ordering::Relaxed)
    }

    /// Get number of size aggregation operations
    pub fn get_size_count(&self) -> usize {
        self.size_count.load(Ordering::Relaxed)
    }

    /// Get total objects returned by listings
    pub fn get_objects_listed(&self) -> usize {
        self.objects_listed.load(Ordering::Relaxed)
    }

    /// Get total objects deleted
    pub fn get_objects_deleted(&self) -> usize {
        self.objects_deleted.load(Ordering::Relaxed)
    }

    /// Get total bytes summed by size aggregations
    pub fn get_bytes_measured(&self) -> u64 {
        self.bytes_measured.load(Ordering::Relaxed)
    }

    /// Get total listing duration
    pub fn get_list_duration(&self) -> Duration {
        Duration::from_nanos(self.list_duration_ns.load(Ordering::Relaxed))
    }

    /// Get total deletion duration
    pub fn get_delete_duration(&self) -> Duration {
        Duration::from_nanos(self.delete_duration_ns.load(Ordering::Relaxed))
    }

    /// Get last deletion duration
    pub fn get_last_delete_duration(&self) -> Duration {
        *self.last_delete_duration.lock()
    }

    /// Get uptime of the metrics collector
    pub fn get_uptime(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Get a point-in-time copy of the counters
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            list_count: self.get_list_count(),
            delete_count: self.get_delete_count(),
            bucket_delete_count: self.get_bucket_delete_count(),
            size_count: self.get_size_count(),
            objects_listed: self.get_objects_listed(),
            objects_deleted: self.get_objects_deleted(),
            bytes_measured: self.get_bytes_measured(),
        }
    }

    /// Reset all metrics
    pub fn reset(&self) {
        self.list_count.store(0, Ordering::Relaxed);
        self.delete_count.store(0, Ordering::Relaxed);
        self.bucket_delete_count.store(0, Ordering::Relaxed);
        self.size_count.store(0, Ordering::Relaxed);

        self.objects_listed.store(0, Ordering::Relaxed);
        self.objects_deleted.store(0, Ordering::Relaxed);
        self.bytes_measured.store(0, Ordering::Relaxed);

        self.list_duration_ns.store(0, Ordering::Relaxed);
        self.delete_duration_ns.store(0, Ordering::Relaxed);
        *self.last_delete_duration.lock() = Duration::from_secs(0);
    }

    /// Get a report of all metrics
    pub fn get_report(&self) -> String {
        let mut report = String::new();

        report.push_str("=== Bucket Service Metrics Report ===\n\n");

        // Uptime
        let uptime = self.get_uptime();
        report.push_str(&format!("Uptime: {:?}\n\n", uptime));

        // Operation counts
        report.push_str("Operation Counts:\n");
        report.push_str(&format!("  Listings: {}\n", self.get_list_count()));
        report.push_str(&format!("  Deletions: {}\n", self.get_delete_count()));
        report.push_str(&format!(
            "  Bucket Deletions: {}\n",
            self.get_bucket_delete_count()
        ));
        report.push_str(&format!("  Size Checks: {}\n\n", self.get_size_count()));

        // Data metrics
        report.push_str("Data Metrics:\n");
        report.push_str(&format!("  Objects Listed: {}\n", self.get_objects_listed()));
        report.push_str(&format!(
            "  Objects Deleted: {}\n",
            self.get_objects_deleted()
        ));
        report.push_str(&format!("  Bytes Measured: {}\n\n", self.get_bytes_measured()));

        // Performance metrics
        report.push_str("Performance Metrics:\n");
        if self.get_list_count() > 0 {
            let avg_list = self.get_list_duration().as_micros() / self.get_list_count() as u128;
            report.push_str(&format!("  Avg. Listing Time: {}µs\n", avg_list));
        }
        if self.get_delete_count() > 0 {
            let avg_delete =
                self.get_delete_duration().as_micros() / self.get_delete_count() as u128;
            report.push_str(&format!("  Avg. Deletion Time: {}µs\n", avg_delete));
        }
        report.push_str(&format!(
            "  Last Deletion Time: {:?}\n",
            self.get_last_delete_duration()
        ));

        // Throughput metrics
        let uptime_secs = uptime.as_secs_f64();
        if uptime_secs > 0.0 {
            let list_throughput = self.get_list_count() as f64 / uptime_secs;
            let delete_throughput = self.get_objects_deleted() as f64 / uptime_secs;

            report.push_str("\nThroughput Metrics:\n");
            report.push_str(&format!("  Listings/sec: {:.2}\n", list_throughput));
            report.push_str(&format!(
                "  Objects Deleted/sec: {:.2}\n",
                delete_throughput
            ));
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_metrics_basic_recording() {
        let metrics = MetricsCollector::new();

        metrics.increment_lists();
        metrics.increment_deletes();
        metrics.increment_bucket_deletes();
        metrics.increment_size_checks();

        assert_eq!(metrics.get_list_count(), 1);
        assert_eq!(metrics.get_delete_count(), 1);
        assert_eq!(metrics.get_bucket_delete_count(), 1);
        assert_eq!(metrics.get_size_count(), 1);
    }

    #[test]
    fn test_metrics_data_recording() {
        let metrics = MetricsCollector::new();

        metrics.add_objects_listed(100);
        metrics.add_objects_deleted(40);
        metrics.add_bytes_measured(4096);

        assert_eq!(metrics.get_objects_listed(), 100);
        assert_eq!(metrics.get_objects_deleted(), 40);
        assert_eq!(metrics.get_bytes_measured(), 4096);
    }

    #[test]
    fn test_metrics_timing_recording() {
        let metrics = MetricsCollector::new();

        let duration = Duration::from_millis(100);
        metrics.record_list_duration(duration);
        metrics.record_delete_duration(duration);

        assert_eq!(metrics.get_list_duration(), duration);
        assert_eq!(metrics.get_delete_duration(), duration);
        assert_eq!(metrics.get_last_delete_duration(), duration);
    }

    #[test]
    fn test_metrics_snapshot() {
        let metrics = MetricsCollector::new();

        metrics.increment_lists();
        metrics.add_objects_listed(3);
        metrics.add_bytes_measured(1024);

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.list_count, 1);
        assert_eq!(snapshot.objects_listed, 3);
        assert_eq!(snapshot.bytes_measured, 1024);
        assert_eq!(snapshot.delete_count, 0);
    }

    #[test]
    fn test_metrics_report() {
        let metrics = MetricsCollector::new();

        metrics.increment_lists();
        metrics.add_objects_listed(10);
        metrics.record_list_duration(Duration::from_millis(5));

        let report = metrics.get_report();

        assert!(!report.is_empty());
        assert!(report.contains("Operation Counts:"));
        assert!(report.contains("Data Metrics:"));
        assert!(report.contains("Performance Metrics:"));
    }

    #[test]
    fn test_metrics_reset() {
        let metrics = MetricsCollector::new();

        metrics.increment_deletes();
        metrics.add_objects_deleted(5);
        metrics.record_delete_duration(Duration::from_millis(10));

        metrics.reset();

        assert_eq!(metrics.get_delete_count(), 0);
        assert_eq!(metrics.get_objects_deleted(), 0);
        assert_eq!(metrics.get_delete_duration(), Duration::from_secs(0));
        assert_eq!(metrics.get_last_delete_duration(), Duration::from_secs(0));
    }

    #[test]
    fn test_metrics_thread_safety() {
        let metrics = Arc::new(MetricsCollector::new());

        let mut handles = Vec::new();

        for _ in 0..10 {
            let metrics_clone = metrics.clone();
            handles.push(thread::spawn(move || {
                for _ in 0..100 {
                    metrics_clone.increment_lists();
                    metrics_clone.add_objects_listed(10);
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(metrics.get_list_count(), 1000);
        assert_eq!(metrics.get_objects_listed(), 10000);
    }
}
