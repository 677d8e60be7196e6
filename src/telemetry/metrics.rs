// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Metrics collection for intercepted calls.
//!
//! Provides lightweight metrics collection without external dependencies.
//! Keyed by the method's display identity (`method@Type`).

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};
use std::time::{Duration, Instant};

use once_cell::sync::Lazy;

/// Global metrics instance.
pub static GLOBAL_METRICS: Lazy<Metrics> = Lazy::new(Metrics::new);

/// Central metrics collection.
#[derive(Debug)]
pub struct Metrics {
    /// Call metrics by method identity.
    calls: RwLock<HashMap<String, CallMetrics>>,

    /// Start time for calculating uptime.
    start_time: Instant,
}

impl Metrics {
    /// Create a new metrics collector.
    pub fn new() -> Self {
        Self {
            calls: RwLock::new(HashMap::new()),
            start_time: Instant::now(),
        }
    }

    /// Record one intercepted call.
    pub fn record_call(&self, method: &str, duration: Duration, success: bool, suppressed: bool) {
        let mut calls = self.calls.write().unwrap_or_else(PoisonError::into_inner);
        let metrics = calls.entry(method.to_string()).or_insert_with(CallMetrics::new);
        metrics.record(duration, success, suppressed);
    }

    /// Get metrics for a specific method.
    pub fn call_metrics(&self, method: &str) -> Option<CallMetrics> {
        self.calls
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(method)
            .cloned()
    }

    /// Get uptime since metrics were initialized.
    pub fn uptime(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Take a snapshot of all metrics.
    pub fn snapshot(&self) -> MetricsSnapshot {
        let calls = self.calls.read().unwrap_or_else(PoisonError::into_inner);

        MetricsSnapshot {
            calls: calls.clone(),
            uptime: self.uptime(),
        }
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Metrics for a specific method.
#[derive(Debug, Clone)]
pub struct CallMetrics {
    /// Total number of invocations.
    pub invocations: u64,

    /// Number of successful invocations.
    pub successes: u64,

    /// Number of failed invocations.
    pub failures: u64,

    /// Calls whose started/ok events were suppressed.
    pub suppressed: u64,

    /// Total time spent in this method.
    pub total_duration: Duration,

    /// Minimum execution time.
    pub min_duration: Duration,

    /// Maximum execution time.
    pub max_duration: Duration,

    /// Latency distribution.
    pub histogram: Histogram,
}

impl CallMetrics {
    /// Create new empty call metrics.
    pub fn new() -> Self {
        Self {
            invocations: 0,
            successes: 0,
            failures: 0,
            suppressed: 0,
            total_duration: Duration::ZERO,
            min_duration: Duration::MAX,
            max_duration: Duration::ZERO,
            histogram: Histogram::default(),
        }
    }

    /// Record a call.
    pub fn record(&mut self, duration: Duration, success: bool, suppressed: bool) {
        self.invocations += 1;
        if success {
            self.successes += 1;
        } else {
            self.failures += 1;
        }
        if suppressed {
            self.suppressed += 1;
        }
        self.total_duration += duration;
        self.min_duration = self.min_duration.min(duration);
        self.max_duration = self.max_duration.max(duration);
        self.histogram.record(duration);
    }

    /// Calculate average execution time.
    pub fn avg_duration(&self) -> Duration {
        if self.invocations == 0 {
            Duration::ZERO
        } else {
            let nanos = self.total_duration.as_nanos() / u128::from(self.invocations);
            Duration::from_nanos(u64::try_from(nanos).unwrap_or(u64::MAX))
        }
    }

    /// Calculate success rate (0.0 to 1.0).
    pub fn success_rate(&self) -> f64 {
        if self.invocations == 0 {
            1.0
        } else {
            self.successes as f64 / self.invocations as f64
        }
    }
}

impl Default for CallMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Simple histogram with fixed buckets for latency tracking.
#[derive(Debug, Clone)]
pub struct Histogram {
    /// Bucket boundaries in microseconds.
    /// Default: [100us, 1ms, 10ms, 100ms, 1s, 10s, +inf]
    buckets: Vec<u64>,

    /// Count per bucket.
    counts: Vec<u64>,
}

impl Histogram {
    fn with_buckets(buckets: Vec<u64>) -> Self {
        let counts = vec![0; buckets.len() + 1];
        Self { buckets, counts }
    }

    /// Record a duration value.
    pub fn record(&mut self, duration: Duration) {
        let micros = duration.as_micros() as u64;
        let bucket_idx = self
            .buckets
            .iter()
            .position(|&b| micros <= b)
            .unwrap_or(self.buckets.len());
        self.counts[bucket_idx] += 1;
    }

    /// Get counts for each bucket.
    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    /// Calculate approximate percentile (p50, p90, p99, etc.).
    pub fn percentile(&self, p: f64) -> Duration {
        let total: u64 = self.counts.iter().sum();
        if total == 0 {
            return Duration::ZERO;
        }

        let target = (total as f64 * p / 100.0).ceil() as u64;
        let mut cumulative = 0u64;

        for (i, &count) in self.counts.iter().enumerate() {
            cumulative += count;
            if cumulative >= target {
                // Overflow bucket reports ten times the last boundary
                let micros = if i < self.buckets.len() {
                    self.buckets[i]
                } else {
                    self.buckets.last().copied().unwrap_or(0) * 10
                };
                return Duration::from_micros(micros);
            }
        }

        Duration::ZERO
    }

    /// Get p50 (median) latency.
    pub fn p50(&self) -> Duration {
        self.percentile(50.0)
    }

    /// Get p99 latency.
    pub fn p99(&self) -> Duration {
        self.percentile(99.0)
    }
}

impl Default for Histogram {
    fn default() -> Self {
        // Default buckets: 100us, 1ms, 10ms, 100ms, 1s, 10s
        Self::with_buckets(vec![100, 1_000, 10_000, 100_000, 1_000_000, 10_000_000])
    }
}

/// A snapshot of all metrics at a point in time.
#[derive(Debug, Clone)]
pub struct MetricsSnapshot {
    /// Call metrics by method identity.
    pub calls: HashMap<String, CallMetrics>,

    /// Uptime when snapshot was taken.
    pub uptime: Duration,
}

impl MetricsSnapshot {
    /// Format as a human-readable report.
    pub fn format_report(&self) -> String {
        let mut report = String::new();

        report.push_str("=== Call Metrics ===\n\n");
        report.push_str(&format!("Uptime: {:.2?}\n\n", self.uptime));

        let mut names: Vec<&String> = self.calls.keys().collect();
        names.sort();
        for name in names {
            let metrics = &self.calls[name];
            report.push_str(&format!(
                "  {}: {} calls, {:.1}% success, {} suppressed, avg {:.2?}, p99 {:.2?}\n",
                name,
                metrics.invocations,
                metrics.success_rate() * 100.0,
                metrics.suppressed,
                metrics.avg_duration(),
                metrics.histogram.p99()
            ));
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_call_metrics() {
        let mut metrics = CallMetrics::new();
        metrics.record(Duration::from_millis(100), true, false);
        metrics.record(Duration::from_millis(200), true, true);
        metrics.record(Duration::from_millis(50), false, false);

        assert_eq!(metrics.invocations, 3);
        assert_eq!(metrics.successes, 2);
        assert_eq!(metrics.failures, 1);
        assert_eq!(metrics.suppressed, 1);
        assert_eq!(metrics.min_duration, Duration::from_millis(50));
        assert_eq!(metrics.max_duration, Duration::from_millis(200));
        assert!((metrics.success_rate() - 0.666).abs() < 0.01);
    }

    #[test]
    fn test_empty_call_metrics() {
        let metrics = CallMetrics::new();
        assert_eq!(metrics.avg_duration(), Duration::ZERO);
        assert_eq!(metrics.success_rate(), 1.0);
    }

    #[test]
    fn test_histogram() {
        let mut hist = Histogram::default();

        hist.record(Duration::from_micros(50)); // bucket 0 (<=100us)
        hist.record(Duration::from_micros(500)); // bucket 1 (<=1ms)
        hist.record(Duration::from_millis(5)); // bucket 2 (<=10ms)
        hist.record(Duration::from_secs(20)); // overflow

        assert_eq!(hist.counts()[0], 1);
        assert_eq!(hist.counts()[1], 1);
        assert_eq!(hist.counts()[2], 1);
        assert_eq!(hist.counts()[6], 1);
    }

    #[test]
    fn test_histogram_percentiles() {
        let mut hist = Histogram::default();
        for _ in 0..100 {
            hist.record(Duration::from_micros(500));
        }

        assert_eq!(hist.p50(), Duration::from_micros(1_000));
        assert_eq!(hist.p99(), Duration::from_micros(1_000));
        assert_eq!(Histogram::default().p50(), Duration::ZERO);
    }

    #[test]
    fn test_metrics_snapshot_report() {
        let metrics = Metrics::new();
        metrics.record_call("query@Reader", Duration::from_millis(1), true, false);
        metrics.record_call("query@Reader", Duration::from_millis(3), false, true);

        let snapshot = metrics.snapshot();
        let query = &snapshot.calls["query@Reader"];
        assert_eq!(query.invocations, 2);
        assert_eq!(query.avg_duration(), Duration::from_millis(2));

        let report = snapshot.format_report();
        assert!(report.contains("query@Reader: 2 calls"));
        assert!(report.contains("1 suppressed"));
        assert!(metrics.call_metrics("sum@Reader").is_none());
    }

    #[test]
    fn test_avg_duration_past_u32_invocations() {
        let mut metrics = CallMetrics::new();
        metrics.invocations = u64::from(u32::MAX) + 1;
        metrics.total_duration = Duration::from_secs(u64::from(u32::MAX) + 1);

        assert_eq!(metrics.avg_duration(), Duration::from_secs(1));
    }
}
