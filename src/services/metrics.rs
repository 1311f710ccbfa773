use std::collections::VecDeque;
use std::fmt::Display;
use std::sync::Mutex;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Samples retained per operation kind
const MAX_SAMPLES: usize = 100;

const P95_QUANTILE: f64 = 0.95;

/// Operation kinds with tracked latency
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Analysis,
    Recommendation,
    TryOn,
}

impl Display for OperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OperationKind::Analysis => write!(f, "analysis"),
            OperationKind::Recommendation => write!(f, "recommendation"),
            OperationKind::TryOn => write!(f, "try_on"),
        }
    }
}

/// Latency statistics over the retained window, in milliseconds
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct OperationStats {
    pub avg_ms: f64,
    pub min_ms: f64,
    pub max_ms: f64,
    pub p95_ms: f64,
    pub samples: usize,
}

impl OperationStats {
    fn empty() -> Self {
        Self {
            avg_ms: 0.0,
            min_ms: 0.0,
            max_ms: 0.0,
            p95_ms: 0.0,
            samples: 0,
        }
    }
}

/// Point-in-time latency report across all operation kinds
#[derive(Debug, Serialize)]
pub struct PerformanceReport {
    pub analysis: OperationStats,
    pub recommendation: OperationStats,
    pub try_on: OperationStats,
    pub generated_at: DateTime<Utc>,
}

/// FIFO latency samples per operation kind
///
/// Recording never blocks the request path: each lock is held only for the
/// buffer operation, and a poisoned lock skips the sample rather than
/// failing the caller.
pub struct PerformanceTracker {
    analysis: Mutex<VecDeque<f64>>,
    recommendation: Mutex<VecDeque<f64>>,
    try_on: Mutex<VecDeque<f64>>,
}

impl PerformanceTracker {
    pub fn new() -> Self {
        Self {
            analysis: Mutex::new(VecDeque::with_capacity(MAX_SAMPLES)),
            recommendation: Mutex::new(VecDeque::with_capacity(MAX_SAMPLES)),
            try_on: Mutex::new(VecDeque::with_capacity(MAX_SAMPLES)),
        }
    }

    fn buffer(&self, kind: OperationKind) -> &Mutex<VecDeque<f64>> {
        match kind {
            OperationKind::Analysis => &self.analysis,
            OperationKind::Recommendation => &self.recommendation,
            OperationKind::TryOn => &self.try_on,
        }
    }

    /// Appends one duration sample, evicting the oldest past capacity
    pub fn record(&self, kind: OperationKind, elapsed: Duration) {
        let millis = elapsed.as_secs_f64() * 1000.0;

        match self.buffer(kind).lock() {
            Ok(mut samples) => {
                samples.push_back(millis);
                if samples.len() > MAX_SAMPLES {
                    samples.pop_front();
                }
            }
            Err(e) => {
                tracing::warn!(kind = %kind, error = %e, "Tracker lock poisoned, sample dropped")
            }
        }
    }

    /// Statistics for one operation kind; all zeros when no samples exist
    pub fn stats(&self, kind: OperationKind) -> OperationStats {
        let samples: Vec<f64> = match self.buffer(kind).lock() {
            Ok(samples) => samples.iter().copied().collect(),
            Err(_) => Vec::new(),
        };

        compute_stats(&samples)
    }

    pub fn report(&self) -> PerformanceReport {
        PerformanceReport {
            analysis: self.stats(OperationKind::Analysis),
            recommendation: self.stats(OperationKind::Recommendation),
            try_on: self.stats(OperationKind::TryOn),
            generated_at: Utc::now(),
        }
    }
}

impl Default for PerformanceTracker {
    fn default() -> Self {
        Self::new()
    }
}

fn compute_stats(samples: &[f64]) -> OperationStats {
    if samples.is_empty() {
        return OperationStats::empty();
    }

    let mut sorted = samples.to_vec();
    sorted.sort_by(f64::total_cmp);

    // floor(len * 0.95) is always a valid index for a non-empty buffer
    let p95_index = (sorted.len() as f64 * P95_QUANTILE) as usize;
    let sum: f64 = sorted.iter().sum();

    OperationStats {
        avg_ms: sum / sorted.len() as f64,
        min_ms: sorted[0],
        max_ms: sorted[sorted.len() - 1],
        p95_ms: sorted[p95_index],
        samples: sorted.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_millis(tracker: &PerformanceTracker, kind: OperationKind, values: &[u64]) {
        for value in values {
            tracker.record(kind, Duration::from_millis(*value));
        }
    }

    #[test]
    fn test_empty_tracker_reports_zeros() {
        let tracker = PerformanceTracker::new();

        let stats = tracker.stats(OperationKind::Analysis);

        assert_eq!(stats.avg_ms, 0.0);
        assert_eq!(stats.min_ms, 0.0);
        assert_eq!(stats.max_ms, 0.0);
        assert_eq!(stats.p95_ms, 0.0);
        assert_eq!(stats.samples, 0);
    }

    #[test]
    fn test_basic_statistics() {
        let tracker = PerformanceTracker::new();
        record_millis(&tracker, OperationKind::Recommendation, &[10, 20, 30, 40]);

        let stats = tracker.stats(OperationKind::Recommendation);

        assert_eq!(stats.avg_ms, 25.0);
        assert_eq!(stats.min_ms, 10.0);
        assert_eq!(stats.max_ms, 40.0);
        assert_eq!(stats.samples, 4);
        // floor(4 * 0.95) = 3
        assert_eq!(stats.p95_ms, 40.0);
    }

    #[test]
    fn test_p95_over_a_full_window() {
        let tracker = PerformanceTracker::new();
        let values: Vec<u64> = (1..=100).collect();
        record_millis(&tracker, OperationKind::Analysis, &values);

        let stats = tracker.stats(OperationKind::Analysis);

        // floor(100 * 0.95) = 95, so the 96th smallest sample
        assert_eq!(stats.p95_ms, 96.0);
    }

    #[test]
    fn test_window_evicts_oldest_samples() {
        let tracker = PerformanceTracker::new();
        let values: Vec<u64> = (1..=150).collect();
        record_millis(&tracker, OperationKind::TryOn, &values);

        let stats = tracker.stats(OperationKind::TryOn);

        assert_eq!(stats.samples, MAX_SAMPLES);
        assert_eq!(stats.min_ms, 51.0);
        assert_eq!(stats.max_ms, 150.0);
    }

    #[test]
    fn test_kinds_are_tracked_independently() {
        let tracker = PerformanceTracker::new();
        record_millis(&tracker, OperationKind::Analysis, &[100]);

        let report = tracker.report();

        assert_eq!(report.analysis.samples, 1);
        assert_eq!(report.recommendation.samples, 0);
        assert_eq!(report.try_on.samples, 0);
    }
}
