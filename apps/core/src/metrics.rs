//! Request counters and response-time samples.

use serde::Serialize;
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

/// Response times kept for the rolling statistics.
pub const MAX_SAMPLES: usize = 1000;

#[derive(Debug, Default)]
struct Inner {
    total_requests: u64,
    total_errors: u64,
    response_times: VecDeque<f64>,
}

/// Shared, thread-safe request metrics.
#[derive(Debug, Default)]
pub struct RequestMetrics {
    inner: Mutex<Inner>,
}

/// Point-in-time view; times are in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricsSnapshot {
    pub total_requests: u64,
    pub total_errors: u64,
    /// Percentage of requests that errored.
    pub error_rate: f64,
    pub avg_response_time: f64,
    pub min_response_time: f64,
    pub max_response_time: f64,
}

impl RequestMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    // A panic while holding the lock leaves plain counters behind, still usable.
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn record(&self, elapsed: Duration, is_error: bool) {
        let mut inner = self.lock();
        inner.total_requests += 1;
        if is_error {
            inner.total_errors += 1;
        }
        if inner.response_times.len() == MAX_SAMPLES {
            inner.response_times.pop_front();
        }
        inner.response_times.push_back(elapsed.as_secs_f64());
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let inner = self.lock();
        let samples = &inner.response_times;

        let (avg, min, max) = if samples.is_empty() {
            (0.0, 0.0, 0.0)
        } else {
            let sum: f64 = samples.iter().sum();
            let min = samples.iter().copied().fold(f64::INFINITY, f64::min);
            let max = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            (sum / samples.len() as f64, min, max)
        };

        let error_rate = if inner.total_requests == 0 {
            0.0
        } else {
            inner.total_errors as f64 / inner.total_requests as f64 * 100.0
        };

        MetricsSnapshot {
            total_requests: inner.total_requests,
            total_errors: inner.total_errors,
            error_rate,
            avg_response_time: avg,
            min_response_time: min,
            max_response_time: max,
        }
    }
}
