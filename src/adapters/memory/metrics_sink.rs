//! Recording metrics sink for testing.
//!
//! # Security Note
//!
//! This adapter is for **testing only** and should not be used in
//! production. It uses `.expect()` on lock operations which will panic
//! if locks are poisoned. Production code should use the tracing
//! metrics sink adapter.

use async_trait::async_trait;
use std::sync::RwLock;

use crate::ports::MetricsSink;

/// One metric point captured by the recording sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedMetric {
    pub name: String,
    pub value: u64,
    pub tags: Vec<String>,
}

/// Metrics sink that records every point for assertions.
///
/// # Panics
///
/// Methods may panic if internal locks are poisoned. This is acceptable
/// for test code but this adapter should NOT be used in production.
pub struct RecordingMetricsSink {
    counts: RwLock<Vec<RecordedMetric>>,
    gauges: RwLock<Vec<RecordedMetric>>,
}

impl RecordingMetricsSink {
    /// Creates a new empty sink.
    pub fn new() -> Self {
        Self {
            counts: RwLock::new(Vec::new()),
            gauges: RwLock::new(Vec::new()),
        }
    }

    // === Test Helpers ===

    /// Returns all recorded counter points.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn counts(&self) -> Vec<RecordedMetric> {
        self.counts
            .read()
            .expect("RecordingMetricsSink: counts lock poisoned")
            .clone()
    }

    /// Returns all recorded gauge points.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn gauges(&self) -> Vec<RecordedMetric> {
        self.gauges
            .read()
            .expect("RecordingMetricsSink: gauges lock poisoned")
            .clone()
    }

    /// Returns how many times the named counter fired.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn count_calls(&self, name: &str) -> usize {
        self.counts().iter().filter(|m| m.name == name).count()
    }

    /// Returns the recorded values of the named gauge.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn gauge_values(&self, name: &str) -> Vec<u64> {
        self.gauges()
            .into_iter()
            .filter(|m| m.name == name)
            .map(|m| m.value)
            .collect()
    }

    /// Clears all recorded points (for test isolation).
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn clear(&self) {
        self.counts
            .write()
            .expect("RecordingMetricsSink: counts write lock poisoned")
            .clear();
        self.gauges
            .write()
            .expect("RecordingMetricsSink: gauges write lock poisoned")
            .clear();
    }
}

impl Default for RecordingMetricsSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MetricsSink for RecordingMetricsSink {
    async fn count(&self, name: &str, value: u64, tags: &[String]) {
        self.counts
            .write()
            .expect("RecordingMetricsSink: counts write lock poisoned")
            .push(RecordedMetric {
                name: name.to_string(),
                value,
                tags: tags.to_vec(),
            });
    }

    async fn gauge(&self, name: &str, value: u64, tags: &[String]) {
        self.gauges
            .write()
            .expect("RecordingMetricsSink: gauges write lock poisoned")
            .push(RecordedMetric {
                name: name.to_string(),
                value,
                tags: tags.to_vec(),
            });
    }
}
