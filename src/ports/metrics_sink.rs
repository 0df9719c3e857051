//! Metrics sink port.

use async_trait::async_trait;

/// Sink port for operational metrics.
///
/// Emission is fire-and-forget: a sink that cannot deliver a point
/// deals with it internally (log and drop), so instrumented code never
/// fails because of its metrics.
#[async_trait]
pub trait MetricsSink: Send + Sync {
    /// Record a counter increment.
    async fn count(&self, name: &str, value: u64, tags: &[String]);

    /// Record a gauge value.
    async fn gauge(&self, name: &str, value: u64, tags: &[String]);
}

#[cfg(test)]
mod tests {
    use super::*;

    // Trait object safety test
    #[test]
    fn metrics_sink_is_object_safe() {
        fn _accepts_dyn(_sink: &dyn MetricsSink) {}
    }
}
