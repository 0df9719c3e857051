//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `memory` - In-memory repositories and recorders for tests
//! - `postgres` - PostgreSQL repository implementations
//! - `ticketing` - HTTP client for the external ticketing system
//! - `metrics` - Metric sinks

pub mod memory;
pub mod metrics;
pub mod postgres;
pub mod ticketing;

pub use memory::{
    InMemoryDocumentRepository, InMemoryIntakeRepository, InMemoryTaxReturnRepository,
    RecordedMetric, RecordingMetricsSink, RecordingTicketingClient,
};
pub use metrics::TracingMetricsSink;
pub use postgres::{
    PostgresDocumentRepository, PostgresIntakeRepository, PostgresTaxReturnRepository,
};
pub use ticketing::HttpTicketingClient;
