//! In-memory adapters for testing.
//!
//! Deterministic, lock-based implementations of the repository and
//! collaborator ports. Integration tests wire handlers to these instead
//! of Postgres and the real ticketing system.

mod document_repository;
mod intake_repository;
mod metrics_sink;
mod tax_return_repository;
mod ticketing_client;

pub use document_repository::InMemoryDocumentRepository;
pub use intake_repository::InMemoryIntakeRepository;
pub use metrics_sink::{RecordedMetric, RecordingMetricsSink};
pub use tax_return_repository::InMemoryTaxReturnRepository;
pub use ticketing_client::RecordingTicketingClient;
