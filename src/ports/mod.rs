//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Repository Ports
//!
//! - `IntakeRepository` - IntakeAnswers persistence
//! - `TaxReturnRepository` - TaxReturn persistence
//! - `DocumentRepository` - Document persistence and sync-state queries
//!
//! ## External Service Ports
//!
//! - `TicketingClient` - Comment appends on case-management tickets
//! - `MetricsSink` - Fire-and-forget operational metrics

mod document_repository;
mod intake_repository;
mod metrics_sink;
mod tax_return_repository;
mod ticketing_client;

pub use document_repository::DocumentRepository;
pub use intake_repository::IntakeRepository;
pub use metrics_sink::MetricsSink;
pub use tax_return_repository::TaxReturnRepository;
pub use ticketing_client::TicketingClient;
