//! PostgreSQL adapters - database implementations of the repository
//! ports.
//!
//! One adapter per aggregate: intakes, tax returns, and documents. All
//! of them share a single `PgPool` handed in at construction.

mod document_repository;
mod intake_repository;
mod tax_return_repository;

pub use document_repository::PostgresDocumentRepository;
pub use intake_repository::PostgresIntakeRepository;
pub use tax_return_repository::PostgresTaxReturnRepository;
