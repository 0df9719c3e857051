//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, and error types
//! that form the vocabulary of the tax-intake domain.

mod ids;
mod timestamp;
mod errors;

pub use ids::{ClientId, DocumentId, IntakeId, StepId, TaxReturnId, TicketId, UserId};
pub use timestamp::Timestamp;
pub use errors::{DomainError, ErrorCode, ValidationError};
