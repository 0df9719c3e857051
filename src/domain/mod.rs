//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors)
//! - `intake` - Questionnaire answers, consent, and intake state
//! - `flow` - Step definitions and the navigation walk
//! - `tax_return` - Tax return aggregate and status lifecycle
//! - `document` - Uploaded-document metadata and sync state

pub mod document;
pub mod flow;
pub mod foundation;
pub mod intake;
pub mod tax_return;
