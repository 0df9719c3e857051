//! Flow domain module - Step navigation over the intake questionnaire.
//!
//! Defines the ordered, branching sequence of intake steps and the pure
//! walk that computes which step a client sees next. Steps carry
//! applicability conditions over the intake's answers; steps whose
//! conditions are false are skipped, not shown.
//!
//! # Module Structure
//!
//! - `condition` - Applicability predicates over intake answers
//! - `step` - Step definitions and walk destinations
//! - `sequence` - Ordered, validated step sequence and the walk itself
//! - `intake_flow` - The production flow definition
//! - `errors` - Flow-definition validation errors

mod condition;
mod errors;
mod intake_flow;
mod sequence;
mod step;

pub use condition::Condition;
pub use errors::FlowDefinitionError;
pub use intake_flow::{build_intake_flow, intake_flow};
pub use sequence::StepSequence;
pub use step::{Destination, Step, StepKind};
