//! Intake domain module.
//!
//! Holds the questionnaire state for one client: answers keyed by
//! question, completed steps, the resume pointer, and the consent
//! record collected at the start of intake.
//!
//! # Module Structure
//!
//! - `aggregate` - IntakeAnswers aggregate entity
//! - `answer` - Question keys and answer values
//! - `consent` - Consent record and primary filer identity

mod aggregate;
mod answer;
mod consent;

pub use aggregate::IntakeAnswers;
pub use answer::{AnswerValue, QuestionKey, YesNo};
pub use consent::{Consent, LastFourSsn, PrimaryIdentity};
