//! Consent handlers.

mod record_consent;

pub use record_consent::{RecordConsentCommand, RecordConsentHandler, RecordConsentResult};
