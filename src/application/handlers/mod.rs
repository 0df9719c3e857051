//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod consent;
pub mod documents;
pub mod navigation;
pub mod reconciliation;
pub mod tax_returns;

pub use consent::{RecordConsentCommand, RecordConsentHandler, RecordConsentResult};
pub use documents::{
    RecordDocumentUploadCommand, RecordDocumentUploadHandler, RecordDocumentUploadResult,
};
pub use navigation::{
    CompleteStepCommand, CompleteStepHandler, CompleteStepResult, CurrentStepCommand,
    CurrentStepHandler, CurrentStepResult,
};
pub use reconciliation::{ReconciliationReport, UnsentDocumentsService};
pub use tax_returns::AdvanceTaxReturnStatuses;
