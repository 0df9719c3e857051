//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Handlers hold their ports as `Arc<dyn …>` and carry no state of their own.

pub mod handlers;

pub use handlers::{
    // Navigation handlers
    CompleteStepCommand, CompleteStepHandler, CompleteStepResult,
    CurrentStepCommand, CurrentStepHandler, CurrentStepResult,
    // Consent and upload handlers
    RecordConsentCommand, RecordConsentHandler, RecordConsentResult,
    RecordDocumentUploadCommand, RecordDocumentUploadHandler, RecordDocumentUploadResult,
    // Status progression
    AdvanceTaxReturnStatuses,
    // Reconciliation
    ReconciliationReport, UnsentDocumentsService,
};
