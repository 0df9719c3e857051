//! Reconciliation handlers.

mod unsent_documents;

pub use unsent_documents::{
    ReconciliationReport, UnsentDocumentsService, DOCUMENTS_SYNCED_GAUGE, GRACE_WINDOW_MINUTES,
    RUN_COUNTER, TICKETS_UPDATED_GAUGE,
};
