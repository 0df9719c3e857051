//! RecordDocumentUploadHandler - Command handler for document uploads.
//!
//! Persists the uploaded file's metadata and fires any status
//! follow-up the document type carries. The file bytes themselves are
//! stored elsewhere before this handler runs.

use std::sync::Arc;

use crate::application::handlers::AdvanceTaxReturnStatuses;
use crate::domain::document::{Document, DocumentType, UploadAction};
use crate::domain::foundation::{ClientId, DocumentId, DomainError, TaxReturnId};
use crate::ports::DocumentRepository;

/// Command describing one uploaded file.
#[derive(Debug, Clone)]
pub struct RecordDocumentUploadCommand {
    pub client_id: ClientId,
    pub document_type: DocumentType,
    pub display_name: String,
    /// Return to attach the document to, when known.
    pub tax_return_id: Option<TaxReturnId>,
}

/// Result of recording an upload.
#[derive(Debug, Clone)]
pub struct RecordDocumentUploadResult {
    pub document: Document,
    /// How many of the client's returns advanced as a follow-up.
    pub returns_advanced: u64,
}

/// Handler for document uploads.
pub struct RecordDocumentUploadHandler {
    documents: Arc<dyn DocumentRepository>,
    advance: Arc<AdvanceTaxReturnStatuses>,
}

impl RecordDocumentUploadHandler {
    pub fn new(
        documents: Arc<dyn DocumentRepository>,
        advance: Arc<AdvanceTaxReturnStatuses>,
    ) -> Self {
        Self { documents, advance }
    }

    /// Record an upload and run its status follow-up.
    ///
    /// # Errors
    ///
    /// - `EMPTY_FIELD` if the display name is blank
    /// - `DatabaseError` on persistence failure
    pub async fn handle(
        &self,
        cmd: RecordDocumentUploadCommand,
    ) -> Result<RecordDocumentUploadResult, DomainError> {
        let mut document = Document::new(
            DocumentId::new(),
            cmd.client_id,
            cmd.document_type,
            cmd.display_name,
        )?;
        if let Some(tax_return_id) = cmd.tax_return_id {
            document = document.for_tax_return(tax_return_id);
        }

        self.documents.save(&document).await?;

        let returns_advanced = match cmd.document_type.upload_action() {
            Some(UploadAction::AdvanceIfReady(target)) => {
                self.advance.advance_if_ready(&cmd.client_id, target).await?
            }
            None => 0,
        };

        Ok(RecordDocumentUploadResult {
            document,
            returns_advanced,
        })
    }
}
