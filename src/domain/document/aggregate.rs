//! Document aggregate entity.
//!
//! A document records one client upload: what kind of file it is, when
//! it arrived, and whether it has been reflected in the client's
//! external ticket yet. `synced_ticket_id` doubles as the sync flag;
//! unset means the reconciliation run has not yet announced it.

use serde::{Deserialize, Serialize};

use crate::domain::document::DocumentType;
use crate::domain::foundation::{
    ClientId, DocumentId, TaxReturnId, TicketId, Timestamp, ValidationError,
};

/// Document aggregate - one uploaded file's metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Unique identifier for this document.
    id: DocumentId,

    /// Client who uploaded the document.
    client_id: ClientId,

    /// Return the document belongs to, when tied to a specific year.
    tax_return_id: Option<TaxReturnId>,

    /// What kind of document this is.
    document_type: DocumentType,

    /// Filename shown to staff.
    display_name: String,

    /// When the upload landed.
    uploaded_at: Timestamp,

    /// Ticket the document was announced on, once synced.
    synced_ticket_id: Option<TicketId>,
}

impl Document {
    /// Create a new, unsynced document uploaded now.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyField` if the display name is
    /// blank.
    pub fn new(
        id: DocumentId,
        client_id: ClientId,
        document_type: DocumentType,
        display_name: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let display_name = display_name.into();
        if display_name.trim().is_empty() {
            return Err(ValidationError::empty_field("display_name"));
        }

        Ok(Self {
            id,
            client_id,
            tax_return_id: None,
            document_type,
            display_name,
            uploaded_at: Timestamp::now(),
            synced_ticket_id: None,
        })
    }

    /// Tie the document to a specific return.
    pub fn for_tax_return(mut self, tax_return_id: TaxReturnId) -> Self {
        self.tax_return_id = Some(tax_return_id);
        self
    }

    /// Reconstitute a document from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: DocumentId,
        client_id: ClientId,
        tax_return_id: Option<TaxReturnId>,
        document_type: DocumentType,
        display_name: String,
        uploaded_at: Timestamp,
        synced_ticket_id: Option<TicketId>,
    ) -> Self {
        Self {
            id,
            client_id,
            tax_return_id,
            document_type,
            display_name,
            uploaded_at,
            synced_ticket_id,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Returns the document's ID.
    pub fn id(&self) -> &DocumentId {
        &self.id
    }

    /// Returns the uploading client's ID.
    pub fn client_id(&self) -> &ClientId {
        &self.client_id
    }

    /// Returns the associated return, if any.
    pub fn tax_return_id(&self) -> Option<&TaxReturnId> {
        self.tax_return_id.as_ref()
    }

    /// Returns the document's type.
    pub fn document_type(&self) -> DocumentType {
        self.document_type
    }

    /// Returns the filename shown to staff.
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Returns when the upload landed.
    pub fn uploaded_at(&self) -> &Timestamp {
        &self.uploaded_at
    }

    /// Returns the ticket the document was announced on, once synced.
    pub fn synced_ticket_id(&self) -> Option<&TicketId> {
        self.synced_ticket_id.as_ref()
    }

    /// Returns true once the document has been announced on a ticket.
    pub fn is_synced(&self) -> bool {
        self.synced_ticket_id.is_some()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Record that the document was announced on a ticket.
    ///
    /// Returns true if the document was newly marked; false if it was
    /// already synced (the first announcement wins).
    pub fn mark_synced(&mut self, ticket_id: TicketId) -> bool {
        if self.synced_ticket_id.is_some() {
            return false;
        }

        self.synced_ticket_id = Some(ticket_id);
        true
    }
}
