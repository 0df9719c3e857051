//! Document repository port.
//!
//! Besides plain persistence, this port exposes the reconciliation
//! run's working query: unsynced documents old enough to announce,
//! joined with their client's ticket.

use chrono::Duration;

use crate::domain::document::{Document, OutstandingDocument};
use crate::domain::foundation::{ClientId, DocumentId, DomainError, TicketId};
use async_trait::async_trait;

/// Repository port for Document persistence and sync-state queries.
#[async_trait]
pub trait DocumentRepository: Send + Sync {
    /// Save a document, inserting or replacing by id.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn save(&self, document: &Document) -> Result<(), DomainError>;

    /// Find all of a client's documents, ordered by upload time.
    async fn find_by_client(&self, client_id: &ClientId) -> Result<Vec<Document>, DomainError>;

    /// Find unsynced documents uploaded at least `grace_window` ago,
    /// joined with the uploading client's ticket.
    ///
    /// Documents newer than the grace window are left for a later run,
    /// so a client mid-upload-session produces one announcement, not
    /// one per file. Documents whose client has no ticket yet are also
    /// excluded; they become eligible once the ticket exists.
    async fn find_outstanding(
        &self,
        grace_window: Duration,
    ) -> Result<Vec<OutstandingDocument>, DomainError>;

    /// Mark documents as announced on the given ticket.
    ///
    /// Called only after the ticket comment was appended successfully,
    /// so a failed append leaves the documents outstanding for the next
    /// run.
    ///
    /// # Errors
    ///
    /// - `DocumentNotFound` if an id does not exist
    /// - `DatabaseError` on persistence failure
    async fn mark_synced(
        &self,
        document_ids: &[DocumentId],
        ticket_id: &TicketId,
    ) -> Result<(), DomainError>;
}
