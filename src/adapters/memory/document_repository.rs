//! In-memory document repository for testing.
//!
//! # Security Note
//!
//! This adapter is for **testing only** and should not be used in
//! production. It uses `.expect()` on lock operations which will panic
//! if locks are poisoned. Production code should use the Postgres
//! repository adapter.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::adapters::memory::InMemoryIntakeRepository;
use crate::domain::document::{Document, OutstandingDocument};
use crate::domain::foundation::{
    ClientId, DocumentId, DomainError, ErrorCode, TicketId, Timestamp,
};
use crate::ports::DocumentRepository;

/// In-memory document store.
///
/// `find_outstanding` joins against the intake store to resolve each
/// client's ticket, the same join the Postgres adapter performs.
///
/// # Panics
///
/// Methods may panic if internal locks are poisoned. This is acceptable
/// for test code but this adapter should NOT be used in production.
pub struct InMemoryDocumentRepository {
    documents: RwLock<HashMap<DocumentId, Document>>,
    intakes: Arc<InMemoryIntakeRepository>,
}

impl InMemoryDocumentRepository {
    /// Creates a new empty repository joined to the given intake store.
    pub fn new(intakes: Arc<InMemoryIntakeRepository>) -> Self {
        Self {
            documents: RwLock::new(HashMap::new()),
            intakes,
        }
    }

    // === Test Helpers ===

    /// Returns the stored document by id, if any.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn get(&self, id: &DocumentId) -> Option<Document> {
        self.documents
            .read()
            .expect("InMemoryDocumentRepository: documents lock poisoned")
            .get(id)
            .cloned()
    }

    /// Returns the number of stored documents.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn count(&self) -> usize {
        self.documents
            .read()
            .expect("InMemoryDocumentRepository: documents lock poisoned")
            .len()
    }

    /// Clears all stored documents (for test isolation).
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn clear(&self) {
        self.documents
            .write()
            .expect("InMemoryDocumentRepository: documents write lock poisoned")
            .clear();
    }
}

#[async_trait]
impl DocumentRepository for InMemoryDocumentRepository {
    async fn save(&self, document: &Document) -> Result<(), DomainError> {
        self.documents
            .write()
            .expect("InMemoryDocumentRepository: documents write lock poisoned")
            .insert(*document.id(), document.clone());
        Ok(())
    }

    async fn find_by_client(&self, client_id: &ClientId) -> Result<Vec<Document>, DomainError> {
        let mut documents: Vec<Document> = self
            .documents
            .read()
            .expect("InMemoryDocumentRepository: documents lock poisoned")
            .values()
            .filter(|d| d.client_id() == client_id)
            .cloned()
            .collect();
        documents.sort_by(|a, b| {
            a.uploaded_at()
                .cmp(b.uploaded_at())
                .then_with(|| a.id().cmp(b.id()))
        });
        Ok(documents)
    }

    async fn find_outstanding(
        &self,
        grace_window: Duration,
    ) -> Result<Vec<OutstandingDocument>, DomainError> {
        let cutoff = Timestamp::from_datetime(Utc::now() - grace_window);
        let documents: Vec<Document> = self
            .documents
            .read()
            .expect("InMemoryDocumentRepository: documents lock poisoned")
            .values()
            .cloned()
            .collect();

        let mut outstanding = Vec::new();
        for document in documents {
            // Inside the grace window means wait for the next run; the
            // boundary itself is old enough.
            if document.is_synced() || document.uploaded_at().is_after(&cutoff) {
                continue;
            }
            if let Some(intake) = self.intakes.get(document.client_id()) {
                if let Some(ticket_id) = intake.ticket_id() {
                    outstanding.push(OutstandingDocument::new(document, ticket_id.clone()));
                }
            }
        }
        Ok(outstanding)
    }

    async fn mark_synced(
        &self,
        document_ids: &[DocumentId],
        ticket_id: &TicketId,
    ) -> Result<(), DomainError> {
        let mut documents = self
            .documents
            .write()
            .expect("InMemoryDocumentRepository: documents write lock poisoned");
        for id in document_ids {
            match documents.get_mut(id) {
                Some(document) => {
                    document.mark_synced(ticket_id.clone());
                }
                None => {
                    return Err(DomainError::new(
                        ErrorCode::DocumentNotFound,
                        "Document not found",
                    )
                    .with_detail("document_id", id.to_string()));
                }
            }
        }
        Ok(())
    }
}
