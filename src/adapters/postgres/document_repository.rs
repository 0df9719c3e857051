//! PostgreSQL implementation of DocumentRepository.
//!
//! Persists document metadata and runs the reconciliation queries: the
//! outstanding-documents join against the intakes table, and the batch
//! sync-stamp update.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use sqlx::{PgPool, Row};

use crate::domain::document::{Document, DocumentType, OutstandingDocument};
use crate::domain::foundation::{
    ClientId, DocumentId, DomainError, ErrorCode, TaxReturnId, TicketId, Timestamp,
};
use crate::ports::DocumentRepository;

/// PostgreSQL implementation of DocumentRepository.
#[derive(Clone)]
pub struct PostgresDocumentRepository {
    pool: PgPool,
}

impl PostgresDocumentRepository {
    /// Creates a new PostgresDocumentRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DocumentRepository for PostgresDocumentRepository {
    async fn save(&self, document: &Document) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO documents (
                id, client_id, tax_return_id, document_type,
                display_name, uploaded_at, synced_ticket_id
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (id) DO UPDATE SET
                tax_return_id = EXCLUDED.tax_return_id,
                document_type = EXCLUDED.document_type,
                display_name = EXCLUDED.display_name,
                synced_ticket_id = EXCLUDED.synced_ticket_id
            "#,
        )
        .bind(document.id().as_uuid())
        .bind(document.client_id().as_uuid())
        .bind(document.tax_return_id().map(TaxReturnId::as_uuid))
        .bind(document.document_type().key())
        .bind(document.display_name())
        .bind(document.uploaded_at().as_datetime())
        .bind(document.synced_ticket_id().map(TicketId::as_str))
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to save document: {}", e),
            )
        })?;

        Ok(())
    }

    async fn find_by_client(&self, client_id: &ClientId) -> Result<Vec<Document>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, client_id, tax_return_id, document_type,
                   display_name, uploaded_at, synced_ticket_id
            FROM documents
            WHERE client_id = $1
            ORDER BY uploaded_at ASC, id ASC
            "#,
        )
        .bind(client_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch documents by client: {}", e),
            )
        })?;

        let documents: Result<Vec<Document>, DomainError> =
            rows.into_iter().map(row_to_document).collect();

        documents
    }

    async fn find_outstanding(
        &self,
        grace_window: Duration,
    ) -> Result<Vec<OutstandingDocument>, DomainError> {
        // The boundary itself is old enough, hence <= rather than <.
        let cutoff = Utc::now() - grace_window;

        let rows = sqlx::query(
            r#"
            SELECT d.id, d.client_id, d.tax_return_id, d.document_type,
                   d.display_name, d.uploaded_at, d.synced_ticket_id,
                   i.ticket_id AS ticket_id
            FROM documents d
            INNER JOIN intakes i ON i.client_id = d.client_id
            WHERE d.synced_ticket_id IS NULL
              AND d.uploaded_at <= $1
              AND i.ticket_id IS NOT NULL
            ORDER BY d.uploaded_at ASC, d.id ASC
            "#,
        )
        .bind(cutoff)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch outstanding documents: {}", e),
            )
        })?;

        let mut outstanding = Vec::with_capacity(rows.len());
        for row in rows {
            let ticket_id: String = row.try_get("ticket_id").map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to get ticket_id: {}", e),
                )
            })?;
            let ticket_id = TicketId::new(ticket_id).map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Invalid stored ticket_id: {}", e),
                )
            })?;

            let document = row_to_document(row)?;
            outstanding.push(OutstandingDocument::new(document, ticket_id));
        }

        Ok(outstanding)
    }

    async fn mark_synced(
        &self,
        document_ids: &[DocumentId],
        ticket_id: &TicketId,
    ) -> Result<(), DomainError> {
        let ids: Vec<uuid::Uuid> = document_ids.iter().map(|id| *id.as_uuid()).collect();

        // COALESCE keeps the first announcement's ticket if a document
        // was already stamped by a concurrent run.
        let result = sqlx::query(
            r#"
            UPDATE documents
            SET synced_ticket_id = COALESCE(synced_ticket_id, $1)
            WHERE id = ANY($2)
            "#,
        )
        .bind(ticket_id.as_str())
        .bind(&ids)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to mark documents synced: {}", e),
            )
        })?;

        if result.rows_affected() as usize != document_ids.len() {
            return Err(
                DomainError::new(ErrorCode::DocumentNotFound, "Document not found")
                    .with_detail("expected", document_ids.len().to_string())
                    .with_detail("updated", result.rows_affected().to_string()),
            );
        }

        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

fn row_to_document(row: sqlx::postgres::PgRow) -> Result<Document, DomainError> {
    let id: uuid::Uuid = row.try_get("id").map_err(|e| {
        DomainError::new(ErrorCode::DatabaseError, format!("Failed to get id: {}", e))
    })?;

    let client_id: uuid::Uuid = row.try_get("client_id").map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get client_id: {}", e),
        )
    })?;

    let tax_return_id: Option<uuid::Uuid> = row.try_get("tax_return_id").map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get tax_return_id: {}", e),
        )
    })?;

    let document_type: String = row.try_get("document_type").map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get document_type: {}", e),
        )
    })?;
    let document_type = DocumentType::from_key(&document_type).ok_or_else(|| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid document type: {}", document_type),
        )
    })?;

    let display_name: String = row.try_get("display_name").map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get display_name: {}", e),
        )
    })?;

    let uploaded_at: chrono::DateTime<chrono::Utc> = row.try_get("uploaded_at").map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get uploaded_at: {}", e),
        )
    })?;

    let synced_ticket_id: Option<String> = row.try_get("synced_ticket_id").map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get synced_ticket_id: {}", e),
        )
    })?;
    let synced_ticket_id = synced_ticket_id
        .map(TicketId::new)
        .transpose()
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Invalid stored synced_ticket_id: {}", e),
            )
        })?;

    Ok(Document::reconstitute(
        DocumentId::from_uuid(id),
        ClientId::from_uuid(client_id),
        tax_return_id.map(TaxReturnId::from_uuid),
        document_type,
        display_name,
        Timestamp::from_datetime(uploaded_at),
        synced_ticket_id,
    ))
}
