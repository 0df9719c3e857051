//! UnsentDocumentsService - Scheduled reconciliation of unsynced uploads.
//!
//! Finds documents that were uploaded but never announced on the
//! client's external ticket, posts one batch comment per ticket, and
//! marks the announced documents synced. Runs from a cron-style
//! scheduler; one logical run at a time is the scheduler's job.

use std::sync::Arc;

use chrono::Duration;

use crate::domain::document::{group_by_ticket, Document};
use crate::domain::foundation::{DocumentId, DomainError, ErrorCode, TicketId};
use crate::ports::{DocumentRepository, MetricsSink, TicketingClient};

/// How long an upload must sit before a run announces it.
///
/// Clients upload in bursts (front of an ID, then the back), so waiting
/// batches one burst into one comment instead of several.
pub const GRACE_WINDOW_MINUTES: i64 = 15;

/// Counter emitted once per run, whether or not anything was synced.
pub const RUN_COUNTER: &str = "cronjob.documents.unsent.run";

/// Gauge for distinct tickets updated, emitted only on runs with updates.
pub const TICKETS_UPDATED_GAUGE: &str = "ticketing.documents.unsent.tickets_updated";

/// Gauge for documents synced, emitted only on runs with updates.
pub const DOCUMENTS_SYNCED_GAUGE: &str = "ticketing.documents.unsent.documents_synced";

/// Outcome of one reconciliation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconciliationReport {
    /// Distinct tickets that received a batch comment.
    pub tickets_updated: u64,
    /// Documents marked synced across all updated tickets.
    pub documents_synced: u64,
    /// Ticket groups whose external update failed and were left for the
    /// next run.
    pub groups_failed: u64,
}

/// Service reconciling unsynced documents with the ticketing system.
pub struct UnsentDocumentsService {
    documents: Arc<dyn DocumentRepository>,
    ticketing: Arc<dyn TicketingClient>,
    metrics: Arc<dyn MetricsSink>,
    tags: Vec<String>,
}

impl UnsentDocumentsService {
    pub fn new(
        documents: Arc<dyn DocumentRepository>,
        ticketing: Arc<dyn TicketingClient>,
        metrics: Arc<dyn MetricsSink>,
        tags: Vec<String>,
    ) -> Self {
        Self {
            documents,
            ticketing,
            metrics,
            tags,
        }
    }

    /// Execute one reconciliation run.
    ///
    /// Per ticket group: build the batch comment, append it, and only
    /// then mark the group's documents synced. Sync state is written
    /// after the external call succeeds, so a crash between the two can
    /// repeat a comment on the next run; a lost announcement cannot
    /// happen. A ticketing failure skips that group and the run carries
    /// on with the rest. A sync-marking failure aborts the run instead:
    /// at that point the comment is already on the ticket, and silently
    /// continuing would let the next run post it again.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` if the outstanding query or a sync-marking
    ///   write fails
    /// - `TicketingError` if there were groups to update and every
    ///   single one failed
    pub async fn run_once(&self) -> Result<ReconciliationReport, DomainError> {
        self.metrics.count(RUN_COUNTER, 1, &self.tags).await;

        let outstanding = self
            .documents
            .find_outstanding(Duration::minutes(GRACE_WINDOW_MINUTES))
            .await?;

        let groups = group_by_ticket(outstanding);
        let group_count = groups.len();

        let mut report = ReconciliationReport::default();
        for (ticket_id, documents) in groups {
            let comment = self.build_comment(&ticket_id, &documents);
            if let Err(error) = self.ticketing.append_comment(&ticket_id, &comment).await {
                tracing::warn!(
                    ticket_id = %ticket_id,
                    error = %error,
                    "Ticket update failed; documents stay unsynced for the next run"
                );
                report.groups_failed += 1;
                continue;
            }

            let document_ids: Vec<DocumentId> = documents.iter().map(|d| *d.id()).collect();
            self.documents.mark_synced(&document_ids, &ticket_id).await?;
            report.tickets_updated += 1;
            report.documents_synced += document_ids.len() as u64;
        }

        if report.tickets_updated > 0 {
            self.metrics
                .gauge(TICKETS_UPDATED_GAUGE, report.tickets_updated, &self.tags)
                .await;
            self.metrics
                .gauge(DOCUMENTS_SYNCED_GAUGE, report.documents_synced, &self.tags)
                .await;
        }

        if group_count > 0 && report.groups_failed as usize == group_count {
            return Err(DomainError::new(
                ErrorCode::TicketingError,
                "Every ticket update in the run failed",
            )
            .with_detail("groups_failed", report.groups_failed.to_string()));
        }

        Ok(report)
    }

    /// One comment body listing every file in the group, upload order.
    fn build_comment(&self, ticket_id: &TicketId, documents: &[Document]) -> String {
        let mut body = format!(
            "New client documents are available to view: {}\nFiles uploaded:\n",
            self.ticketing.ticket_url(ticket_id)
        );
        for document in documents {
            body.push_str(&format!(
                "* {} ({})\n",
                document.display_name(),
                document.document_type().label()
            ));
        }
        body
    }
}
