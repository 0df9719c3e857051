//! Outstanding documents - uploads awaiting a ticket announcement.
//!
//! An outstanding document is one that cleared the grace window without
//! being synced, paired with the ticket it should be announced on. The
//! repository produces these rows; [`group_by_ticket`] turns them into
//! one work unit per ticket so a run posts a single comment per ticket
//! no matter how many files arrived.

use std::collections::BTreeMap;

use crate::domain::document::Document;
use crate::domain::foundation::TicketId;

/// One unsynced document joined with its client's ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutstandingDocument {
    /// The unsynced document.
    pub document: Document,
    /// Ticket for the uploading client.
    pub ticket_id: TicketId,
}

impl OutstandingDocument {
    /// Pair a document with the ticket it should be announced on.
    pub fn new(document: Document, ticket_id: TicketId) -> Self {
        Self {
            document,
            ticket_id,
        }
    }
}

/// Groups outstanding documents by ticket.
///
/// Within each group, documents are ordered by upload time (ties broken
/// by id) so the comment lists files in the order they arrived. The
/// grouping itself is deterministic: the same rows always produce the
/// same groups in the same order.
pub fn group_by_ticket(
    outstanding: Vec<OutstandingDocument>,
) -> BTreeMap<TicketId, Vec<Document>> {
    let mut groups: BTreeMap<TicketId, Vec<Document>> = BTreeMap::new();

    for row in outstanding {
        groups.entry(row.ticket_id).or_default().push(row.document);
    }

    for documents in groups.values_mut() {
        documents.sort_by(|a, b| {
            a.uploaded_at()
                .cmp(b.uploaded_at())
                .then_with(|| a.id().cmp(b.id()))
        });
    }

    groups
}
