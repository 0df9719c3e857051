//! Recording ticketing client for testing.
//!
//! # Security Note
//!
//! This adapter is for **testing only** and should not be used in
//! production. It uses `.expect()` on lock operations which will panic
//! if locks are poisoned. Production code should use the HTTP ticketing
//! client adapter.

use async_trait::async_trait;
use std::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, TicketId};
use crate::ports::TicketingClient;

/// Ticketing client that records comments instead of sending them.
///
/// Individual tickets can be set to fail, which lets tests exercise the
/// reconciliation run's partial-failure path.
///
/// # Panics
///
/// Methods may panic if internal locks are poisoned. This is acceptable
/// for test code but this adapter should NOT be used in production.
pub struct RecordingTicketingClient {
    base_url: String,
    comments: RwLock<Vec<(TicketId, String)>>,
    failing_tickets: RwLock<Vec<TicketId>>,
}

impl RecordingTicketingClient {
    /// Creates a client whose ticket URLs use the given base.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            comments: RwLock::new(Vec::new()),
            failing_tickets: RwLock::new(Vec::new()),
        }
    }

    // === Test Helpers ===

    /// Makes every append to the given ticket fail.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn fail_ticket(&self, ticket_id: TicketId) {
        self.failing_tickets
            .write()
            .expect("RecordingTicketingClient: failing_tickets write lock poisoned")
            .push(ticket_id);
    }

    /// Returns all recorded comments in append order.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn comments(&self) -> Vec<(TicketId, String)> {
        self.comments
            .read()
            .expect("RecordingTicketingClient: comments lock poisoned")
            .clone()
    }

    /// Returns the recorded comments for one ticket.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn comments_for(&self, ticket_id: &TicketId) -> Vec<String> {
        self.comments()
            .into_iter()
            .filter(|(id, _)| id == ticket_id)
            .map(|(_, body)| body)
            .collect()
    }

    /// Clears recorded comments (for test isolation).
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn clear(&self) {
        self.comments
            .write()
            .expect("RecordingTicketingClient: comments write lock poisoned")
            .clear();
    }
}

#[async_trait]
impl TicketingClient for RecordingTicketingClient {
    async fn append_comment(&self, ticket_id: &TicketId, body: &str) -> Result<(), DomainError> {
        let failing = self
            .failing_tickets
            .read()
            .expect("RecordingTicketingClient: failing_tickets lock poisoned")
            .contains(ticket_id);
        if failing {
            return Err(DomainError::new(
                ErrorCode::TicketingError,
                "Ticketing system unavailable",
            )
            .with_detail("ticket_id", ticket_id.to_string()));
        }

        self.comments
            .write()
            .expect("RecordingTicketingClient: comments write lock poisoned")
            .push((ticket_id.clone(), body.to_string()));
        Ok(())
    }

    fn ticket_url(&self, ticket_id: &TicketId) -> String {
        format!("{}/agent/tickets/{}", self.base_url, ticket_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn append_comment_records_the_body() {
        let client = RecordingTicketingClient::new("https://tickets.test");
        let ticket_id = TicketId::new("4521").unwrap();

        client.append_comment(&ticket_id, "hello").await.unwrap();

        assert_eq!(client.comments_for(&ticket_id), vec!["hello"]);
    }

    #[tokio::test]
    async fn failing_ticket_returns_ticketing_error() {
        let client = RecordingTicketingClient::new("https://tickets.test");
        let ticket_id = TicketId::new("4521").unwrap();
        client.fail_ticket(ticket_id.clone());

        let error = client
            .append_comment(&ticket_id, "hello")
            .await
            .unwrap_err();

        assert_eq!(error.code, ErrorCode::TicketingError);
        assert!(client.comments().is_empty());
    }

    #[test]
    fn ticket_url_points_at_the_agent_view() {
        let client = RecordingTicketingClient::new("https://tickets.test");
        let ticket_id = TicketId::new("4521").unwrap();

        assert_eq!(
            client.ticket_url(&ticket_id),
            "https://tickets.test/agent/tickets/4521"
        );
    }
}
