//! Ticketing client port.
//!
//! Contract for the external case-management system. The core only
//! needs to append comments; ticket creation and lifecycle live with
//! the external system.

use crate::domain::foundation::{DomainError, TicketId};
use async_trait::async_trait;

/// Client port for the external ticketing system.
///
/// Implementations own transport concerns (timeouts, auth); the core
/// sees any of them as a per-call failure.
#[async_trait]
pub trait TicketingClient: Send + Sync {
    /// Append an internal comment to a ticket.
    ///
    /// # Errors
    ///
    /// - `TicketingError` if the external call fails for any reason
    async fn append_comment(&self, ticket_id: &TicketId, body: &str) -> Result<(), DomainError>;

    /// The agent-facing web URL for a ticket, for inclusion in comment
    /// bodies. Pure string construction, no network call.
    fn ticket_url(&self, ticket_id: &TicketId) -> String;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Trait object safety test
    #[test]
    fn ticketing_client_is_object_safe() {
        fn _accepts_dyn(_client: &dyn TicketingClient) {}
    }
}
