//! Ticketing system configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::foundation::TicketId;

/// Ticketing system configuration.
///
/// The API token is held as a [`SecretString`] so it never appears in
/// debug output or logs.
#[derive(Debug, Clone, Deserialize)]
pub struct TicketingConfig {
    /// Base URL of the ticketing system, serving both the API and the
    /// agent web UI.
    pub base_url: String,

    /// API token used as the bearer credential.
    pub api_token: SecretString,
}

impl TicketingConfig {
    /// The agent-facing web URL for a ticket, used in comment bodies.
    pub fn ticket_url(&self, ticket_id: &TicketId) -> String {
        format!(
            "{}/agent/tickets/{}",
            self.base_url.trim_end_matches('/'),
            ticket_id
        )
    }

    /// Validate ticketing configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.base_url.is_empty() {
            return Err(ValidationError::MissingRequired("TICKETING_BASE_URL"));
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::InvalidTicketingBaseUrl);
        }
        if self.api_token.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("TICKETING_API_TOKEN"));
        }
        Ok(())
    }
}
