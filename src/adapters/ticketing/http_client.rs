//! HTTP ticketing client adapter.
//!
//! Implements the `TicketingClient` port against the external
//! case-management REST API. Comments are appended as internal
//! (non-public) notes so clients never see reconciliation chatter.
//!
//! # Security
//!
//! The API token is held via `secrecy::SecretString` and sent as a
//! bearer credential; it never appears in logs or error details.

use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde_json::json;

use crate::config::TicketingConfig;
use crate::domain::foundation::{DomainError, ErrorCode, TicketId};
use crate::ports::TicketingClient;

/// HTTP implementation of the TicketingClient port.
pub struct HttpTicketingClient {
    config: TicketingConfig,
    http_client: reqwest::Client,
}

impl HttpTicketingClient {
    /// Create a new client from ticketing configuration.
    pub fn new(config: TicketingConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl TicketingClient for HttpTicketingClient {
    async fn append_comment(&self, ticket_id: &TicketId, body: &str) -> Result<(), DomainError> {
        let url = format!(
            "{}/api/v2/tickets/{}",
            self.config.base_url.trim_end_matches('/'),
            ticket_id
        );

        let payload = json!({
            "ticket": {
                "comment": {
                    "body": body,
                    "public": false,
                }
            }
        });

        let response = self
            .http_client
            .put(&url)
            .bearer_auth(self.config.api_token.expose_secret())
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::TicketingError,
                    format!("Ticketing request failed: {}", e),
                )
                .with_detail("ticket_id", ticket_id.to_string())
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!(
                ticket_id = %ticket_id,
                status = %status,
                error = %error_text,
                "Ticketing comment append rejected"
            );
            return Err(DomainError::new(
                ErrorCode::TicketingError,
                format!("Ticketing API error: {}", status),
            )
            .with_detail("ticket_id", ticket_id.to_string())
            .with_detail("status", status.as_u16().to_string()));
        }

        Ok(())
    }

    fn ticket_url(&self, ticket_id: &TicketId) -> String {
        self.config.ticket_url(ticket_id)
    }
}
