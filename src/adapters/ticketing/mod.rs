//! Ticketing adapters - clients for the external case-management
//! system.

mod http_client;

pub use http_client::HttpTicketingClient;
