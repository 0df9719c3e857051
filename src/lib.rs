//! Tax Intake - questionnaire navigation, return status progression,
//! and unsent-document reconciliation.
//!
//! The crate is laid out hexagonally: `domain` holds the aggregates and
//! pure rules, `ports` the async trait contracts, `application` the
//! command handlers, and `adapters` the Postgres, HTTP, and in-memory
//! implementations wired together at the composition root via `config`.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
