//! Tax return status handlers.

mod advance_statuses;

pub use advance_statuses::AdvanceTaxReturnStatuses;
