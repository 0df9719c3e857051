//! Tax return domain module.
//!
//! Tracks each client's case through the ordered status lifecycle, from
//! first contact through filing. Status comparisons use numeric codes
//! so advancement is monotonic by construction.
//!
//! # Module Structure
//!
//! - `aggregate` - TaxReturn aggregate entity
//! - `status` - TaxReturnStatus total order and stages
//! - `signature` - Signature value object

mod aggregate;
mod signature;
mod status;

pub use aggregate::{TaxReturn, MAX_TAX_YEAR, MIN_TAX_YEAR};
pub use signature::Signature;
pub use status::{Stage, TaxReturnStatus};
