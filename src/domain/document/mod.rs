//! Document domain module.
//!
//! Uploaded-file metadata and the sync state the reconciliation run
//! works from. The file bytes themselves live in external storage;
//! this module only tracks what was uploaded and whether the client's
//! ticket knows about it yet.
//!
//! # Module Structure
//!
//! - `aggregate` - Document aggregate entity
//! - `document_type` - Document kinds, labels, and upload follow-ups
//! - `outstanding` - Unsynced-document rows and per-ticket grouping

mod aggregate;
mod document_type;
mod outstanding;

pub use aggregate::Document;
pub use document_type::{DocumentType, UploadAction};
pub use outstanding::{group_by_ticket, OutstandingDocument};
