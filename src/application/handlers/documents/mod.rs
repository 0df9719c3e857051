//! Document handlers.

mod record_upload;

pub use record_upload::{
    RecordDocumentUploadCommand, RecordDocumentUploadHandler, RecordDocumentUploadResult,
};
