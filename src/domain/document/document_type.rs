//! DocumentType enum - the kinds of documents clients upload.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::tax_return::TaxReturnStatus;

/// Kind of document attached to a client's case.
///
/// The `key` is the stable identifier used in persistence and ticket
/// comments; the `label` is the human name shown next to filenames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    SsnItin,
    PictureId,
    W2,
    Form1099,
    Ssa1099,
    Selfie,
    UnsignedForm8879,
    CompletedForm8879,
    FinalTaxDocument,
    Other,
}

impl DocumentType {
    /// Every document type.
    pub const ALL: [DocumentType; 10] = [
        DocumentType::SsnItin,
        DocumentType::PictureId,
        DocumentType::W2,
        DocumentType::Form1099,
        DocumentType::Ssa1099,
        DocumentType::Selfie,
        DocumentType::UnsignedForm8879,
        DocumentType::CompletedForm8879,
        DocumentType::FinalTaxDocument,
        DocumentType::Other,
    ];

    /// Returns the stable key for this type.
    pub fn key(&self) -> &'static str {
        match self {
            DocumentType::SsnItin => "ssn_itin",
            DocumentType::PictureId => "picture_id",
            DocumentType::W2 => "w2",
            DocumentType::Form1099 => "form1099",
            DocumentType::Ssa1099 => "ssa1099",
            DocumentType::Selfie => "selfie",
            DocumentType::UnsignedForm8879 => "unsigned_form8879",
            DocumentType::CompletedForm8879 => "completed_form8879",
            DocumentType::FinalTaxDocument => "final_tax_document",
            DocumentType::Other => "other",
        }
    }

    /// Returns the type for a stable key, if one is defined.
    pub fn from_key(key: &str) -> Option<DocumentType> {
        Self::ALL.iter().copied().find(|dt| dt.key() == key)
    }

    /// Returns the human label shown in ticket comments.
    pub fn label(&self) -> &'static str {
        match self {
            DocumentType::SsnItin => "SSN or ITIN",
            DocumentType::PictureId => "ID",
            DocumentType::W2 => "W-2",
            DocumentType::Form1099 => "1099",
            DocumentType::Ssa1099 => "SSA-1099",
            DocumentType::Selfie => "Selfie",
            DocumentType::UnsignedForm8879 => "Form 8879 (Unsigned)",
            DocumentType::CompletedForm8879 => "Form 8879 (Signed)",
            DocumentType::FinalTaxDocument => "Final Tax Document",
            DocumentType::Other => "Other",
        }
    }

    /// Returns the follow-up a successful upload of this type triggers,
    /// if any.
    ///
    /// SSN/ITIN uploads are the last identity item collected, so they
    /// try to open the client's cases for work.
    pub fn upload_action(&self) -> Option<UploadAction> {
        match self {
            DocumentType::SsnItin => {
                Some(UploadAction::AdvanceIfReady(TaxReturnStatus::IntakeOpen))
            }
            _ => None,
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Follow-up triggered by a successful document upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadAction {
    /// Advance the client's returns to the given status, provided the
    /// intake's readiness gate allows it.
    AdvanceIfReady(TaxReturnStatus),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_round_trip() {
        for document_type in DocumentType::ALL {
            assert_eq!(
                DocumentType::from_key(document_type.key()),
                Some(document_type)
            );
        }
    }

    #[test]
    fn from_key_rejects_unknown_keys() {
        assert_eq!(DocumentType::from_key("w3"), None);
        assert_eq!(DocumentType::from_key(""), None);
    }

    #[test]
    fn serde_representation_matches_key() {
        for document_type in DocumentType::ALL {
            let json = serde_json::to_string(&document_type).unwrap();
            assert_eq!(json, format!("\"{}\"", document_type.key()));
        }
    }

    #[test]
    fn labels_are_human_readable() {
        assert_eq!(DocumentType::W2.label(), "W-2");
        assert_eq!(DocumentType::SsnItin.label(), "SSN or ITIN");
        assert_eq!(DocumentType::CompletedForm8879.label(), "Form 8879 (Signed)");
    }

    #[test]
    fn display_uses_the_label() {
        assert_eq!(format!("{}", DocumentType::PictureId), "ID");
    }

    #[test]
    fn only_ssn_itin_uploads_trigger_advancement() {
        assert_eq!(
            DocumentType::SsnItin.upload_action(),
            Some(UploadAction::AdvanceIfReady(TaxReturnStatus::IntakeOpen))
        );
        for document_type in DocumentType::ALL {
            if document_type != DocumentType::SsnItin {
                assert_eq!(document_type.upload_action(), None);
            }
        }
    }
}
