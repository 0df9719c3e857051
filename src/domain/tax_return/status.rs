//! TaxReturnStatus enum and its total order.
//!
//! Statuses carry numeric codes grouped into hundreds bands, one band
//! per processing stage. Comparisons always go through the codes, never
//! the declaration order or the names, so inserting a status into a
//! band later cannot silently reorder the lifecycle.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle status of a tax return.
///
/// The numeric code defines a strict total order; a return only ever
/// moves to statuses with a higher code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TaxReturnStatus {
    #[default]
    IntakeBeforeConsent,
    IntakeInProgress,
    IntakeOpen,
    IntakeReview,
    IntakeInfoRequested,
    PrepReadyForPrep,
    PrepPreparing,
    ReviewReadyForReview,
    ReviewReviewing,
    ReviewSignatureRequested,
    FileReadyToFile,
    FileEfiled,
    FileMailed,
    FileAccepted,
    FileRejected,
}

impl TaxReturnStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [TaxReturnStatus; 15] = [
        TaxReturnStatus::IntakeBeforeConsent,
        TaxReturnStatus::IntakeInProgress,
        TaxReturnStatus::IntakeOpen,
        TaxReturnStatus::IntakeReview,
        TaxReturnStatus::IntakeInfoRequested,
        TaxReturnStatus::PrepReadyForPrep,
        TaxReturnStatus::PrepPreparing,
        TaxReturnStatus::ReviewReadyForReview,
        TaxReturnStatus::ReviewReviewing,
        TaxReturnStatus::ReviewSignatureRequested,
        TaxReturnStatus::FileReadyToFile,
        TaxReturnStatus::FileEfiled,
        TaxReturnStatus::FileMailed,
        TaxReturnStatus::FileAccepted,
        TaxReturnStatus::FileRejected,
    ];

    /// Returns the status's numeric code.
    pub fn code(&self) -> u16 {
        match self {
            TaxReturnStatus::IntakeBeforeConsent => 100,
            TaxReturnStatus::IntakeInProgress => 101,
            TaxReturnStatus::IntakeOpen => 102,
            TaxReturnStatus::IntakeReview => 103,
            TaxReturnStatus::IntakeInfoRequested => 104,
            TaxReturnStatus::PrepReadyForPrep => 201,
            TaxReturnStatus::PrepPreparing => 202,
            TaxReturnStatus::ReviewReadyForReview => 301,
            TaxReturnStatus::ReviewReviewing => 302,
            TaxReturnStatus::ReviewSignatureRequested => 303,
            TaxReturnStatus::FileReadyToFile => 401,
            TaxReturnStatus::FileEfiled => 402,
            TaxReturnStatus::FileMailed => 403,
            TaxReturnStatus::FileAccepted => 404,
            TaxReturnStatus::FileRejected => 405,
        }
    }

    /// Returns the status for a numeric code, if one is defined.
    pub fn from_code(code: u16) -> Option<TaxReturnStatus> {
        Self::ALL.iter().copied().find(|status| status.code() == code)
    }

    /// Returns the processing stage (the hundreds band).
    pub fn stage(&self) -> Stage {
        match self.code() / 100 {
            1 => Stage::Intake,
            2 => Stage::Prep,
            3 => Stage::Review,
            _ => Stage::File,
        }
    }

    /// Returns true if advancing to `target` would move forward.
    ///
    /// Equal or lower targets are not an error, just not an advance;
    /// callers treat them as a no-op.
    pub fn can_advance_to(&self, target: TaxReturnStatus) -> bool {
        target.code() > self.code()
    }

    /// Returns true once the client's case has been opened for work,
    /// i.e. the status is at or past `intake_open`.
    pub fn is_open_or_later(&self) -> bool {
        self.code() >= TaxReturnStatus::IntakeOpen.code()
    }
}

impl PartialOrd for TaxReturnStatus {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TaxReturnStatus {
    fn cmp(&self, other: &Self) -> Ordering {
        self.code().cmp(&other.code())
    }
}

impl fmt::Display for TaxReturnStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TaxReturnStatus::IntakeBeforeConsent => "Intake: Before consent",
            TaxReturnStatus::IntakeInProgress => "Intake: In progress",
            TaxReturnStatus::IntakeOpen => "Intake: Open",
            TaxReturnStatus::IntakeReview => "Intake: Review",
            TaxReturnStatus::IntakeInfoRequested => "Intake: Info requested",
            TaxReturnStatus::PrepReadyForPrep => "Prep: Ready for prep",
            TaxReturnStatus::PrepPreparing => "Prep: Preparing",
            TaxReturnStatus::ReviewReadyForReview => "Review: Ready for review",
            TaxReturnStatus::ReviewReviewing => "Review: Reviewing",
            TaxReturnStatus::ReviewSignatureRequested => "Review: Signature requested",
            TaxReturnStatus::FileReadyToFile => "File: Ready to file",
            TaxReturnStatus::FileEfiled => "File: E-filed",
            TaxReturnStatus::FileMailed => "File: Mailed",
            TaxReturnStatus::FileAccepted => "File: Accepted",
            TaxReturnStatus::FileRejected => "File: Rejected",
        };
        write!(f, "{}", s)
    }
}

/// Processing stage a status belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Intake,
    Prep,
    Review,
    File,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Stage::Intake => "Intake",
            Stage::Prep => "Prep",
            Stage::Review => "Review",
            Stage::File => "File",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_intake_before_consent() {
        assert_eq!(
            TaxReturnStatus::default(),
            TaxReturnStatus::IntakeBeforeConsent
        );
    }

    #[test]
    fn all_lists_fifteen_statuses_in_code_order() {
        assert_eq!(TaxReturnStatus::ALL.len(), 15);
        for pair in TaxReturnStatus::ALL.windows(2) {
            assert!(pair[0].code() < pair[1].code());
        }
    }

    #[test]
    fn codes_round_trip() {
        for status in TaxReturnStatus::ALL {
            assert_eq!(TaxReturnStatus::from_code(status.code()), Some(status));
        }
    }

    #[test]
    fn from_code_rejects_unknown_codes() {
        assert_eq!(TaxReturnStatus::from_code(0), None);
        assert_eq!(TaxReturnStatus::from_code(105), None);
        assert_eq!(TaxReturnStatus::from_code(500), None);
    }

    #[test]
    fn ordering_follows_codes_across_bands() {
        assert!(TaxReturnStatus::IntakeBeforeConsent < TaxReturnStatus::IntakeInProgress);
        assert!(TaxReturnStatus::IntakeInfoRequested < TaxReturnStatus::PrepReadyForPrep);
        assert!(TaxReturnStatus::ReviewSignatureRequested < TaxReturnStatus::FileReadyToFile);
        assert!(TaxReturnStatus::FileAccepted < TaxReturnStatus::FileRejected);
    }

    #[test]
    fn can_advance_to_requires_strictly_greater_code() {
        assert!(TaxReturnStatus::IntakeInProgress.can_advance_to(TaxReturnStatus::IntakeOpen));
        assert!(!TaxReturnStatus::IntakeInProgress
            .can_advance_to(TaxReturnStatus::IntakeInProgress));
        assert!(!TaxReturnStatus::IntakeInProgress
            .can_advance_to(TaxReturnStatus::IntakeBeforeConsent));
    }

    #[test]
    fn stage_is_the_hundreds_band() {
        assert_eq!(TaxReturnStatus::IntakeInfoRequested.stage(), Stage::Intake);
        assert_eq!(TaxReturnStatus::PrepPreparing.stage(), Stage::Prep);
        assert_eq!(TaxReturnStatus::ReviewReviewing.stage(), Stage::Review);
        assert_eq!(TaxReturnStatus::FileRejected.stage(), Stage::File);
    }

    #[test]
    fn open_or_later_starts_at_intake_open() {
        assert!(!TaxReturnStatus::IntakeBeforeConsent.is_open_or_later());
        assert!(!TaxReturnStatus::IntakeInProgress.is_open_or_later());
        assert!(TaxReturnStatus::IntakeOpen.is_open_or_later());
        assert!(TaxReturnStatus::FileAccepted.is_open_or_later());
    }

    #[test]
    fn serializes_to_snake_case_json() {
        assert_eq!(
            serde_json::to_string(&TaxReturnStatus::IntakeBeforeConsent).unwrap(),
            "\"intake_before_consent\""
        );
        assert_eq!(
            serde_json::to_string(&TaxReturnStatus::FileEfiled).unwrap(),
            "\"file_efiled\""
        );
    }

    #[test]
    fn deserializes_from_snake_case_json() {
        let status: TaxReturnStatus =
            serde_json::from_str("\"review_signature_requested\"").unwrap();
        assert_eq!(status, TaxReturnStatus::ReviewSignatureRequested);
    }

    #[test]
    fn display_includes_the_stage() {
        assert_eq!(
            format!("{}", TaxReturnStatus::PrepReadyForPrep),
            "Prep: Ready for prep"
        );
        assert_eq!(format!("{}", Stage::Review), "Review");
    }
}
