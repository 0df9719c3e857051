//! RecordConsentHandler - Command handler for the consent form.
//!
//! Consent is the first thing collected: the client agrees to service
//! and supplies the primary filer's identity fields in one submission.
//! Once stored, every one of the client's returns moves to
//! `intake_in_progress`.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::foundation::{ClientId, DomainError, ErrorCode, Timestamp};
use crate::domain::intake::{Consent, LastFourSsn, PrimaryIdentity};
use crate::domain::tax_return::TaxReturnStatus;
use crate::application::handlers::AdvanceTaxReturnStatuses;
use crate::ports::IntakeRepository;

/// Command carrying the consent form's fields.
#[derive(Debug, Clone)]
pub struct RecordConsentCommand {
    pub client_id: ClientId,
    pub first_name: String,
    pub last_name: String,
    pub last_four_ssn: String,
    pub birth_date: NaiveDate,
    /// Address the consent was submitted from.
    pub ip_address: String,
}

/// Result of recording consent.
#[derive(Debug, Clone)]
pub struct RecordConsentResult {
    /// How many of the client's returns advanced.
    pub returns_advanced: u64,
}

/// Handler for consent-form submissions.
pub struct RecordConsentHandler {
    intakes: Arc<dyn IntakeRepository>,
    advance: Arc<AdvanceTaxReturnStatuses>,
}

impl RecordConsentHandler {
    pub fn new(intakes: Arc<dyn IntakeRepository>, advance: Arc<AdvanceTaxReturnStatuses>) -> Self {
        Self { intakes, advance }
    }

    /// Record consent and push the client's returns forward.
    ///
    /// Re-submitting overwrites the previous consent record; the status
    /// advancement is idempotent either way.
    ///
    /// # Errors
    ///
    /// - `IntakeNotFound` if the client has no intake
    /// - Validation codes (`EMPTY_FIELD`, `INVALID_FORMAT`) for bad form fields
    /// - `IntakeCompleted` if the intake has already completed
    /// - `DatabaseError` on persistence failure
    pub async fn handle(
        &self,
        cmd: RecordConsentCommand,
    ) -> Result<RecordConsentResult, DomainError> {
        let mut intake = self
            .intakes
            .find_by_client(&cmd.client_id)
            .await?
            .ok_or_else(|| {
                DomainError::new(ErrorCode::IntakeNotFound, "No intake found for client")
                    .with_detail("client_id", cmd.client_id.to_string())
            })?;

        let identity = PrimaryIdentity::new(
            cmd.first_name,
            cmd.last_name,
            LastFourSsn::new(&cmd.last_four_ssn)?,
            cmd.birth_date,
        )?;
        let consent = Consent::new(Timestamp::now(), cmd.ip_address)?;

        intake.record_consent(identity, consent)?;
        self.intakes.save(&intake).await?;

        let returns_advanced = self
            .advance
            .advance_all_for_client(&cmd.client_id, TaxReturnStatus::IntakeInProgress)
            .await?;

        Ok(RecordConsentResult { returns_advanced })
    }
}
