//! AdvanceTaxReturnStatuses - Status progression over a client's returns.
//!
//! Several triggers want to push a client's returns forward: consent
//! being given, identity documents arriving, intake completing. They
//! all funnel through this service so the monotonic rule lives in one
//! place; callers may fire redundantly without risk.

use std::sync::Arc;

use crate::domain::foundation::{ClientId, DomainError};
use crate::domain::tax_return::TaxReturnStatus;
use crate::ports::{IntakeRepository, TaxReturnRepository};

/// Service that advances a client's returns along the status order.
pub struct AdvanceTaxReturnStatuses {
    intakes: Arc<dyn IntakeRepository>,
    tax_returns: Arc<dyn TaxReturnRepository>,
}

impl AdvanceTaxReturnStatuses {
    pub fn new(
        intakes: Arc<dyn IntakeRepository>,
        tax_returns: Arc<dyn TaxReturnRepository>,
    ) -> Self {
        Self {
            intakes,
            tax_returns,
        }
    }

    /// Advance every one of the client's returns to at least `target`.
    ///
    /// Returns below the target move up to it; returns already at or
    /// past it are untouched. Only changed returns are written, each as
    /// its own atomic save, so a failure partway through leaves earlier
    /// advances in place and the call safe to retry.
    ///
    /// Returns the number of returns that changed.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    pub async fn advance_all_for_client(
        &self,
        client_id: &ClientId,
        target: TaxReturnStatus,
    ) -> Result<u64, DomainError> {
        let mut advanced = 0;

        for mut tax_return in self.tax_returns.find_by_client(client_id).await? {
            if tax_return.advance_status_to(target) {
                self.tax_returns.save(&tax_return).await?;
                advanced += 1;
            }
        }

        Ok(advanced)
    }

    /// Advance the client's returns to `target`, but only once the
    /// intake's readiness gate allows it.
    ///
    /// Targets at or past `intake_open` require the consent form to be
    /// on file (consent plus the primary filer's identity fields). The
    /// gate is evaluated at call time, never cached, so supplying the
    /// missing data later and re-triggering the call is enough to
    /// unstick a case. A closed gate is a no-op, not an error.
    ///
    /// Returns the number of returns that changed.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    pub async fn advance_if_ready(
        &self,
        client_id: &ClientId,
        target: TaxReturnStatus,
    ) -> Result<u64, DomainError> {
        if target.is_open_or_later() {
            let ready = match self.intakes.find_by_client(client_id).await? {
                Some(intake) => intake.ready_for_open_status(),
                None => false,
            };
            if !ready {
                return Ok(0);
            }
        }

        self.advance_all_for_client(client_id, target).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{ErrorCode, IntakeId, TaxReturnId, Timestamp};
    use crate::domain::intake::{Consent, IntakeAnswers, LastFourSsn, PrimaryIdentity};
    use crate::domain::tax_return::TaxReturn;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::sync::Mutex;

    struct MockIntakeRepository {
        intake: Option<IntakeAnswers>,
    }

    impl MockIntakeRepository {
        fn empty() -> Self {
            Self { intake: None }
        }

        fn with(intake: IntakeAnswers) -> Self {
            Self {
                intake: Some(intake),
            }
        }
    }

    #[async_trait]
    impl IntakeRepository for MockIntakeRepository {
        async fn find_by_client(
            &self,
            _client_id: &ClientId,
        ) -> Result<Option<IntakeAnswers>, DomainError> {
            Ok(self.intake.clone())
        }

        async fn save(&self, _intake: &IntakeAnswers) -> Result<(), DomainError> {
            Ok(())
        }
    }

    struct MockTaxReturnRepository {
        returns: Mutex<Vec<TaxReturn>>,
        saved: Mutex<Vec<TaxReturn>>,
        fail_save: bool,
    }

    impl MockTaxReturnRepository {
        fn with(returns: Vec<TaxReturn>) -> Self {
            Self {
                returns: Mutex::new(returns),
                saved: Mutex::new(Vec::new()),
                fail_save: false,
            }
        }

        fn failing(returns: Vec<TaxReturn>) -> Self {
            Self {
                returns: Mutex::new(returns),
                saved: Mutex::new(Vec::new()),
                fail_save: true,
            }
        }

        fn saved(&self) -> Vec<TaxReturn> {
            self.saved.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl TaxReturnRepository for MockTaxReturnRepository {
        async fn find_by_id(&self, id: &TaxReturnId) -> Result<Option<TaxReturn>, DomainError> {
            Ok(self
                .returns
                .lock()
                .unwrap()
                .iter()
                .find(|r| r.id() == id)
                .cloned())
        }

        async fn find_by_client(
            &self,
            client_id: &ClientId,
        ) -> Result<Vec<TaxReturn>, DomainError> {
            Ok(self
                .returns
                .lock()
                .unwrap()
                .iter()
                .filter(|r| r.client_id() == client_id)
                .cloned()
                .collect())
        }

        async fn save(&self, tax_return: &TaxReturn) -> Result<(), DomainError> {
            if self.fail_save {
                return Err(DomainError::new(
                    ErrorCode::DatabaseError,
                    "Simulated save failure",
                ));
            }
            self.saved.lock().unwrap().push(tax_return.clone());
            Ok(())
        }
    }

    fn return_with_status(client_id: ClientId, year: u16, status: TaxReturnStatus) -> TaxReturn {
        let mut tax_return = TaxReturn::new(TaxReturnId::new(), client_id, year).unwrap();
        tax_return.advance_status_to(status);
        tax_return
    }

    fn ready_intake(client_id: ClientId) -> IntakeAnswers {
        let mut intake = IntakeAnswers::new(IntakeId::new(), client_id);
        let identity = PrimaryIdentity::new(
            "Gary",
            "Gnome",
            LastFourSsn::new("1234").unwrap(),
            NaiveDate::from_ymd_opt(1983, 7, 4).unwrap(),
        )
        .unwrap();
        let consent = Consent::new(Timestamp::now(), "10.0.0.7").unwrap();
        intake.record_consent(identity, consent).unwrap();
        intake
    }

    #[tokio::test]
    async fn advances_every_return_below_the_target() {
        let client_id = ClientId::new();
        let returns = vec![
            return_with_status(client_id, 2022, TaxReturnStatus::IntakeBeforeConsent),
            return_with_status(client_id, 2023, TaxReturnStatus::IntakeBeforeConsent),
        ];
        let tax_returns = Arc::new(MockTaxReturnRepository::with(returns));
        let service = AdvanceTaxReturnStatuses::new(
            Arc::new(MockIntakeRepository::empty()),
            tax_returns.clone(),
        );

        let advanced = service
            .advance_all_for_client(&client_id, TaxReturnStatus::IntakeInProgress)
            .await
            .unwrap();

        assert_eq!(advanced, 2);
        let saved = tax_returns.saved();
        assert_eq!(saved.len(), 2);
        assert!(saved
            .iter()
            .all(|r| r.status() == TaxReturnStatus::IntakeInProgress));
    }

    #[tokio::test]
    async fn leaves_returns_already_at_or_past_the_target_alone() {
        let client_id = ClientId::new();
        let returns = vec![
            return_with_status(client_id, 2022, TaxReturnStatus::PrepPreparing),
            return_with_status(client_id, 2023, TaxReturnStatus::IntakeInProgress),
        ];
        let tax_returns = Arc::new(MockTaxReturnRepository::with(returns));
        let service = AdvanceTaxReturnStatuses::new(
            Arc::new(MockIntakeRepository::empty()),
            tax_returns.clone(),
        );

        let advanced = service
            .advance_all_for_client(&client_id, TaxReturnStatus::IntakeInProgress)
            .await
            .unwrap();

        assert_eq!(advanced, 0);
        assert!(tax_returns.saved().is_empty());
    }

    #[tokio::test]
    async fn repeated_call_is_idempotent() {
        let client_id = ClientId::new();
        let returns = vec![return_with_status(
            client_id,
            2023,
            TaxReturnStatus::IntakeBeforeConsent,
        )];
        let tax_returns = Arc::new(MockTaxReturnRepository::with(returns));
        let service = AdvanceTaxReturnStatuses::new(
            Arc::new(MockIntakeRepository::empty()),
            tax_returns.clone(),
        );

        let first = service
            .advance_all_for_client(&client_id, TaxReturnStatus::IntakeOpen)
            .await
            .unwrap();
        assert_eq!(first, 1);

        // The mock returns the original rows, so re-running against the
        // already-advanced state is simulated via a fresh service over
        // the saved rows.
        let tax_returns = Arc::new(MockTaxReturnRepository::with(tax_returns.saved()));
        let service = AdvanceTaxReturnStatuses::new(
            Arc::new(MockIntakeRepository::empty()),
            tax_returns.clone(),
        );
        let second = service
            .advance_all_for_client(&client_id, TaxReturnStatus::IntakeOpen)
            .await
            .unwrap();
        assert_eq!(second, 0);
        assert!(tax_returns.saved().is_empty());
    }

    #[tokio::test]
    async fn gate_stays_closed_without_an_intake() {
        let client_id = ClientId::new();
        let returns = vec![return_with_status(
            client_id,
            2023,
            TaxReturnStatus::IntakeInProgress,
        )];
        let tax_returns = Arc::new(MockTaxReturnRepository::with(returns));
        let service = AdvanceTaxReturnStatuses::new(
            Arc::new(MockIntakeRepository::empty()),
            tax_returns.clone(),
        );

        let advanced = service
            .advance_if_ready(&client_id, TaxReturnStatus::IntakeOpen)
            .await
            .unwrap();

        assert_eq!(advanced, 0);
        assert!(tax_returns.saved().is_empty());
    }

    #[tokio::test]
    async fn gate_stays_closed_without_consent_on_file() {
        let client_id = ClientId::new();
        let intake = IntakeAnswers::new(IntakeId::new(), client_id);
        let returns = vec![return_with_status(
            client_id,
            2023,
            TaxReturnStatus::IntakeInProgress,
        )];
        let tax_returns = Arc::new(MockTaxReturnRepository::with(returns));
        let service = AdvanceTaxReturnStatuses::new(
            Arc::new(MockIntakeRepository::with(intake)),
            tax_returns.clone(),
        );

        let advanced = service
            .advance_if_ready(&client_id, TaxReturnStatus::IntakeOpen)
            .await
            .unwrap();

        assert_eq!(advanced, 0);
        assert!(tax_returns.saved().is_empty());
    }

    #[tokio::test]
    async fn gate_opens_once_the_consent_form_is_complete() {
        let client_id = ClientId::new();
        let returns = vec![return_with_status(
            client_id,
            2023,
            TaxReturnStatus::IntakeInProgress,
        )];
        let tax_returns = Arc::new(MockTaxReturnRepository::with(returns));
        let service = AdvanceTaxReturnStatuses::new(
            Arc::new(MockIntakeRepository::with(ready_intake(client_id))),
            tax_returns.clone(),
        );

        let advanced = service
            .advance_if_ready(&client_id, TaxReturnStatus::IntakeOpen)
            .await
            .unwrap();

        assert_eq!(advanced, 1);
        assert_eq!(
            tax_returns.saved()[0].status(),
            TaxReturnStatus::IntakeOpen
        );
    }

    #[tokio::test]
    async fn targets_before_intake_open_bypass_the_gate() {
        let client_id = ClientId::new();
        let returns = vec![return_with_status(
            client_id,
            2023,
            TaxReturnStatus::IntakeBeforeConsent,
        )];
        let tax_returns = Arc::new(MockTaxReturnRepository::with(returns));
        let service = AdvanceTaxReturnStatuses::new(
            Arc::new(MockIntakeRepository::empty()),
            tax_returns.clone(),
        );

        let advanced = service
            .advance_if_ready(&client_id, TaxReturnStatus::IntakeInProgress)
            .await
            .unwrap();

        assert_eq!(advanced, 1);
    }

    #[tokio::test]
    async fn save_failure_propagates() {
        let client_id = ClientId::new();
        let returns = vec![return_with_status(
            client_id,
            2023,
            TaxReturnStatus::IntakeBeforeConsent,
        )];
        let tax_returns = Arc::new(MockTaxReturnRepository::failing(returns));
        let service =
            AdvanceTaxReturnStatuses::new(Arc::new(MockIntakeRepository::empty()), tax_returns);

        let result = service
            .advance_all_for_client(&client_id, TaxReturnStatus::IntakeInProgress)
            .await;

        assert!(result.is_err());
        assert_eq!(result.unwrap_err().code, ErrorCode::DatabaseError);
    }
}
