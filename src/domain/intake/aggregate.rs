//! IntakeAnswers aggregate entity.
//!
//! The accumulated questionnaire state for one client: keyed answers,
//! completed steps, the resume pointer, and the consent record. One
//! intake exists per client; it is updated in place and never deleted.
//!
//! # Resume pointer
//!
//! `current_step` caches the navigation engine's answer to "where is
//! this client?". The answer set stays the source of truth; the pointer
//! may always be recomputed from it.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    ClientId, DomainError, ErrorCode, IntakeId, StepId, TicketId, Timestamp,
};
use crate::domain::intake::{AnswerValue, Consent, PrimaryIdentity, QuestionKey, YesNo};

/// IntakeAnswers aggregate - one client's questionnaire state.
///
/// # Invariants
///
/// - Scoped to exactly one client
/// - Answers and completed steps only accumulate while the intake is open
/// - `completed_at` is set at most once, by the terminal step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntakeAnswers {
    /// Unique identifier for this intake.
    id: IntakeId,

    /// Client this intake belongs to.
    client_id: ClientId,

    /// Ticket in the external case-management system, once one exists.
    ticket_id: Option<TicketId>,

    /// Recorded answers, keyed by question.
    answers: BTreeMap<QuestionKey, AnswerValue>,

    /// Steps the client has explicitly completed.
    completed_steps: BTreeSet<StepId>,

    /// Resume pointer (cache over the navigation computation).
    current_step: Option<StepId>,

    /// Consent record, once given.
    consent: Option<Consent>,

    /// Primary filer identity, collected with consent.
    primary_identity: Option<PrimaryIdentity>,

    /// When the terminal step completed.
    completed_at: Option<Timestamp>,

    /// When the intake was created.
    created_at: Timestamp,

    /// When the intake was last updated.
    updated_at: Timestamp,
}

impl IntakeAnswers {
    /// Create a new, empty intake for a client.
    pub fn new(id: IntakeId, client_id: ClientId) -> Self {
        let now = Timestamp::now();
        Self {
            id,
            client_id,
            ticket_id: None,
            answers: BTreeMap::new(),
            completed_steps: BTreeSet::new(),
            current_step: None,
            consent: None,
            primary_identity: None,
            completed_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Reconstitute an intake from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: IntakeId,
        client_id: ClientId,
        ticket_id: Option<TicketId>,
        answers: BTreeMap<QuestionKey, AnswerValue>,
        completed_steps: BTreeSet<StepId>,
        current_step: Option<StepId>,
        consent: Option<Consent>,
        primary_identity: Option<PrimaryIdentity>,
        completed_at: Option<Timestamp>,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            client_id,
            ticket_id,
            answers,
            completed_steps,
            current_step,
            consent,
            primary_identity,
            completed_at,
            created_at,
            updated_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Returns the intake ID.
    pub fn id(&self) -> &IntakeId {
        &self.id
    }

    /// Returns the owning client's ID.
    pub fn client_id(&self) -> &ClientId {
        &self.client_id
    }

    /// Returns the external ticket id, if one has been assigned.
    pub fn ticket_id(&self) -> Option<&TicketId> {
        self.ticket_id.as_ref()
    }

    /// Returns the recorded answer for a question.
    pub fn answer(&self, key: QuestionKey) -> Option<&AnswerValue> {
        self.answers.get(&key)
    }

    /// Returns all recorded answers.
    pub fn answers(&self) -> &BTreeMap<QuestionKey, AnswerValue> {
        &self.answers
    }

    /// Returns the set of completed step ids.
    pub fn completed_steps(&self) -> &BTreeSet<StepId> {
        &self.completed_steps
    }

    /// Returns the resume pointer, if set.
    pub fn current_step(&self) -> Option<&StepId> {
        self.current_step.as_ref()
    }

    /// Returns the consent record, if given.
    pub fn consent(&self) -> Option<&Consent> {
        self.consent.as_ref()
    }

    /// Returns the primary filer identity, if collected.
    pub fn primary_identity(&self) -> Option<&PrimaryIdentity> {
        self.primary_identity.as_ref()
    }

    /// Returns when the intake completed, if it has.
    pub fn completed_at(&self) -> Option<&Timestamp> {
        self.completed_at.as_ref()
    }

    /// Returns when the intake was created.
    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    /// Returns when the intake was last updated.
    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    /// Returns true once the terminal step has completed.
    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────────────────────

    /// Returns true if the question holds a filled answer.
    pub fn is_answered(&self, key: QuestionKey) -> bool {
        self.answers
            .get(&key)
            .map(AnswerValue::is_filled)
            .unwrap_or(false)
    }

    /// Returns true if the question was answered yes.
    pub fn is_answered_yes(&self, key: QuestionKey) -> bool {
        self.answers.get(&key).and_then(AnswerValue::as_yes_no) == Some(YesNo::Yes)
    }

    /// Returns true if the question was answered no.
    pub fn is_answered_no(&self, key: QuestionKey) -> bool {
        self.answers.get(&key).and_then(AnswerValue::as_yes_no) == Some(YesNo::No)
    }

    /// Returns true if the step has been explicitly completed.
    pub fn has_completed_step(&self, step_id: &StepId) -> bool {
        self.completed_steps.contains(step_id)
    }

    /// Returns true when the consent form has supplied everything the
    /// `intake_open` status gate requires: consent itself plus the
    /// primary filer's name, last-four SSN, and birth date.
    pub fn ready_for_open_status(&self) -> bool {
        self.consent.is_some() && self.primary_identity.is_some()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Record an answer, replacing any previous value for the key.
    ///
    /// # Errors
    ///
    /// - `IntakeCompleted` if the intake has already completed
    pub fn record_answer(
        &mut self,
        key: QuestionKey,
        value: AnswerValue,
    ) -> Result<Option<AnswerValue>, DomainError> {
        self.ensure_open()?;

        let old = self.answers.insert(key, value);
        self.updated_at = Timestamp::now();
        Ok(old)
    }

    /// Mark a step as completed.
    ///
    /// Returns true if the step was newly marked, false if it was
    /// already in the completed set.
    ///
    /// # Errors
    ///
    /// - `IntakeCompleted` if the intake has already completed
    pub fn mark_step_completed(&mut self, step_id: StepId) -> Result<bool, DomainError> {
        self.ensure_open()?;

        let newly_added = self.completed_steps.insert(step_id);
        if newly_added {
            self.updated_at = Timestamp::now();
        }
        Ok(newly_added)
    }

    /// Set the resume pointer.
    ///
    /// Infallible: the pointer is a cache, always safe to overwrite.
    pub fn set_current_step(&mut self, step_id: StepId) {
        self.current_step = Some(step_id);
        self.updated_at = Timestamp::now();
    }

    /// Assign the external ticket for this client.
    ///
    /// Idempotent for the same ticket id.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` if a different ticket is already assigned
    pub fn assign_ticket(&mut self, ticket_id: TicketId) -> Result<(), DomainError> {
        match &self.ticket_id {
            Some(existing) if *existing == ticket_id => Ok(()),
            Some(existing) => Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                "Intake is already linked to a different ticket",
            )
            .with_detail("existing_ticket_id", existing.to_string())
            .with_detail("ticket_id", ticket_id.to_string())),
            None => {
                self.ticket_id = Some(ticket_id);
                self.updated_at = Timestamp::now();
                Ok(())
            }
        }
    }

    /// Store the consent form: identity fields plus the consent record.
    ///
    /// Re-submitting the form overwrites the previous values.
    ///
    /// # Errors
    ///
    /// - `IntakeCompleted` if the intake has already completed
    pub fn record_consent(
        &mut self,
        identity: PrimaryIdentity,
        consent: Consent,
    ) -> Result<(), DomainError> {
        self.ensure_open()?;

        self.primary_identity = Some(identity);
        self.consent = Some(consent);
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Stamp the intake completed (terminal step reached).
    ///
    /// # Errors
    ///
    /// - `IntakeCompleted` if already completed
    pub fn mark_completed(&mut self) -> Result<(), DomainError> {
        if self.completed_at.is_some() {
            return Err(DomainError::new(
                ErrorCode::IntakeCompleted,
                "Intake has already completed",
            ));
        }

        let now = Timestamp::now();
        self.completed_at = Some(now);
        self.updated_at = now;
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Private helpers
    // ─────────────────────────────────────────────────────────────────────────

    /// Validates that the questionnaire can still be modified.
    fn ensure_open(&self) -> Result<(), DomainError> {
        if self.completed_at.is_none() {
            Ok(())
        } else {
            Err(DomainError::new(
                ErrorCode::IntakeCompleted,
                "Cannot modify a completed intake",
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::intake::LastFourSsn;
    use chrono::NaiveDate;

    fn test_intake() -> IntakeAnswers {
        IntakeAnswers::new(IntakeId::new(), ClientId::new())
    }

    fn test_identity() -> PrimaryIdentity {
        PrimaryIdentity::new(
            "Gary",
            "Gnome",
            LastFourSsn::new("1234").unwrap(),
            NaiveDate::from_ymd_opt(1983, 7, 4).unwrap(),
        )
        .unwrap()
    }

    fn test_consent() -> Consent {
        Consent::new(Timestamp::now(), "10.0.0.7").unwrap()
    }

    fn step(id: &str) -> StepId {
        StepId::new(id).unwrap()
    }

    // Construction tests

    #[test]
    fn new_intake_is_empty_and_open() {
        let intake = test_intake();
        assert!(intake.answers().is_empty());
        assert!(intake.completed_steps().is_empty());
        assert!(intake.current_step().is_none());
        assert!(intake.ticket_id().is_none());
        assert!(!intake.is_completed());
    }

    // Answer tests

    #[test]
    fn record_answer_returns_previous_value() {
        let mut intake = test_intake();
        let old = intake
            .record_answer(QuestionKey::HadWages, AnswerValue::yes())
            .unwrap();
        assert!(old.is_none());

        let old = intake
            .record_answer(QuestionKey::HadWages, AnswerValue::no())
            .unwrap();
        assert_eq!(old, Some(AnswerValue::yes()));
    }

    #[test]
    fn is_answered_yes_and_no_read_yes_no_answers() {
        let mut intake = test_intake();
        intake
            .record_answer(QuestionKey::HadWages, AnswerValue::yes())
            .unwrap();

        assert!(intake.is_answered(QuestionKey::HadWages));
        assert!(intake.is_answered_yes(QuestionKey::HadWages));
        assert!(!intake.is_answered_no(QuestionKey::HadWages));
    }

    #[test]
    fn unfilled_answer_counts_as_unanswered() {
        let mut intake = test_intake();
        intake
            .record_answer(QuestionKey::HadWages, AnswerValue::YesNo(YesNo::Unfilled))
            .unwrap();

        assert!(!intake.is_answered(QuestionKey::HadWages));
        assert!(!intake.is_answered_yes(QuestionKey::HadWages));
    }

    #[test]
    fn missing_answer_is_unanswered() {
        let intake = test_intake();
        assert!(!intake.is_answered(QuestionKey::AdditionalInfo));
        assert!(!intake.is_answered_yes(QuestionKey::AdditionalInfo));
        assert!(!intake.is_answered_no(QuestionKey::AdditionalInfo));
    }

    // Step completion tests

    #[test]
    fn mark_step_completed_is_idempotent() {
        let mut intake = test_intake();
        assert!(intake.mark_step_completed(step("/documents/w2s")).unwrap());
        assert!(!intake.mark_step_completed(step("/documents/w2s")).unwrap());
        assert!(intake.has_completed_step(&step("/documents/w2s")));
    }

    #[test]
    fn set_current_step_overwrites_pointer() {
        let mut intake = test_intake();
        intake.set_current_step(step("/questions/had-wages"));
        intake.set_current_step(step("/documents/w2s"));
        assert_eq!(intake.current_step(), Some(&step("/documents/w2s")));
    }

    // Ticket tests

    #[test]
    fn assign_ticket_sets_once() {
        let mut intake = test_intake();
        let ticket = TicketId::new("4521").unwrap();
        intake.assign_ticket(ticket.clone()).unwrap();
        assert_eq!(intake.ticket_id(), Some(&ticket));
    }

    #[test]
    fn assign_ticket_same_id_is_noop() {
        let mut intake = test_intake();
        let ticket = TicketId::new("4521").unwrap();
        intake.assign_ticket(ticket.clone()).unwrap();
        assert!(intake.assign_ticket(ticket).is_ok());
    }

    #[test]
    fn assign_ticket_different_id_fails() {
        let mut intake = test_intake();
        intake.assign_ticket(TicketId::new("4521").unwrap()).unwrap();
        let result = intake.assign_ticket(TicketId::new("9999").unwrap());
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().code, ErrorCode::InvalidStateTransition);
    }

    // Consent and readiness tests

    #[test]
    fn new_intake_is_not_ready_for_open_status() {
        assert!(!test_intake().ready_for_open_status());
    }

    #[test]
    fn consent_with_identity_makes_ready_for_open_status() {
        let mut intake = test_intake();
        intake.record_consent(test_identity(), test_consent()).unwrap();
        assert!(intake.ready_for_open_status());
        assert_eq!(intake.consent().unwrap().ip_address(), "10.0.0.7");
        assert_eq!(intake.primary_identity().unwrap().first_name(), "Gary");
    }

    #[test]
    fn record_consent_overwrites_previous_submission() {
        let mut intake = test_intake();
        intake.record_consent(test_identity(), test_consent()).unwrap();

        let resubmitted = Consent::new(Timestamp::now(), "10.0.0.8").unwrap();
        intake.record_consent(test_identity(), resubmitted).unwrap();
        assert_eq!(intake.consent().unwrap().ip_address(), "10.0.0.8");
    }

    // Completion tests

    #[test]
    fn mark_completed_stamps_timestamp() {
        let mut intake = test_intake();
        intake.mark_completed().unwrap();
        assert!(intake.is_completed());
        assert!(intake.completed_at().is_some());
    }

    #[test]
    fn mark_completed_twice_fails() {
        let mut intake = test_intake();
        intake.mark_completed().unwrap();
        let result = intake.mark_completed();
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().code, ErrorCode::IntakeCompleted);
    }

    #[test]
    fn completed_intake_rejects_new_answers() {
        let mut intake = test_intake();
        intake.mark_completed().unwrap();

        let result = intake.record_answer(QuestionKey::HadWages, AnswerValue::yes());
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().code, ErrorCode::IntakeCompleted);
    }

    #[test]
    fn completed_intake_rejects_step_completion() {
        let mut intake = test_intake();
        intake.mark_completed().unwrap();
        assert!(intake.mark_step_completed(step("/documents/ids")).is_err());
    }

    #[test]
    fn completed_intake_rejects_consent() {
        let mut intake = test_intake();
        intake.mark_completed().unwrap();
        assert!(intake.record_consent(test_identity(), test_consent()).is_err());
    }

    // Reconstitution test

    #[test]
    fn reconstitute_preserves_all_fields() {
        let id = IntakeId::new();
        let client_id = ClientId::new();
        let ticket = TicketId::new("4521").unwrap();
        let mut answers = BTreeMap::new();
        answers.insert(QuestionKey::HadWages, AnswerValue::yes());
        let mut completed = BTreeSet::new();
        completed.insert(step("/questions/had-wages"));
        let now = Timestamp::now();

        let intake = IntakeAnswers::reconstitute(
            id,
            client_id,
            Some(ticket.clone()),
            answers,
            completed,
            Some(step("/documents/w2s")),
            Some(test_consent()),
            Some(test_identity()),
            None,
            now,
            now,
        );

        assert_eq!(intake.id(), &id);
        assert_eq!(intake.client_id(), &client_id);
        assert_eq!(intake.ticket_id(), Some(&ticket));
        assert!(intake.is_answered_yes(QuestionKey::HadWages));
        assert!(intake.has_completed_step(&step("/questions/had-wages")));
        assert_eq!(intake.current_step(), Some(&step("/documents/w2s")));
        assert!(intake.ready_for_open_status());
        assert!(!intake.is_completed());
    }
}
