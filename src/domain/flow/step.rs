//! Step definitions for the intake flow.

use crate::domain::document::DocumentType;
use crate::domain::flow::Condition;
use crate::domain::foundation::StepId;
use crate::domain::intake::{IntakeAnswers, QuestionKey};

/// What a step collects from the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepKind {
    /// Asks one question, recorded under `key`.
    Question { key: QuestionKey },
    /// Collects uploads of one document type.
    DocumentUpload { document_type: DocumentType },
    /// Final confirmation page; completing it finishes the intake.
    Terminal,
}

/// One step in the intake flow.
///
/// A step is pure definition: its id, what it collects, and the
/// condition under which it applies. Whether a given client has
/// satisfied it is a function of their [`IntakeAnswers`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    id: StepId,
    kind: StepKind,
    condition: Condition,
}

impl Step {
    /// Create a question step that always applies.
    pub fn question(id: StepId, key: QuestionKey) -> Self {
        Self {
            id,
            kind: StepKind::Question { key },
            condition: Condition::Always,
        }
    }

    /// Create a document-upload step that always applies.
    pub fn document_upload(id: StepId, document_type: DocumentType) -> Self {
        Self {
            id,
            kind: StepKind::DocumentUpload { document_type },
            condition: Condition::Always,
        }
    }

    /// Create a terminal step. Must be placed last in a sequence.
    pub fn terminal(id: StepId) -> Self {
        Self {
            id,
            kind: StepKind::Terminal,
            condition: Condition::Always,
        }
    }

    /// Replace the step's applicability condition.
    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.condition = condition;
        self
    }

    /// Returns the step's id.
    pub fn id(&self) -> &StepId {
        &self.id
    }

    /// Returns what the step collects.
    pub fn kind(&self) -> &StepKind {
        &self.kind
    }

    /// Returns the step's applicability condition.
    pub fn condition(&self) -> &Condition {
        &self.condition
    }

    /// Returns the question key, for question steps.
    pub fn question_key(&self) -> Option<QuestionKey> {
        match &self.kind {
            StepKind::Question { key } => Some(*key),
            _ => None,
        }
    }

    /// Returns the collected document type, for upload steps.
    pub fn document_type(&self) -> Option<DocumentType> {
        match &self.kind {
            StepKind::DocumentUpload { document_type } => Some(*document_type),
            _ => None,
        }
    }

    /// Returns true for the terminal step.
    pub fn is_terminal(&self) -> bool {
        matches!(self.kind, StepKind::Terminal)
    }

    /// Returns true when this step applies to the given intake.
    pub fn is_applicable(&self, intake: &IntakeAnswers) -> bool {
        self.condition.evaluate(intake)
    }

    /// Returns true when the client has already dealt with this step.
    ///
    /// Question steps count as satisfied once their question holds a
    /// filled answer, or once the step is explicitly marked completed.
    /// Upload and terminal steps are satisfied only by the completion
    /// mark, since "no documents to upload" is a valid way through them.
    pub fn is_satisfied_by(&self, intake: &IntakeAnswers) -> bool {
        match &self.kind {
            StepKind::Question { key } => {
                intake.is_answered(*key) || intake.has_completed_step(&self.id)
            }
            StepKind::DocumentUpload { .. } | StepKind::Terminal => {
                intake.has_completed_step(&self.id)
            }
        }
    }
}

/// Where the flow sends the client next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// Present this step.
    Step(StepId),
    /// Nothing left to do; the intake is complete.
    Complete,
}

impl Destination {
    /// Returns the step id, unless the destination is `Complete`.
    pub fn step_id(&self) -> Option<&StepId> {
        match self {
            Destination::Step(id) => Some(id),
            Destination::Complete => None,
        }
    }

    /// Returns true for the `Complete` destination.
    pub fn is_complete(&self) -> bool {
        matches!(self, Destination::Complete)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{ClientId, IntakeId};
    use crate::domain::intake::AnswerValue;

    fn step_id(raw: &str) -> StepId {
        StepId::new(raw).unwrap()
    }

    fn empty_intake() -> IntakeAnswers {
        IntakeAnswers::new(IntakeId::new(), ClientId::new())
    }

    #[test]
    fn question_step_defaults_to_always_applicable() {
        let step = Step::question(step_id("/questions/had-wages"), QuestionKey::HadWages);
        assert!(step.is_applicable(&empty_intake()));
        assert_eq!(step.question_key(), Some(QuestionKey::HadWages));
        assert!(!step.is_terminal());
    }

    #[test]
    fn with_condition_replaces_applicability() {
        let step = Step::document_upload(step_id("/documents/w2s"), DocumentType::W2)
            .with_condition(Condition::AnsweredYes(QuestionKey::HadWages));
        assert!(!step.is_applicable(&empty_intake()));

        let mut intake = empty_intake();
        intake
            .record_answer(QuestionKey::HadWages, AnswerValue::yes())
            .unwrap();
        assert!(step.is_applicable(&intake));
    }

    #[test]
    fn question_step_satisfied_by_filled_answer() {
        let step = Step::question(step_id("/questions/had-wages"), QuestionKey::HadWages);
        let mut intake = empty_intake();
        assert!(!step.is_satisfied_by(&intake));

        intake
            .record_answer(QuestionKey::HadWages, AnswerValue::no())
            .unwrap();
        assert!(step.is_satisfied_by(&intake));
    }

    #[test]
    fn question_step_satisfied_by_completion_mark() {
        let step = Step::question(
            step_id("/questions/additional-info"),
            QuestionKey::AdditionalInfo,
        );
        let mut intake = empty_intake();
        intake
            .mark_step_completed(step_id("/questions/additional-info"))
            .unwrap();
        assert!(step.is_satisfied_by(&intake));
    }

    #[test]
    fn upload_step_requires_completion_mark() {
        let step = Step::document_upload(step_id("/documents/ids"), DocumentType::PictureId);
        let mut intake = empty_intake();
        assert!(!step.is_satisfied_by(&intake));

        intake.mark_step_completed(step_id("/documents/ids")).unwrap();
        assert!(step.is_satisfied_by(&intake));
    }

    #[test]
    fn terminal_step_requires_completion_mark() {
        let step = Step::terminal(step_id("/questions/successfully-submitted"));
        let mut intake = empty_intake();
        assert!(step.is_terminal());
        assert!(!step.is_satisfied_by(&intake));

        intake
            .mark_step_completed(step_id("/questions/successfully-submitted"))
            .unwrap();
        assert!(step.is_satisfied_by(&intake));
    }

    #[test]
    fn destination_step_id_extracts_step() {
        let destination = Destination::Step(step_id("/documents/w2s"));
        assert_eq!(destination.step_id(), Some(&step_id("/documents/w2s")));
        assert!(!destination.is_complete());
        assert!(Destination::Complete.is_complete());
        assert_eq!(Destination::Complete.step_id(), None);
    }
}
