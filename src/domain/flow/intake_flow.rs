//! The production intake flow definition.
//!
//! One place defines every step the questionnaire can show, in order.
//! Income questions come first so the document-upload steps they gate
//! can be skipped for clients they don't apply to; the always-required
//! uploads and the wrap-up question follow; the confirmation page
//! closes the flow.

use once_cell::sync::Lazy;

use crate::domain::document::DocumentType;
use crate::domain::flow::{Condition, FlowDefinitionError, Step, StepSequence};
use crate::domain::foundation::StepId;
use crate::domain::intake::QuestionKey;

/// The validated intake flow, built once on first use.
static INTAKE_FLOW: Lazy<StepSequence> =
    Lazy::new(|| build_intake_flow().expect("intake flow definition must be valid"));

/// Returns the intake flow.
pub fn intake_flow() -> &'static StepSequence {
    &INTAKE_FLOW
}

/// Builds the intake flow definition.
///
/// Exposed separately from the static so the definition itself can be
/// validated in tests.
///
/// # Errors
///
/// Returns a [`FlowDefinitionError`] if the definition is inconsistent;
/// this indicates a programming error in this module.
pub fn build_intake_flow() -> Result<StepSequence, FlowDefinitionError> {
    StepSequence::new(vec![
        Step::question(step_id("/questions/had-wages"), QuestionKey::HadWages),
        Step::document_upload(step_id("/documents/w2s"), DocumentType::W2)
            .with_condition(Condition::AnsweredYes(QuestionKey::HadWages)),
        Step::question(
            step_id("/questions/had-unemployment-income"),
            QuestionKey::HadUnemploymentIncome,
        ),
        Step::document_upload(step_id("/documents/form1099s"), DocumentType::Form1099)
            .with_condition(Condition::AnsweredYes(QuestionKey::HadUnemploymentIncome)),
        Step::question(
            step_id("/questions/had-social-security-income"),
            QuestionKey::HadSocialSecurityIncome,
        ),
        Step::document_upload(step_id("/documents/ssa-1099s"), DocumentType::Ssa1099)
            .with_condition(Condition::AnsweredYes(QuestionKey::HadSocialSecurityIncome)),
        Step::question(
            step_id("/questions/interview-scheduling"),
            QuestionKey::InterviewTimingPreference,
        ),
        Step::document_upload(step_id("/documents/ids"), DocumentType::PictureId),
        Step::document_upload(step_id("/documents/selfies"), DocumentType::Selfie),
        Step::document_upload(step_id("/documents/ssn-itins"), DocumentType::SsnItin),
        Step::question(
            step_id("/questions/additional-info"),
            QuestionKey::AdditionalInfo,
        ),
        Step::terminal(step_id("/questions/successfully-submitted")),
    ])
}

fn step_id(raw: &str) -> StepId {
    StepId::new(raw).expect("intake flow step ids must be valid")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::flow::Destination;
    use crate::domain::foundation::{ClientId, IntakeId};
    use crate::domain::intake::{AnswerValue, IntakeAnswers};

    #[test]
    fn definition_is_valid() {
        let flow = build_intake_flow().unwrap();
        assert_eq!(flow.len(), 12);
    }

    #[test]
    fn static_flow_matches_builder() {
        assert_eq!(intake_flow().len(), build_intake_flow().unwrap().len());
    }

    #[test]
    fn flow_ends_with_the_confirmation_step() {
        let flow = intake_flow();
        let last = flow.steps().last().unwrap();
        assert!(last.is_terminal());
        assert_eq!(last.id().as_str(), "/questions/successfully-submitted");
    }

    #[test]
    fn every_question_key_is_asked_exactly_once() {
        let flow = intake_flow();
        let asked: Vec<_> = flow
            .steps()
            .iter()
            .filter_map(|step| step.question_key())
            .collect();
        assert_eq!(asked.len(), 5);
    }

    #[test]
    fn wages_yes_with_nothing_else_lands_on_w2_upload() {
        let flow = intake_flow();
        let mut intake = IntakeAnswers::new(IntakeId::new(), ClientId::new());
        intake
            .record_answer(QuestionKey::HadWages, AnswerValue::yes())
            .unwrap();

        assert_eq!(
            flow.determine_current_step(&intake),
            Destination::Step(StepId::new("/documents/w2s").unwrap())
        );
    }

    #[test]
    fn all_income_answers_no_skips_every_income_upload() {
        let flow = intake_flow();
        let mut intake = IntakeAnswers::new(IntakeId::new(), ClientId::new());
        for key in [
            QuestionKey::HadWages,
            QuestionKey::HadUnemploymentIncome,
            QuestionKey::HadSocialSecurityIncome,
        ] {
            intake.record_answer(key, AnswerValue::no()).unwrap();
        }

        assert_eq!(
            flow.determine_current_step(&intake),
            Destination::Step(StepId::new("/questions/interview-scheduling").unwrap())
        );
    }
}
