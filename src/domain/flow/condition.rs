//! Applicability conditions for flow steps.
//!
//! A condition is a pure predicate over the intake's answer set. It
//! decides whether a step applies to a given client at all; conditions
//! never mutate anything, so evaluating one twice against the same
//! answers always yields the same result.

use crate::domain::intake::{IntakeAnswers, QuestionKey};

/// Predicate over an intake's answers, evaluated when walking the flow.
///
/// Conditions may only reference questions asked by earlier steps in
/// the sequence; [`StepSequence`](crate::domain::flow::StepSequence)
/// enforces this at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    /// The step always applies.
    Always,
    /// The question holds any filled answer.
    Answered(QuestionKey),
    /// The question was answered yes.
    AnsweredYes(QuestionKey),
    /// The question was answered no.
    AnsweredNo(QuestionKey),
    /// Every inner condition holds (vacuously true when empty).
    AllOf(Vec<Condition>),
    /// At least one inner condition holds (false when empty).
    AnyOf(Vec<Condition>),
    /// The inner condition does not hold.
    Not(Box<Condition>),
}

impl Condition {
    /// Evaluates this condition against an intake's answers.
    pub fn evaluate(&self, intake: &IntakeAnswers) -> bool {
        match self {
            Condition::Always => true,
            Condition::Answered(key) => intake.is_answered(*key),
            Condition::AnsweredYes(key) => intake.is_answered_yes(*key),
            Condition::AnsweredNo(key) => intake.is_answered_no(*key),
            Condition::AllOf(conditions) => conditions.iter().all(|c| c.evaluate(intake)),
            Condition::AnyOf(conditions) => conditions.iter().any(|c| c.evaluate(intake)),
            Condition::Not(inner) => !inner.evaluate(intake),
        }
    }

    /// Returns every question key this condition reads.
    pub fn referenced_keys(&self) -> Vec<QuestionKey> {
        let mut keys = Vec::new();
        self.collect_keys(&mut keys);
        keys
    }

    fn collect_keys(&self, keys: &mut Vec<QuestionKey>) {
        match self {
            Condition::Always => {}
            Condition::Answered(key) | Condition::AnsweredYes(key) | Condition::AnsweredNo(key) => {
                keys.push(*key);
            }
            Condition::AllOf(conditions) | Condition::AnyOf(conditions) => {
                for condition in conditions {
                    condition.collect_keys(keys);
                }
            }
            Condition::Not(inner) => inner.collect_keys(keys),
        }
    }
}
