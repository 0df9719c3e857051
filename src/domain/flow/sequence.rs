//! StepSequence - Ordered, validated flow of intake steps.
//!
//! The sequence is the single source of step ordering. Construction
//! validates the definition (unique ids, terminal placement, condition
//! references), so a sequence that exists can always be walked; the
//! walk itself has no failure mode.
//!
//! # Walk semantics
//!
//! Walking proceeds in definition order. A step whose condition is
//! false for the client is skipped silently; the walk stops at the
//! first step that applies and is not yet satisfied. When every
//! applicable step is satisfied the walk yields
//! [`Destination::Complete`].
//!
//! Because conditions and satisfaction are pure functions of the
//! intake's answers, the same answers always produce the same
//! destination. The resume pointer on the intake is a cache over this
//! computation, never a second source of truth.

use std::collections::BTreeSet;

use crate::domain::flow::{Destination, FlowDefinitionError, Step};
use crate::domain::foundation::StepId;
use crate::domain::intake::IntakeAnswers;

/// Ordered sequence of intake steps.
#[derive(Debug, Clone)]
pub struct StepSequence {
    steps: Vec<Step>,
}

impl StepSequence {
    /// Build a sequence, validating the definition.
    ///
    /// # Errors
    ///
    /// - `EmptySequence` if no steps are given
    /// - `DuplicateStepId` if two steps share an id
    /// - `DuplicateQuestionKey` if two steps ask the same question
    /// - `TerminalNotLast` if a terminal step is not the final step
    /// - `ConditionKeyNotIntroduced` if a condition references a
    ///   question no earlier step asks
    pub fn new(steps: Vec<Step>) -> Result<Self, FlowDefinitionError> {
        if steps.is_empty() {
            return Err(FlowDefinitionError::EmptySequence);
        }

        let mut seen_ids = BTreeSet::new();
        let mut asked_keys = BTreeSet::new();
        let last_index = steps.len() - 1;

        for (index, step) in steps.iter().enumerate() {
            if !seen_ids.insert(step.id().clone()) {
                return Err(FlowDefinitionError::DuplicateStepId(step.id().clone()));
            }

            if step.is_terminal() && index != last_index {
                return Err(FlowDefinitionError::TerminalNotLast(step.id().clone()));
            }

            // A condition may only read questions asked before this step,
            // otherwise the walk could depend on answers the client has
            // had no opportunity to give.
            for key in step.condition().referenced_keys() {
                if !asked_keys.contains(&key) {
                    return Err(FlowDefinitionError::ConditionKeyNotIntroduced {
                        step: step.id().clone(),
                        key,
                    });
                }
            }

            if let Some(key) = step.question_key() {
                if !asked_keys.insert(key) {
                    return Err(FlowDefinitionError::DuplicateQuestionKey(key));
                }
            }
        }

        Ok(Self { steps })
    }

    /// Returns the steps in order.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Returns the number of steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns true if the sequence has no steps.
    ///
    /// Always false for a constructed sequence; construction rejects
    /// empty definitions.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Returns true if the sequence defines a step with this id.
    pub fn contains(&self, step_id: &StepId) -> bool {
        self.position(step_id).is_some()
    }

    /// Returns the step with this id, if defined.
    pub fn find(&self, step_id: &StepId) -> Option<&Step> {
        self.steps.iter().find(|step| step.id() == step_id)
    }

    /// Returns the 0-based position of a step in the sequence.
    pub fn position(&self, step_id: &StepId) -> Option<usize> {
        self.steps.iter().position(|step| step.id() == step_id)
    }

    /// Computes where the client currently is, walking from the start.
    ///
    /// Returns the first step that applies to this intake and is not
    /// yet satisfied, or [`Destination::Complete`] when none remains.
    pub fn determine_current_step(&self, intake: &IntakeAnswers) -> Destination {
        self.walk_from(0, intake)
    }

    /// Computes where the client goes after the given step.
    ///
    /// Walks forward from the step after `after`. If `after` is not in
    /// this sequence (a stale pointer from an older flow definition),
    /// falls back to a full walk from the start.
    pub fn next_after(&self, intake: &IntakeAnswers, after: &StepId) -> Destination {
        match self.position(after) {
            Some(index) => self.walk_from(index + 1, intake),
            None => self.walk_from(0, intake),
        }
    }

    fn walk_from(&self, start: usize, intake: &IntakeAnswers) -> Destination {
        for step in &self.steps[start..] {
            if step.is_applicable(intake) && !step.is_satisfied_by(intake) {
                return Destination::Step(step.id().clone());
            }
        }
        Destination::Complete
    }
}
