//! CompleteStepHandler - Command handler for finishing a flow step.
//!
//! Records whatever the step collected, marks the step completed, and
//! moves the resume pointer to the next applicable step. Completing the
//! terminal step stamps the whole intake completed.

use std::sync::Arc;

use crate::domain::flow::{Destination, StepSequence};
use crate::domain::foundation::{ClientId, DomainError, ErrorCode, StepId};
use crate::domain::intake::{AnswerValue, QuestionKey};
use crate::ports::IntakeRepository;

/// Command to complete one step of the flow.
#[derive(Debug, Clone)]
pub struct CompleteStepCommand {
    pub client_id: ClientId,
    pub step_id: StepId,
    /// Answers collected on the step's page, if any.
    pub answers: Vec<(QuestionKey, AnswerValue)>,
}

/// Result of completing a step.
#[derive(Debug, Clone)]
pub struct CompleteStepResult {
    /// Where the client goes next.
    pub next: Destination,
}

/// Handler for step completion.
pub struct CompleteStepHandler {
    intakes: Arc<dyn IntakeRepository>,
    flow: StepSequence,
}

impl CompleteStepHandler {
    pub fn new(intakes: Arc<dyn IntakeRepository>, flow: StepSequence) -> Self {
        Self { intakes, flow }
    }

    /// Complete a step and compute the next destination.
    ///
    /// All mutations land in a single save, so a persistence failure
    /// leaves the intake exactly as it was.
    ///
    /// # Errors
    ///
    /// - `IntakeNotFound` if the client has no intake
    /// - `StepNotFound` if the step id is not in the flow
    /// - `IntakeCompleted` if the intake has already completed
    /// - `DatabaseError` on persistence failure
    pub async fn handle(&self, cmd: CompleteStepCommand) -> Result<CompleteStepResult, DomainError> {
        let mut intake = self
            .intakes
            .find_by_client(&cmd.client_id)
            .await?
            .ok_or_else(|| {
                DomainError::new(ErrorCode::IntakeNotFound, "No intake found for client")
                    .with_detail("client_id", cmd.client_id.to_string())
            })?;

        let step = self.flow.find(&cmd.step_id).ok_or_else(|| {
            DomainError::new(ErrorCode::StepNotFound, "Step is not part of the intake flow")
                .with_detail("step_id", cmd.step_id.to_string())
        })?;

        for (key, value) in cmd.answers {
            intake.record_answer(key, value)?;
        }
        intake.mark_step_completed(cmd.step_id.clone())?;

        let next = self.flow.next_after(&intake, &cmd.step_id);

        if let Destination::Step(step_id) = &next {
            intake.set_current_step(step_id.clone());
        }

        if step.is_terminal() {
            intake.mark_completed()?;
        }

        self.intakes.save(&intake).await?;

        Ok(CompleteStepResult { next })
    }
}
