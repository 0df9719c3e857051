//! CurrentStepHandler - Query handler for a client's current step.
//!
//! Reads the resume pointer when one is cached; otherwise computes the
//! step from the answer set and backfills the pointer so the next read
//! is cheap. Records predating the pointer column get their pointer
//! this way, one record at a time, the first time they are read.

use std::sync::Arc;

use crate::domain::flow::{Destination, StepSequence};
use crate::domain::foundation::{ClientId, DomainError, ErrorCode};
use crate::ports::IntakeRepository;

/// Query for where a client currently is in the flow.
#[derive(Debug, Clone)]
pub struct CurrentStepCommand {
    pub client_id: ClientId,
}

/// Result of the current-step computation.
#[derive(Debug, Clone)]
pub struct CurrentStepResult {
    /// Where to send the client.
    pub destination: Destination,
    /// True when this call computed and persisted the resume pointer.
    pub backfilled: bool,
}

/// Handler resolving a client's current step.
pub struct CurrentStepHandler {
    intakes: Arc<dyn IntakeRepository>,
    flow: StepSequence,
}

impl CurrentStepHandler {
    pub fn new(intakes: Arc<dyn IntakeRepository>, flow: StepSequence) -> Self {
        Self { intakes, flow }
    }

    /// Resolve the client's current step.
    ///
    /// # Errors
    ///
    /// - `IntakeNotFound` if the client has no intake
    /// - `DatabaseError` on persistence failure during backfill
    pub async fn handle(&self, cmd: CurrentStepCommand) -> Result<CurrentStepResult, DomainError> {
        let mut intake = self
            .intakes
            .find_by_client(&cmd.client_id)
            .await?
            .ok_or_else(|| {
                DomainError::new(ErrorCode::IntakeNotFound, "No intake found for client")
                    .with_detail("client_id", cmd.client_id.to_string())
            })?;

        if intake.is_completed() {
            return Ok(CurrentStepResult {
                destination: Destination::Complete,
                backfilled: false,
            });
        }

        // Cached pointer wins, as long as it still names a defined step.
        if let Some(pointer) = intake.current_step() {
            if self.flow.contains(pointer) {
                return Ok(CurrentStepResult {
                    destination: Destination::Step(pointer.clone()),
                    backfilled: false,
                });
            }
        }

        let destination = self.flow.determine_current_step(&intake);

        let backfilled = match &destination {
            Destination::Step(step_id) => {
                intake.set_current_step(step_id.clone());
                self.intakes.save(&intake).await?;
                true
            }
            Destination::Complete => false,
        };

        Ok(CurrentStepResult {
            destination,
            backfilled,
        })
    }
}
