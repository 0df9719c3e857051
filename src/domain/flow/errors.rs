//! Error types for flow definitions.
//!
//! These fire at construction time, when a [`StepSequence`](crate::domain::flow::StepSequence)
//! is built from its steps. A sequence that constructs successfully can
//! be traversed without error.

use thiserror::Error;

use crate::domain::foundation::StepId;
use crate::domain::intake::QuestionKey;

/// Errors raised while validating a flow definition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowDefinitionError {
    #[error("Flow has no steps")]
    EmptySequence,

    #[error("Duplicate step id: {0}")]
    DuplicateStepId(StepId),

    #[error("Question {0} is asked by more than one step")]
    DuplicateQuestionKey(QuestionKey),

    #[error("Terminal step {0} must be the last step")]
    TerminalNotLast(StepId),

    #[error("Step {step} condition references {key}, which no earlier question step asks")]
    ConditionKeyNotIntroduced { step: StepId, key: QuestionKey },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_step_id_displays_correctly() {
        let err = FlowDefinitionError::DuplicateStepId(StepId::new("/documents/w2s").unwrap());
        assert_eq!(format!("{}", err), "Duplicate step id: /documents/w2s");
    }

    #[test]
    fn condition_key_not_introduced_displays_correctly() {
        let err = FlowDefinitionError::ConditionKeyNotIntroduced {
            step: StepId::new("/documents/w2s").unwrap(),
            key: QuestionKey::HadWages,
        };
        assert_eq!(
            format!("{}", err),
            "Step /documents/w2s condition references had_wages, which no earlier question step asks"
        );
    }

    #[test]
    fn terminal_not_last_displays_correctly() {
        let err =
            FlowDefinitionError::TerminalNotLast(StepId::new("/questions/done").unwrap());
        assert_eq!(
            format!("{}", err),
            "Terminal step /questions/done must be the last step"
        );
    }
}
