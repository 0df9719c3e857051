//! Navigation handlers - resolving and completing flow steps.

mod complete_step;
mod current_step;

pub use complete_step::{CompleteStepCommand, CompleteStepHandler, CompleteStepResult};
pub use current_step::{CurrentStepCommand, CurrentStepHandler, CurrentStepResult};
