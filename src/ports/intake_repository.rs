//! Intake repository port.
//!
//! Defines the contract for persisting and retrieving IntakeAnswers
//! aggregates. Implementations handle the actual database operations.

use crate::domain::foundation::{ClientId, DomainError};
use crate::domain::intake::IntakeAnswers;
use async_trait::async_trait;

/// Repository port for IntakeAnswers persistence.
///
/// One intake exists per client, so lookups are client-scoped and
/// `save` upserts on the intake's id.
#[async_trait]
pub trait IntakeRepository: Send + Sync {
    /// Find a client's intake.
    ///
    /// Returns `None` if the client has not started intake.
    async fn find_by_client(&self, client_id: &ClientId)
        -> Result<Option<IntakeAnswers>, DomainError>;

    /// Save an intake, inserting or replacing by id.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn save(&self, intake: &IntakeAnswers) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Trait object safety test
    #[test]
    fn intake_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn IntakeRepository) {}
    }
}
