//! In-memory intake repository for testing.
//!
//! # Security Note
//!
//! This adapter is for **testing only** and should not be used in
//! production. It uses `.expect()` on lock operations which will panic
//! if locks are poisoned. Production code should use the Postgres
//! repository adapter.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

use crate::domain::foundation::{ClientId, DomainError};
use crate::domain::intake::IntakeAnswers;
use crate::ports::IntakeRepository;

/// In-memory intake store keyed by client.
///
/// One intake per client, matching the production schema's unique
/// client constraint.
///
/// # Panics
///
/// Methods may panic if internal locks are poisoned. This is acceptable
/// for test code but this adapter should NOT be used in production.
pub struct InMemoryIntakeRepository {
    intakes: RwLock<HashMap<ClientId, IntakeAnswers>>,
}

impl InMemoryIntakeRepository {
    /// Creates a new empty repository.
    pub fn new() -> Self {
        Self {
            intakes: RwLock::new(HashMap::new()),
        }
    }

    // === Test Helpers ===

    /// Returns the stored intake for a client, if any.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn get(&self, client_id: &ClientId) -> Option<IntakeAnswers> {
        self.intakes
            .read()
            .expect("InMemoryIntakeRepository: intakes lock poisoned")
            .get(client_id)
            .cloned()
    }

    /// Returns the number of stored intakes.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn count(&self) -> usize {
        self.intakes
            .read()
            .expect("InMemoryIntakeRepository: intakes lock poisoned")
            .len()
    }

    /// Clears all stored intakes (for test isolation).
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn clear(&self) {
        self.intakes
            .write()
            .expect("InMemoryIntakeRepository: intakes write lock poisoned")
            .clear();
    }
}

impl Default for InMemoryIntakeRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IntakeRepository for InMemoryIntakeRepository {
    async fn find_by_client(
        &self,
        client_id: &ClientId,
    ) -> Result<Option<IntakeAnswers>, DomainError> {
        Ok(self.get(client_id))
    }

    async fn save(&self, intake: &IntakeAnswers) -> Result<(), DomainError> {
        self.intakes
            .write()
            .expect("InMemoryIntakeRepository: intakes write lock poisoned")
            .insert(*intake.client_id(), intake.clone());
        Ok(())
    }
}
