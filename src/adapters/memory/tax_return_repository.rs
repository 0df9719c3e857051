//! In-memory tax return repository for testing.
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

use crate::domain::foundation::{ClientId, DomainError, TaxReturnId};
use crate::domain::tax_return::TaxReturn;
use crate::ports::TaxReturnRepository;

/// In-memory tax return store.
///
/// # Panics
///
/// Methods may panic if internal locks are poisoned. This is acceptable
/// for test code but this adapter should NOT be used in production.
pub struct InMemoryTaxReturnRepository {
    returns: RwLock<HashMap<TaxReturnId, TaxReturn>>,
}

impl InMemoryTaxReturnRepository {
    /// Creates a new empty repository.
    pub fn new() -> Self {
        Self {
            returns: RwLock::new(HashMap::new()),
        }
    }

    // === Test Helpers ===

    /// Returns the stored return by id, if any.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn get(&self, id: &TaxReturnId) -> Option<TaxReturn> {
        self.returns
            .read()
            .expect("InMemoryTaxReturnRepository: returns lock poisoned")
            .get(id)
            .cloned()
    }

    /// Returns the number of stored returns.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn count(&self) -> usize {
        self.returns
            .read()
            .expect("InMemoryTaxReturnRepository: returns lock poisoned")
            .len()
    }

    /// Clears all stored returns (for test isolation).
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn clear(&self) {
        self.returns
            .write()
            .expect("InMemoryTaxReturnRepository: returns write lock poisoned")
            .clear();
    }
}

impl Default for InMemoryTaxReturnRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TaxReturnRepository for InMemoryTaxReturnRepository {
    async fn find_by_id(&self, id: &TaxReturnId) -> Result<Option<TaxReturn>, DomainError> {
        Ok(self.get(id))
    }

    async fn find_by_client(&self, client_id: &ClientId) -> Result<Vec<TaxReturn>, DomainError> {
        let mut returns: Vec<TaxReturn> = self
            .returns
            .read()
            .expect("InMemoryTaxReturnRepository: returns lock poisoned")
            .values()
            .filter(|r| r.client_id() == client_id)
            .cloned()
            .collect();
        returns.sort_by_key(|r| (r.year(), *r.id()));
        Ok(returns)
    }

    async fn save(&self, tax_return: &TaxReturn) -> Result<(), DomainError> {
        self.returns
            .write()
            .expect("InMemoryTaxReturnRepository: returns write lock poisoned")
            .insert(*tax_return.id(), tax_return.clone());
        Ok(())
    }
}
