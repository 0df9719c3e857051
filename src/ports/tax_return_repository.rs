//! Tax return repository port.

use crate::domain::foundation::{ClientId, DomainError, TaxReturnId};
use crate::domain::tax_return::TaxReturn;
use async_trait::async_trait;

/// Repository port for TaxReturn persistence.
#[async_trait]
pub trait TaxReturnRepository: Send + Sync {
    /// Find a return by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &TaxReturnId) -> Result<Option<TaxReturn>, DomainError>;

    /// Find all of a client's returns, ordered by year ascending.
    async fn find_by_client(&self, client_id: &ClientId) -> Result<Vec<TaxReturn>, DomainError>;

    /// Save a return, inserting or replacing by id.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn save(&self, tax_return: &TaxReturn) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Trait object safety test
    #[test]
    fn tax_return_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn TaxReturnRepository) {}
    }
}
