//! TaxReturn aggregate entity.
//!
//! One return exists per (client, filing year). Its status walks the
//! ordered lifecycle defined by [`TaxReturnStatus`]; the aggregate
//! enforces that the walk only ever moves forward.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    ClientId, DomainError, ErrorCode, TaxReturnId, Timestamp, UserId, ValidationError,
};
use crate::domain::tax_return::{Signature, TaxReturnStatus};

/// Earliest filing year the system accepts.
pub const MIN_TAX_YEAR: u16 = 2015;

/// Latest filing year the system accepts.
pub const MAX_TAX_YEAR: u16 = 2100;

/// TaxReturn aggregate - one client's case for one filing year.
///
/// # Invariants
///
/// - At most one return per (client, year); persistence enforces the
///   uniqueness, the aggregate carries the pair
/// - Status only moves to strictly greater codes
/// - Each filer signs at most once
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxReturn {
    /// Unique identifier for this return.
    id: TaxReturnId,

    /// Client the return belongs to.
    client_id: ClientId,

    /// Filing year.
    year: u16,

    /// Current lifecycle status.
    status: TaxReturnStatus,

    /// Staff member working the return, once assigned.
    assigned_user_id: Option<UserId>,

    /// Primary filer's signature, once given.
    primary_signature: Option<Signature>,

    /// Spouse's signature, once given (joint returns only).
    spouse_signature: Option<Signature>,

    /// When the return was created.
    created_at: Timestamp,

    /// When the return was last updated.
    updated_at: Timestamp,
}

impl TaxReturn {
    /// Create a new return in the initial status.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::OutOfRange` if the year is outside
    /// the accepted range.
    pub fn new(id: TaxReturnId, client_id: ClientId, year: u16) -> Result<Self, ValidationError> {
        if !(MIN_TAX_YEAR..=MAX_TAX_YEAR).contains(&year) {
            return Err(ValidationError::out_of_range(
                "year",
                i32::from(MIN_TAX_YEAR),
                i32::from(MAX_TAX_YEAR),
                i32::from(year),
            ));
        }

        let now = Timestamp::now();
        Ok(Self {
            id,
            client_id,
            year,
            status: TaxReturnStatus::default(),
            assigned_user_id: None,
            primary_signature: None,
            spouse_signature: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstitute a return from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: TaxReturnId,
        client_id: ClientId,
        year: u16,
        status: TaxReturnStatus,
        assigned_user_id: Option<UserId>,
        primary_signature: Option<Signature>,
        spouse_signature: Option<Signature>,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            client_id,
            year,
            status,
            assigned_user_id,
            primary_signature,
            spouse_signature,
            created_at,
            updated_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Returns the return's ID.
    pub fn id(&self) -> &TaxReturnId {
        &self.id
    }

    /// Returns the owning client's ID.
    pub fn client_id(&self) -> &ClientId {
        &self.client_id
    }

    /// Returns the filing year.
    pub fn year(&self) -> u16 {
        self.year
    }

    /// Returns the current status.
    pub fn status(&self) -> TaxReturnStatus {
        self.status
    }

    /// Returns the assigned staff member, if any.
    pub fn assigned_user_id(&self) -> Option<&UserId> {
        self.assigned_user_id.as_ref()
    }

    /// Returns the primary filer's signature, if given.
    pub fn primary_signature(&self) -> Option<&Signature> {
        self.primary_signature.as_ref()
    }

    /// Returns the spouse's signature, if given.
    pub fn spouse_signature(&self) -> Option<&Signature> {
        self.spouse_signature.as_ref()
    }

    /// Returns when the return was created.
    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    /// Returns when the return was last updated.
    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    /// Returns true once the primary filer has signed.
    pub fn is_signed_by_primary(&self) -> bool {
        self.primary_signature.is_some()
    }

    /// Returns true once the spouse has signed.
    pub fn is_signed_by_spouse(&self) -> bool {
        self.spouse_signature.is_some()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Advance the status to `target` if that moves forward.
    ///
    /// Returns true if the status changed. Equal or lower targets are a
    /// no-op, never an error, so redundant triggers (a document upload
    /// and an intake event racing to the same target) stay safe.
    pub fn advance_status_to(&mut self, target: TaxReturnStatus) -> bool {
        if !self.status.can_advance_to(target) {
            return false;
        }

        self.status = target;
        self.updated_at = Timestamp::now();
        true
    }

    /// Assign the return to a staff member, replacing any previous
    /// assignment.
    pub fn assign_to(&mut self, user_id: UserId) {
        self.assigned_user_id = Some(user_id);
        self.updated_at = Timestamp::now();
    }

    /// Record the primary filer's signature.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` if the primary filer already signed
    pub fn sign_primary(&mut self, signature: Signature) -> Result<(), DomainError> {
        if self.primary_signature.is_some() {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                "Primary filer has already signed this return",
            ));
        }

        self.primary_signature = Some(signature);
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Record the spouse's signature.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` if the spouse already signed
    pub fn sign_spouse(&mut self, signature: Signature) -> Result<(), DomainError> {
        if self.spouse_signature.is_some() {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                "Spouse has already signed this return",
            ));
        }

        self.spouse_signature = Some(signature);
        self.updated_at = Timestamp::now();
        Ok(())
    }
}
