//! Signature value object for signed returns.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Timestamp, ValidationError};

/// One filer's e-signature on a return: the typed legal name, when it
/// was signed, and the address it was signed from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    name: String,
    signed_at: Timestamp,
    ip_address: String,
}

impl Signature {
    /// Create a signature.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyField` if the name or IP address
    /// is blank.
    pub fn new(
        name: impl Into<String>,
        signed_at: Timestamp,
        ip_address: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::empty_field("signature_name"));
        }

        let ip_address = ip_address.into();
        if ip_address.trim().is_empty() {
            return Err(ValidationError::empty_field("signature_ip_address"));
        }

        Ok(Self {
            name,
            signed_at,
            ip_address,
        })
    }

    /// Returns the typed legal name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns when the signature was given.
    pub fn signed_at(&self) -> &Timestamp {
        &self.signed_at
    }

    /// Returns the IP address the signature was given from.
    pub fn ip_address(&self) -> &str {
        &self.ip_address
    }
}
