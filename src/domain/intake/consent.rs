//! Consent record and primary filer identity value objects.
//!
//! Both are collected together by the consent form. The status engine's
//! readiness gate requires both to be present before a tax return may
//! advance to `intake_open`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Timestamp, ValidationError};

/// Record of the client consenting to the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Consent {
    given_at: Timestamp,
    ip_address: String,
}

impl Consent {
    /// Creates a consent record.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if the IP address is empty
    pub fn new(given_at: Timestamp, ip_address: impl Into<String>) -> Result<Self, ValidationError> {
        let ip_address = ip_address.into();
        if ip_address.trim().is_empty() {
            return Err(ValidationError::empty_field("ip_address"));
        }
        Ok(Self {
            given_at,
            ip_address,
        })
    }

    /// Returns when consent was given.
    pub fn given_at(&self) -> &Timestamp {
        &self.given_at
    }

    /// Returns the IP address consent was submitted from.
    pub fn ip_address(&self) -> &str {
        &self.ip_address
    }
}

/// Last four digits of a social security number or ITIN.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LastFourSsn(String);

impl LastFourSsn {
    /// Creates a validated last-four value.
    ///
    /// # Errors
    ///
    /// - `InvalidFormat` unless the value is exactly 4 ASCII digits
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.len() != 4 || !value.chars().all(|c| c.is_ascii_digit()) {
            return Err(ValidationError::invalid_format(
                "last_four_ssn",
                "expected exactly 4 digits",
            ));
        }
        Ok(Self(value))
    }

    /// Returns the inner digit string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Identity fields for the primary filer, collected by the consent form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrimaryIdentity {
    first_name: String,
    last_name: String,
    last_four_ssn: LastFourSsn,
    birth_date: NaiveDate,
}

impl PrimaryIdentity {
    /// Creates a primary filer identity.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if either name is blank
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        last_four_ssn: LastFourSsn,
        birth_date: NaiveDate,
    ) -> Result<Self, ValidationError> {
        let first_name = first_name.into();
        let last_name = last_name.into();
        if first_name.trim().is_empty() {
            return Err(ValidationError::empty_field("first_name"));
        }
        if last_name.trim().is_empty() {
            return Err(ValidationError::empty_field("last_name"));
        }
        Ok(Self {
            first_name,
            last_name,
            last_four_ssn,
            birth_date,
        })
    }

    /// Returns the primary filer's first name.
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    /// Returns the primary filer's last name.
    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    /// Returns the last four SSN/ITIN digits.
    pub fn last_four_ssn(&self) -> &LastFourSsn {
        &self.last_four_ssn
    }

    /// Returns the primary filer's birth date.
    pub fn birth_date(&self) -> NaiveDate {
        self.birth_date
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_birth_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(1983, 7, 4).unwrap()
    }

    #[test]
    fn consent_requires_ip_address() {
        let result = Consent::new(Timestamp::now(), "");
        assert!(result.is_err());

        let result = Consent::new(Timestamp::now(), "   ");
        assert!(result.is_err());
    }

    #[test]
    fn consent_keeps_ip_address() {
        let consent = Consent::new(Timestamp::now(), "192.168.0.14").unwrap();
        assert_eq!(consent.ip_address(), "192.168.0.14");
    }

    #[test]
    fn last_four_ssn_accepts_four_digits() {
        let last_four = LastFourSsn::new("1234").unwrap();
        assert_eq!(last_four.as_str(), "1234");
    }

    #[test]
    fn last_four_ssn_rejects_wrong_length() {
        assert!(LastFourSsn::new("123").is_err());
        assert!(LastFourSsn::new("12345").is_err());
        assert!(LastFourSsn::new("").is_err());
    }

    #[test]
    fn last_four_ssn_rejects_non_digits() {
        assert!(LastFourSsn::new("12a4").is_err());
        assert!(LastFourSsn::new("12 4").is_err());
    }

    #[test]
    fn primary_identity_requires_names() {
        let last_four = LastFourSsn::new("1234").unwrap();
        assert!(PrimaryIdentity::new("", "Hesse", last_four.clone(), test_birth_date()).is_err());
        assert!(PrimaryIdentity::new("Gary", "  ", last_four, test_birth_date()).is_err());
    }

    #[test]
    fn primary_identity_exposes_fields() {
        let identity = PrimaryIdentity::new(
            "Gary",
            "Gnome",
            LastFourSsn::new("5678").unwrap(),
            test_birth_date(),
        )
        .unwrap();

        assert_eq!(identity.first_name(), "Gary");
        assert_eq!(identity.last_name(), "Gnome");
        assert_eq!(identity.last_four_ssn().as_str(), "5678");
        assert_eq!(identity.birth_date(), test_birth_date());
    }
}
