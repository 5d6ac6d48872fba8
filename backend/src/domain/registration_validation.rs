//! Required-field validation for registration payloads.
//!
//! Validation runs before any store or company-service call and reports every
//! missing field at once rather than stopping at the first.

use std::fmt;

use super::RegistrationRequest;

/// Fields a registration payload must carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredField {
    /// `name`
    Name,
    /// `password`
    Password,
    /// `email`
    Email,
    /// `role`
    Role,
    /// `company`
    Company,
}

impl RequiredField {
    /// All required fields in reporting order.
    pub const ALL: [Self; 5] = [
        Self::Name,
        Self::Password,
        Self::Email,
        Self::Role,
        Self::Company,
    ];

    /// JSON field name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Password => "password",
            Self::Email => "email",
            Self::Role => "role",
            Self::Company => "company",
        }
    }

    fn value(self, request: &RegistrationRequest) -> &str {
        match self {
            Self::Name => &request.name,
            Self::Password => &request.password,
            Self::Email => &request.email,
            Self::Role => &request.role,
            Self::Company => &request.company,
        }
    }
}

impl fmt::Display for RequiredField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Aggregated validation failure listing every missing field.
///
/// ## Invariants
/// - `missing` is non-empty and ordered as [`RequiredField::ALL`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("missing required fields: {}", join_fields(.missing))]
pub struct RegistrationValidationError {
    missing: Vec<RequiredField>,
}

impl RegistrationValidationError {
    /// Fields that were absent or empty.
    pub fn missing(&self) -> &[RequiredField] {
        &self.missing
    }
}

fn join_fields(fields: &[RequiredField]) -> String {
    fields
        .iter()
        .map(|field| field.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Check that every required field is present and non-empty.
///
/// Whitespace counts as content; values are not trimmed.
///
/// # Examples
/// ```
/// use user_service::domain::{RegistrationRequest, RequiredField, validate_registration};
///
/// let request = RegistrationRequest {
///     email: "ada@example.com".into(),
///     ..RegistrationRequest::default()
/// };
/// let err = validate_registration(&request).expect_err("fields missing");
/// assert_eq!(
///     err.missing(),
///     &[RequiredField::Name, RequiredField::Password, RequiredField::Role, RequiredField::Company]
/// );
/// ```
pub fn validate_registration(
    request: &RegistrationRequest,
) -> Result<(), RegistrationValidationError> {
    let missing: Vec<RequiredField> = RequiredField::ALL
        .into_iter()
        .filter(|field| field.value(request).is_empty())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(RegistrationValidationError { missing })
    }
}
