//! Typed failures of the registration workflow and the lookup façade.

use thiserror::Error;

use super::IdentifierFormatError;
use super::RegistrationValidationError;
use super::ports::{CompanyProvisionerError, UserStoreError};

/// Why a company could not be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionErrorKind {
    /// The supplied or returned company token was not a valid identifier.
    InvalidReference,
    /// The company service failed to create the company.
    ProvisioningFailed,
}

/// Company resolution failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ResolutionError {
    kind: ResolutionErrorKind,
    message: String,
}

impl ResolutionError {
    /// A company token failed to decode.
    pub fn invalid_reference(source: IdentifierFormatError) -> Self {
        Self {
            kind: ResolutionErrorKind::InvalidReference,
            message: format!("invalid company reference: {source}"),
        }
    }

    /// The provisioner call failed.
    pub fn provisioning_failed(source: &CompanyProvisionerError) -> Self {
        Self {
            kind: ResolutionErrorKind::ProvisioningFailed,
            message: source.to_string(),
        }
    }

    /// Failure category.
    pub fn kind(&self) -> ResolutionErrorKind {
        self.kind
    }

    /// Human-readable description.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Terminal failure of a registration attempt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    /// Required fields were missing.
    #[error(transparent)]
    Validation(#[from] RegistrationValidationError),
    /// A user with the email already exists.
    #[error("User already exists with email: {email}")]
    AlreadyExists {
        /// The conflicting email, as submitted.
        email: String,
    },
    /// The company could not be resolved.
    #[error(transparent)]
    Resolution(#[from] ResolutionError),
    /// The store failed while checking or writing the record.
    #[error(transparent)]
    Persistence(UserStoreError),
}

impl RegistrationError {
    /// Build the duplicate-email failure.
    pub fn already_exists(email: impl Into<String>) -> Self {
        Self::AlreadyExists {
            email: email.into(),
        }
    }
}

/// Failure of a read-only lookup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// No record matched.
    #[error("user not found")]
    NotFound,
    /// The store failed or timed out.
    #[error(transparent)]
    Store(#[from] UserStoreError),
}
