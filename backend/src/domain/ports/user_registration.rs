//! Driving port for the registration use-case.
//!
//! HTTP handlers depend on this trait rather than the concrete service so
//! handler tests can substitute a mock and skip the store entirely.

use async_trait::async_trait;

use crate::domain::{RegistrationError, RegistrationRequest, UserRecord};

/// Register a user, resolving or provisioning their company.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRegistration: Send + Sync {
    /// Run the registration workflow for one request.
    async fn register(&self, request: RegistrationRequest)
    -> Result<UserRecord, RegistrationError>;
}
