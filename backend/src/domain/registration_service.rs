//! Registration orchestrator.
//!
//! Runs validation, the email pre-check, company resolution and the store
//! insert in that order and stops at the first failure. The pre-check runs
//! before resolution so a duplicate registration never provisions a company.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::domain::ports::{CompanyProvisioner, UserRegistration, UserStore, UserStoreError};
use crate::domain::{
    CompanyOrigin, CompanyResolver, EmailAvailability, NewUserRecord, OperationDeadline,
    RegistrationError, RegistrationRequest, ResolvedCompany, UserRecord, check_email_available,
    validate_registration,
};

/// What to do when the email pre-check itself fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LookupFailurePolicy {
    /// Fail the registration with a persistence error.
    #[default]
    Abort,
    /// Carry on as if the email were free and rely on the store's unique
    /// constraint.
    TreatAsAvailable,
}

impl LookupFailurePolicy {
    /// Configuration spelling.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Abort => "abort",
            Self::TreatAsAvailable => "treat_as_available",
        }
    }
}

impl fmt::Display for LookupFailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown lookup failure policy name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown lookup failure policy `{0}` (expected `abort` or `treat_as_available`)")]
pub struct ParseLookupFailurePolicyError(String);

impl FromStr for LookupFailurePolicy {
    type Err = ParseLookupFailurePolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "abort" => Ok(Self::Abort),
            "treat_as_available" => Ok(Self::TreatAsAvailable),
            _ => Err(ParseLookupFailurePolicyError(s.to_owned())),
        }
    }
}

/// Progress markers of a registration attempt, used in log fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationStage {
    /// Payload accepted for processing.
    Received,
    /// Required fields present.
    Validated,
    /// Email pre-check passed.
    UniquenessChecked,
    /// Company reference obtained.
    CompanyResolved,
    /// Record written.
    Persisted,
}

impl RegistrationStage {
    /// Log spelling.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Received => "received",
            Self::Validated => "validated",
            Self::UniquenessChecked => "uniqueness_checked",
            Self::CompanyResolved => "company_resolved",
            Self::Persisted => "persisted",
        }
    }
}

impl fmt::Display for RegistrationStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Registration service implementing [`UserRegistration`].
pub struct UserRegistrationService<S: ?Sized, P: ?Sized> {
    store: Arc<S>,
    resolver: CompanyResolver<P>,
    deadline: OperationDeadline,
    lookup_failure_policy: LookupFailurePolicy,
}

impl<S: ?Sized, P: ?Sized> Clone for UserRegistrationService<S, P> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            resolver: self.resolver.clone(),
            deadline: self.deadline,
            lookup_failure_policy: self.lookup_failure_policy,
        }
    }
}

impl<S, P> UserRegistrationService<S, P>
where
    S: UserStore + ?Sized,
    P: CompanyProvisioner + ?Sized,
{
    /// Create a service with the default lookup failure policy.
    pub fn new(store: Arc<S>, provisioner: Arc<P>, deadline: OperationDeadline) -> Self {
        Self {
            store,
            resolver: CompanyResolver::new(provisioner, deadline),
            deadline,
            lookup_failure_policy: LookupFailurePolicy::default(),
        }
    }

    /// Override the lookup failure policy.
    #[must_use]
    pub fn with_lookup_failure_policy(mut self, policy: LookupFailurePolicy) -> Self {
        self.lookup_failure_policy = policy;
        self
    }

    async fn ensure_email_available(&self, email: &str) -> Result<(), RegistrationError> {
        match check_email_available(self.store.as_ref(), email, self.deadline).await {
            EmailAvailability::Available => Ok(()),
            EmailAvailability::Taken(existing) => {
                debug!(email, user_id = %existing.id, "email already registered");
                Err(RegistrationError::already_exists(email))
            }
            EmailAvailability::LookupFailed(err) => match self.lookup_failure_policy {
                LookupFailurePolicy::Abort => {
                    warn!(email, error = %err, "email pre-check failed");
                    Err(RegistrationError::Persistence(err))
                }
                LookupFailurePolicy::TreatAsAvailable => {
                    warn!(
                        email,
                        error = %err,
                        "email pre-check failed; continuing on the store's unique constraint"
                    );
                    Ok(())
                }
            },
        }
    }

    fn map_create_error(
        err: UserStoreError,
        email: &str,
        resolved: &ResolvedCompany,
    ) -> RegistrationError {
        if resolved.origin == CompanyOrigin::Provisioned {
            warn!(
                company = %resolved.company,
                email,
                error = %err,
                "user insert failed after provisioning; company left without users"
            );
        }
        match err {
            UserStoreError::DuplicateEmail { .. } => RegistrationError::already_exists(email),
            other => RegistrationError::Persistence(other),
        }
    }
}

#[async_trait]
impl<S, P> UserRegistration for UserRegistrationService<S, P>
where
    S: UserStore + ?Sized,
    P: CompanyProvisioner + ?Sized,
{
    async fn register(
        &self,
        request: RegistrationRequest,
    ) -> Result<UserRecord, RegistrationError> {
        debug!(
            email = %request.email,
            invitation = request.invitation,
            stage = %RegistrationStage::Received,
            "registration started"
        );

        validate_registration(&request).inspect_err(|err| {
            debug!(error = %err, stage = %RegistrationStage::Received, "registration rejected");
        })?;
        debug!(stage = %RegistrationStage::Validated, "registration validated");

        self.ensure_email_available(&request.email).await?;
        debug!(stage = %RegistrationStage::UniquenessChecked, "email available");

        let resolved = self.resolver.resolve(&request).await?;
        debug!(
            company = %resolved.company,
            stage = %RegistrationStage::CompanyResolved,
            "company resolved"
        );

        let new_user = NewUserRecord::from_request(request, resolved.company);
        let id = self
            .deadline
            .store("create", self.store.create(&new_user))
            .await
            .map_err(|err| Self::map_create_error(err, &new_user.email, &resolved))?;

        let user = new_user.into_record(id);
        info!(
            user_id = %user.id,
            company = %user.company,
            stage = %RegistrationStage::Persisted,
            "user registered"
        );
        Ok(user)
    }
}

#[cfg(test)]
#[path = "registration_service_tests.rs"]
mod tests;
