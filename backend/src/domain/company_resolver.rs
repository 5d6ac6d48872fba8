//! Resolve the company a registering user belongs to.
//!
//! Invitations carry an existing company reference which is decoded locally.
//! Everything else founds a new company through the [`CompanyProvisioner`]
//! and decodes the identifier it returns. There is no retry and no fallback
//! from one path to the other.

use std::sync::Arc;

use tracing::{debug, warn};

use super::ports::CompanyProvisioner;
use super::{CompanyRef, OperationDeadline, RegistrationRequest, ResolutionError};

/// How a company reference was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompanyOrigin {
    /// Decoded from an invitation token.
    Invitation,
    /// Created by the company service for this registration.
    Provisioned,
}

/// Outcome of a successful resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedCompany {
    /// Canonical company reference.
    pub company: CompanyRef,
    /// Which path produced it.
    pub origin: CompanyOrigin,
}

/// Resolves registration requests to company references.
pub struct CompanyResolver<P: ?Sized> {
    provisioner: Arc<P>,
    deadline: OperationDeadline,
}

impl<P: ?Sized> Clone for CompanyResolver<P> {
    fn clone(&self) -> Self {
        Self {
            provisioner: Arc::clone(&self.provisioner),
            deadline: self.deadline,
        }
    }
}

impl<P> CompanyResolver<P>
where
    P: CompanyProvisioner + ?Sized,
{
    /// Create a resolver backed by `provisioner`.
    pub fn new(provisioner: Arc<P>, deadline: OperationDeadline) -> Self {
        Self {
            provisioner,
            deadline,
        }
    }

    /// Produce the company reference for `request`.
    pub async fn resolve(
        &self,
        request: &RegistrationRequest,
    ) -> Result<ResolvedCompany, ResolutionError> {
        if request.invitation {
            let company =
                CompanyRef::decode(&request.company).map_err(ResolutionError::invalid_reference)?;
            debug!(%company, "company resolved from invitation");
            return Ok(ResolvedCompany {
                company,
                origin: CompanyOrigin::Invitation,
            });
        }

        let token = self
            .deadline
            .provisioner(self.provisioner.create_company(&request.company))
            .await
            .map_err(|err| {
                warn!(error = %err, "company provisioning failed");
                ResolutionError::provisioning_failed(&err)
            })?;

        let company = CompanyRef::decode(&token).map_err(|err| {
            warn!(token = %token, error = %err, "company service returned an invalid identifier");
            ResolutionError::invalid_reference(err)
        })?;
        debug!(%company, "company provisioned");
        Ok(ResolvedCompany {
            company,
            origin: CompanyOrigin::Provisioned,
        })
    }
}
