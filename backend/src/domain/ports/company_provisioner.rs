//! Driven port for the remote company service.
use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Errors raised while provisioning a company.
    pub enum CompanyProvisionerError {
        /// The request never produced a response.
        Transport { message: String } => "company service transport failed: {message}",
        /// The company service did not answer in time.
        Timeout { message: String } => "company service timed out: {message}",
        /// The company service answered with a failure.
        Rejected { message: String } => "company service rejected the request: {message}",
        /// The response could not be interpreted.
        Decode { message: String } => "company service response was malformed: {message}",
    }
}

/// Capability to create a company and obtain its identifier token.
///
/// The token is returned as received; callers decode it into a
/// [`crate::domain::CompanyRef`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompanyProvisioner: Send + Sync {
    /// Create a company with the given name.
    async fn create_company(&self, name: &str) -> Result<String, CompanyProvisionerError>;
}
