//! Driving port for read-only user lookups.

use async_trait::async_trait;

use crate::domain::{CompanyRef, QueryError, UserId, UserRecord};

/// Lookup use-cases exposed to inbound adapters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Fetch one user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<UserRecord, QueryError>;

    /// Fetch one user by email.
    async fn find_by_email(&self, email: &str) -> Result<UserRecord, QueryError>;

    /// List a company's users with passwords cleared.
    async fn find_by_company(&self, company: &CompanyRef) -> Result<Vec<UserRecord>, QueryError>;
}
