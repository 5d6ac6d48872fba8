//! Driven port for user persistence.
use async_trait::async_trait;

use crate::domain::{CompanyRef, NewUserRecord, UserId, UserRecord};

use super::define_port_error;

define_port_error! {
    /// Errors raised by user store adapters.
    pub enum UserStoreError {
        /// The store could not be reached.
        Connection { message: String } => "user store connection failed: {message}",
        /// A query or insert failed during execution.
        Query { message: String } => "user store query failed: {message}",
        /// Another record already owns the email.
        DuplicateEmail { email: String } => "user store already holds email: {email}",
        /// The operation exceeded its deadline.
        Timeout { operation: String } => "user store operation timed out: {operation}",
    }
}

/// Persistence capability for user records.
///
/// Absence is reported as `Ok(None)` or an empty list, never as an error.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a record and return the identifier the store assigned.
    ///
    /// Must fail with [`UserStoreError::DuplicateEmail`] when the email is
    /// already taken.
    async fn create(&self, user: &NewUserRecord) -> Result<UserId, UserStoreError>;

    /// Fetch a record by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserRecord>, UserStoreError>;

    /// Fetch a record by exact email.
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, UserStoreError>;

    /// Fetch every record belonging to a company.
    async fn find_by_company(
        &self,
        company: &CompanyRef,
    ) -> Result<Vec<UserRecord>, UserStoreError>;
}
