//! Read-only user lookups.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ports::{UserStore, UsersQuery};
use crate::domain::{CompanyRef, OperationDeadline, QueryError, UserId, UserRecord};

/// Query façade implementing [`UsersQuery`] over a [`UserStore`].
///
/// Multi-record reads clear every password before returning.
pub struct UserLookupService<S: ?Sized> {
    store: Arc<S>,
    deadline: OperationDeadline,
}

impl<S: ?Sized> Clone for UserLookupService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            deadline: self.deadline,
        }
    }
}

impl<S: ?Sized> UserLookupService<S> {
    /// Create a façade over `store`.
    pub fn new(store: Arc<S>, deadline: OperationDeadline) -> Self {
        Self { store, deadline }
    }
}

#[async_trait]
impl<S> UsersQuery for UserLookupService<S>
where
    S: UserStore + ?Sized,
{
    async fn find_by_id(&self, id: &UserId) -> Result<UserRecord, QueryError> {
        self.deadline
            .store("find_by_id", self.store.find_by_id(id))
            .await?
            .ok_or_else(|| {
                debug!(user_id = %id, "user not found");
                QueryError::NotFound
            })
    }

    async fn find_by_email(&self, email: &str) -> Result<UserRecord, QueryError> {
        self.deadline
            .store("find_by_email", self.store.find_by_email(email))
            .await?
            .ok_or_else(|| {
                debug!(email, "user not found");
                QueryError::NotFound
            })
    }

    async fn find_by_company(&self, company: &CompanyRef) -> Result<Vec<UserRecord>, QueryError> {
        let users = self
            .deadline
            .store("find_by_company", self.store.find_by_company(company))
            .await?;
        debug!(%company, count = users.len(), "company users fetched");
        Ok(users.into_iter().map(UserRecord::without_password).collect())
    }
}
