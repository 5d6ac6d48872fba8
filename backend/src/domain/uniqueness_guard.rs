//! Email uniqueness pre-check.
//!
//! The check is advisory: two concurrent registrations can both observe
//! [`EmailAvailability::Available`]. The store's unique constraint settles
//! that race and reports [`UserStoreError::DuplicateEmail`].

use super::ports::{UserStore, UserStoreError};
use super::{OperationDeadline, UserRecord};

/// Three-way result of the uniqueness lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmailAvailability {
    /// No record holds the email.
    Available,
    /// A record already holds the email.
    Taken(Box<UserRecord>),
    /// The lookup itself failed.
    LookupFailed(UserStoreError),
}

/// Look up `email` in `store`, bounded by `deadline`.
pub async fn check_email_available<S>(
    store: &S,
    email: &str,
    deadline: OperationDeadline,
) -> EmailAvailability
where
    S: UserStore + ?Sized,
{
    match deadline
        .store("find_by_email", store.find_by_email(email))
        .await
    {
        Ok(None) => EmailAvailability::Available,
        Ok(Some(existing)) => EmailAvailability::Taken(Box::new(existing)),
        Err(err) => EmailAvailability::LookupFailed(err),
    }
}
