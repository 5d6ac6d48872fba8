//! In-process `UserStore` for tests and database-less development runs.
//!
//! Records live in a `BTreeMap` keyed by an insertion sequence, so listings
//! come back in creation order like the PostgreSQL store's. Email uniqueness
//! is checked under the write lock, which makes the check and the insert
//! atomic.

use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;

use crate::domain::ports::{UserStore, UserStoreError};
use crate::domain::{CompanyRef, NewUserRecord, UserId, UserRecord};

/// Volatile user store.
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    users: RwLock<BTreeMap<u64, UserRecord>>,
}

impl InMemoryUserStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.users.read().map(|users| users.len()).unwrap_or_default()
    }

    /// Whether no records are stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned<T>(_: PoisonError<T>) -> UserStoreError {
    UserStoreError::connection("in-memory user store lock poisoned")
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn create(&self, user: &NewUserRecord) -> Result<UserId, UserStoreError> {
        let mut users = self.users.write().map_err(poisoned)?;
        if users.values().any(|existing| existing.email == user.email) {
            return Err(UserStoreError::duplicate_email(user.email.as_str()));
        }
        let id = UserId::generate();
        let sequence = users.last_key_value().map_or(0, |(last, _)| last + 1);
        users.insert(sequence, user.clone().into_record(id));
        Ok(id)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserRecord>, UserStoreError> {
        let users = self.users.read().map_err(poisoned)?;
        Ok(users.values().find(|user| user.id == *id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, UserStoreError> {
        let users = self.users.read().map_err(poisoned)?;
        Ok(users.values().find(|user| user.email == email).cloned())
    }

    async fn find_by_company(
        &self,
        company: &CompanyRef,
    ) -> Result<Vec<UserRecord>, UserStoreError> {
        let users = self.users.read().map_err(poisoned)?;
        Ok(users
            .values()
            .filter(|user| user.company == *company)
            .cloned()
            .collect())
    }
}
