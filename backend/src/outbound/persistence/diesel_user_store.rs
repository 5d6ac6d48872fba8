//! PostgreSQL-backed `UserStore` using Diesel.
//!
//! Identifiers are minted here with [`ObjectId::generate`] and stored as
//! 24-character hexadecimal text. The unique index on `users.email` is what
//! ultimately enforces email uniqueness; a violation surfaces as
//! [`UserStoreError::DuplicateEmail`].

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{UserStore, UserStoreError};
use crate::domain::{CompanyRef, NewUserRecord, ObjectId, UserId, UserRecord};

use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel implementation of the [`UserStore`] port.
#[derive(Clone)]
pub struct DieselUserStore {
    pool: DbPool,
}

impl DieselUserStore {
    /// Create a store over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserStoreError {
    UserStoreError::connection(error.into_message())
}

fn map_diesel_error(error: diesel::result::Error, email: Option<&str>) -> UserStoreError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            UserStoreError::duplicate_email(email.unwrap_or_default())
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            UserStoreError::connection("database connection error")
        }
        DieselError::QueryBuilderError(_) => UserStoreError::query("database query error"),
        _ => UserStoreError::query("database error"),
    }
}

fn row_to_record(row: UserRow) -> Result<UserRecord, UserStoreError> {
    let id = UserId::decode(&row.id).map_err(|err| {
        UserStoreError::query(format!("stored user id `{}` is malformed: {err}", row.id))
    })?;
    let company = CompanyRef::decode(&row.company).map_err(|err| {
        UserStoreError::query(format!(
            "stored company id `{}` is malformed: {err}",
            row.company
        ))
    })?;
    Ok(UserRecord {
        id,
        name: row.name,
        email: row.email,
        password: row.password,
        role: row.role,
        company,
    })
}

#[async_trait]
impl UserStore for DieselUserStore {
    async fn create(&self, user: &NewUserRecord) -> Result<UserId, UserStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let id = UserId::from_object_id(ObjectId::generate());
        let id_text = id.to_string();
        let company_text = user.company.to_string();
        let row = NewUserRow {
            id: &id_text,
            name: &user.name,
            email: &user.email,
            password: &user.password,
            role: &user.role,
            company: &company_text,
        };

        diesel::insert_into(users::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, Some(&user.email)))?;
        Ok(id)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserRecord>, UserStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        users::table
            .filter(users::id.eq(id.to_string()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, None))?
            .map(row_to_record)
            .transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, UserStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        users::table
            .filter(users::email.eq(email))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, None))?
            .map(row_to_record)
            .transpose()
    }

    async fn find_by_company(
        &self,
        company: &CompanyRef,
    ) -> Result<Vec<UserRecord>, UserStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<UserRow> = users::table
            .filter(users::company.eq(company.to_string()))
            .order(users::created_at.asc())
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, None))?;
        rows.into_iter().map(row_to_record).collect()
    }
}
