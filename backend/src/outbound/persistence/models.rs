//! Row types for the `users` table.
//!
//! Internal to the persistence adapter; the domain only ever sees
//! `UserRecord`.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::users;

/// Row read from `users`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: String,
    pub company: String,
    #[expect(dead_code, reason = "audit column not surfaced by the domain")]
    pub created_at: DateTime<Utc>,
}

/// Row inserted into `users`.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub role: &'a str,
    pub company: &'a str,
}
