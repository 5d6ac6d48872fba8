//! Diesel table definitions.
//!
//! Must match `backend/migrations` exactly; regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Registered users.
    ///
    /// `email` carries a unique index and `company` a plain index.
    users (id) {
        /// 24-character lower-case hexadecimal identifier.
        id -> Varchar,
        name -> Text,
        email -> Text,
        /// Stored verbatim.
        password -> Text,
        role -> Text,
        /// Company identifier in the same hexadecimal form as `id`.
        company -> Varchar,
        created_at -> Timestamptz,
    }
}
