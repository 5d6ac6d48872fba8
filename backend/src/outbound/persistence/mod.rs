//! PostgreSQL persistence via Diesel.
//!
//! Row types (`models.rs`) and table definitions (`schema.rs`) stay private to
//! this module; the adapters translate to and from domain records. Async
//! access goes through `diesel-async` connections held in a `bb8` pool.

mod diesel_user_store;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_user_store::DieselUserStore;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
