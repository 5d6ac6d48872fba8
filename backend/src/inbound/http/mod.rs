//! HTTP inbound adapter exposing the users REST endpoints.

pub mod envelope;
pub mod error;
pub mod health;
pub mod state;
pub mod users;

pub use envelope::Envelope;
pub use error::{ApiResult, json_error_handler};
