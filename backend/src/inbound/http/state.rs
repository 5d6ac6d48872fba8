//! Shared HTTP adapter state.
//!
//! Handlers receive this through `actix_web::web::Data` and only see the
//! driving ports, so they can be tested against mocks without any I/O.

use std::sync::Arc;

use crate::domain::ports::{UserRegistration, UsersQuery};

/// Dependency bundle for the users handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Registration use-case.
    pub registration: Arc<dyn UserRegistration>,
    /// Lookup use-cases.
    pub users: Arc<dyn UsersQuery>,
}

impl HttpState {
    /// Bundle the driving ports.
    pub fn new(registration: Arc<dyn UserRegistration>, users: Arc<dyn UsersQuery>) -> Self {
        Self {
            registration,
            users,
        }
    }
}
