//! Builders wiring the store, the company provisioner and the services into
//! the HTTP state.

use std::sync::Arc;

use actix_web::web;
use tracing::{info, warn};

use user_service::domain::ports::{CompanyProvisioner, UserStore};
use user_service::domain::{OperationDeadline, UserLookupService, UserRegistrationService};
use user_service::inbound::http::state::HttpState;
use user_service::outbound::company::HttpCompanyProvisioner;
use user_service::outbound::memory::InMemoryUserStore;
use user_service::outbound::persistence::{DbPool, DieselUserStore};

use super::ServerConfig;

/// Select the user store: PostgreSQL when a pool is configured, memory
/// otherwise.
fn build_user_store(pool: Option<&DbPool>) -> Arc<dyn UserStore> {
    match pool {
        Some(pool) => {
            info!("users persisted in PostgreSQL");
            Arc::new(DieselUserStore::new(pool.clone()))
        }
        None => {
            warn!("no database configured; users are kept in memory and lost on restart");
            Arc::new(InMemoryUserStore::new())
        }
    }
}

/// Assemble the services behind the users handlers over the given adapters.
pub(crate) fn build_services(
    store: Arc<dyn UserStore>,
    provisioner: Arc<dyn CompanyProvisioner>,
    config: &ServerConfig,
) -> HttpState {
    let deadline = OperationDeadline::new(config.request_timeout);
    let registration = UserRegistrationService::new(Arc::clone(&store), provisioner, deadline)
        .with_lookup_failure_policy(config.lookup_failure_policy);
    let users = UserLookupService::new(store, deadline);
    HttpState::new(Arc::new(registration), Arc::new(users))
}

/// Build the shared HTTP state from configuration.
///
/// # Errors
///
/// Returns [`std::io::Error`] when the company service client cannot be
/// constructed.
pub(crate) fn build_http_state(config: &ServerConfig) -> std::io::Result<web::Data<HttpState>> {
    let provisioner =
        HttpCompanyProvisioner::new(config.company_endpoint.clone(), config.request_timeout)
            .map_err(|err| {
                std::io::Error::other(format!("company service client setup failed: {err}"))
            })?;
    info!(endpoint = %provisioner.endpoint(), "company provisioner configured");

    let store = build_user_store(config.db_pool.as_ref());
    Ok(web::Data::new(build_services(
        store,
        Arc::new(provisioner),
        config,
    )))
}
