//! Ports at the edge of the user domain.
//!
//! Driven ports ([`UserStore`], [`CompanyProvisioner`]) are implemented by
//! outbound adapters. Driving ports ([`UserRegistration`], [`UsersQuery`])
//! are what inbound adapters call.

mod macros;
pub(crate) use macros::define_port_error;

mod company_provisioner;
mod user_registration;
mod user_store;
mod users_query;

#[cfg(test)]
pub use company_provisioner::MockCompanyProvisioner;
pub use company_provisioner::{CompanyProvisioner, CompanyProvisionerError};
#[cfg(test)]
pub use user_registration::MockUserRegistration;
pub use user_registration::UserRegistration;
#[cfg(test)]
pub use user_store::MockUserStore;
pub use user_store::{UserStore, UserStoreError};
#[cfg(test)]
pub use users_query::MockUsersQuery;
pub use users_query::UsersQuery;
