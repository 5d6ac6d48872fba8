//! Company service outbound adapters.
//!
//! A thin HTTP implementation of the `CompanyProvisioner` port.

mod dto;
mod http_provisioner;

pub use http_provisioner::HttpCompanyProvisioner;
