//! Outbound adapters implementing the driven ports.
//!
//! - **persistence**: PostgreSQL `UserStore` over Diesel
//! - **memory**: in-process `UserStore`
//! - **company**: HTTP `CompanyProvisioner`
//!
//! Adapters translate between domain types and infrastructure
//! representations and contain no business logic.

pub mod company;
pub mod memory;
pub mod persistence;
