//! Domain primitives, services and ports for user provisioning.
//!
//! Purpose: own the registration workflow and the user lookups without any
//! knowledge of HTTP, PostgreSQL or the remote company service. Inbound
//! adapters drive the services through the ports in [`ports`]; outbound
//! adapters implement the driven ports.
//!
//! Public surface:
//! - Error (alias to `error::Error`): transport-agnostic error payload.
//! - ObjectId, CompanyRef, UserId: canonical 12-byte identifiers.
//! - RegistrationRequest, NewUserRecord, UserRecord: the user data model.
//! - UserRegistrationService: the registration orchestrator.
//! - UserLookupService: the read-only query façade.

pub mod company_resolver;
mod deadline;
pub mod error;
pub mod identifier;
pub mod ports;
pub mod registration_error;
pub mod registration_service;
pub mod registration_validation;
pub mod trace_id;
pub mod uniqueness_guard;
pub mod user;
pub mod user_lookup_service;

pub use self::company_resolver::{CompanyOrigin, CompanyResolver, ResolvedCompany};
pub use self::deadline::OperationDeadline;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::identifier::{CompanyRef, IdentifierFormatError, ObjectId, UserId};
pub use self::registration_error::{
    QueryError, RegistrationError, ResolutionError, ResolutionErrorKind,
};
pub use self::registration_service::{
    LookupFailurePolicy, ParseLookupFailurePolicyError, RegistrationStage,
    UserRegistrationService,
};
pub use self::registration_validation::{
    RegistrationValidationError, RequiredField, validate_registration,
};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::uniqueness_guard::{EmailAvailability, check_email_available};
pub use self::user::{NewUserRecord, RegistrationRequest, UserRecord};
pub use self::user_lookup_service::UserLookupService;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use user_service::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<()> {
///     Err(Error::invalid_request("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
