//! User data model.
//!
//! ## Invariants
//! - A [`UserRecord`] always carries a store-assigned [`UserId`] and a
//!   resolved [`CompanyRef`]; neither changes after creation.
//! - Email uniqueness is a store-wide property, not a property of any single
//!   value here.
//! - `password` is opaque and stored verbatim. Hashing is outside this
//!   service.

use super::{CompanyRef, UserId};

/// Untrusted registration payload.
///
/// `company` holds either a company name (provisioning flow) or a company
/// reference token (invitation flow), depending on `invitation`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationRequest {
    /// Display name of the user.
    pub name: String,
    /// Email address; the natural key of a user.
    pub email: String,
    /// Opaque credential, passed through untouched.
    pub password: String,
    /// Role label within the company.
    pub role: String,
    /// Company name or company reference token.
    pub company: String,
    /// Whether the user joins an existing company.
    pub invitation: bool,
}

/// User record ready for insertion; the store assigns its identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUserRecord {
    /// Display name of the user.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Opaque credential.
    pub password: String,
    /// Role label.
    pub role: String,
    /// Resolved company.
    pub company: CompanyRef,
}

impl NewUserRecord {
    /// Assemble a record from the verbatim request fields and the resolved
    /// company.
    pub fn from_request(request: RegistrationRequest, company: CompanyRef) -> Self {
        let RegistrationRequest {
            name,
            email,
            password,
            role,
            company: _,
            invitation: _,
        } = request;
        Self {
            name,
            email,
            password,
            role,
            company,
        }
    }

    /// Attach the store-assigned identifier.
    pub fn into_record(self, id: UserId) -> UserRecord {
        let Self {
            name,
            email,
            password,
            role,
            company,
        } = self;
        UserRecord {
            id,
            name,
            email,
            password,
            role,
            company,
        }
    }
}

/// Persisted user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    /// Store-assigned identifier.
    pub id: UserId,
    /// Display name of the user.
    pub name: String,
    /// Email address, unique across records.
    pub email: String,
    /// Opaque credential; empty when scrubbed for multi-record reads.
    pub password: String,
    /// Role label.
    pub role: String,
    /// Company the user belongs to.
    pub company: CompanyRef,
}

impl UserRecord {
    /// Return the record with its password cleared.
    #[must_use]
    pub fn without_password(mut self) -> Self {
        self.password.clear();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    const COMPANY: &str = "649060d540e3b169621e9629";
    const USER: &str = "648a26b07c0d535bb1526e1a";

    #[fixture]
    fn request() -> RegistrationRequest {
        RegistrationRequest {
            name: "Test User".to_owned(),
            email: "test@example.com".to_owned(),
            password: "password".to_owned(),
            role: "admin".to_owned(),
            company: "Acme".to_owned(),
            invitation: false,
        }
    }

    #[rstest]
    fn new_record_keeps_request_fields_and_resolved_company(request: RegistrationRequest) {
        let company = CompanyRef::decode(COMPANY).expect("company");
        let record = NewUserRecord::from_request(request, company);

        assert_eq!(record.name, "Test User");
        assert_eq!(record.email, "test@example.com");
        assert_eq!(record.password, "password");
        assert_eq!(record.role, "admin");
        assert_eq!(record.company, company);
    }

    #[rstest]
    fn into_record_attaches_identifier(request: RegistrationRequest) {
        let company = CompanyRef::decode(COMPANY).expect("company");
        let id = UserId::decode(USER).expect("user id");
        let record = NewUserRecord::from_request(request, company).into_record(id);

        assert_eq!(record.id, id);
        assert_eq!(record.company.to_string(), COMPANY);
    }

    #[rstest]
    fn without_password_clears_only_the_password(request: RegistrationRequest) {
        let company = CompanyRef::decode(COMPANY).expect("company");
        let record = NewUserRecord::from_request(request, company)
            .into_record(UserId::generate())
            .without_password();

        assert!(record.password.is_empty());
        assert_eq!(record.email, "test@example.com");
    }
}
