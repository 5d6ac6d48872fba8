//! Users API handlers.
//!
//! ```text
//! POST /users {"name":"Ada","email":"ada@example.com","password":"pw","role":"admin","company":"Acme"}
//! GET /users/{user_id}
//! GET /users?email=ada@example.com
//! GET /users?company=649060d540e3b169621e9629
//! ```
//!
//! Every response uses the [`Envelope`] shape. Failure messages are part of
//! the public contract and must not change.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info, warn};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{
    CompanyRef, Error, QueryError, RegistrationError, RegistrationRequest, ResolutionErrorKind,
    UserId, UserRecord,
};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{ApiResult, Envelope};

const LOOKUP_FAILED: &str = "Error getting a user from database";
const LIST_FAILED: &str = "failed to fetch users";
const COMPANY_MISSING: &str = "company query parameter is missing";

/// Registration body for `POST /users`.
///
/// Absent string fields decode as empty so validation can report all of them
/// together.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct CreateUserRequest {
    #[serde(default)]
    #[schema(example = "Ada Lovelace")]
    pub name: String,
    #[serde(default)]
    #[schema(example = "ada@example.com")]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    #[schema(example = "admin")]
    pub role: String,
    /// Company name, or a company id when `invitation` is true.
    #[serde(default)]
    #[schema(example = "Acme")]
    pub company: String,
    #[serde(default)]
    pub invitation: bool,
}

impl From<CreateUserRequest> for RegistrationRequest {
    fn from(value: CreateUserRequest) -> Self {
        Self {
            name: value.name,
            email: value.email,
            password: value.password,
            role: value.role,
            company: value.company,
            invitation: value.invitation,
        }
    }
}

/// User as rendered on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct UserDto {
    #[serde(rename = "_id")]
    #[schema(example = "648a26b07c0d535bb1526e1a")]
    pub id: String,
    pub name: String,
    pub email: String,
    /// Empty on list responses.
    pub password: String,
    pub role: String,
    #[schema(example = "649060d540e3b169621e9629")]
    pub company: String,
}

impl From<UserRecord> for UserDto {
    fn from(value: UserRecord) -> Self {
        Self {
            id: value.id.to_string(),
            name: value.name,
            email: value.email,
            password: value.password,
            role: value.role,
            company: value.company.to_string(),
        }
    }
}

/// Filters for `GET /users`. `email` wins when both are present.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListUsersQuery {
    /// Exact email of a single user.
    pub email: Option<String>,
    /// Company whose users to list.
    pub company: Option<String>,
}

fn map_registration_error(err: RegistrationError) -> Error {
    let message = match &err {
        RegistrationError::Validation(_) => "validation error".to_owned(),
        RegistrationError::AlreadyExists { .. } => err.to_string(),
        RegistrationError::Resolution(resolution) => match resolution.kind() {
            ResolutionErrorKind::InvalidReference => "error on companyId as an object".to_owned(),
            ResolutionErrorKind::ProvisioningFailed => "company error".to_owned(),
        },
        RegistrationError::Persistence(_) => "error creating a user".to_owned(),
    };
    let details = json!({ "data": err.to_string() });
    match err {
        RegistrationError::Validation(_) | RegistrationError::AlreadyExists { .. } => {
            warn!(error = %err, "registration rejected");
            Error::invalid_request(message).with_details(details)
        }
        RegistrationError::Resolution(_) | RegistrationError::Persistence(_) => {
            error!(error = %err, "registration failed");
            Error::internal(message).with_details(details)
        }
    }
}

fn lookup_error(reason: impl std::fmt::Display) -> Error {
    error!(error = %reason, "user lookup failed");
    Error::internal(LOOKUP_FAILED).with_details(json!({ "data": reason.to_string() }))
}

fn single_user(user: UserRecord) -> HttpResponse {
    Envelope::success(StatusCode::OK, json!({ "user": UserDto::from(user) })).into_response()
}

/// Register a user, provisioning their company unless invited.
#[utoipa::path(
    post,
    path = "/users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created; data.user holds the record", body = Envelope),
        (status = 400, description = "Validation failure, duplicate email or malformed body", body = Envelope),
        (status = 500, description = "Company or store failure", body = Envelope)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<CreateUserRequest>,
) -> ApiResult<HttpResponse> {
    let user = state
        .registration
        .register(payload.into_inner().into())
        .await
        .map_err(map_registration_error)?;
    info!(user_id = %user.id, "user created");
    Ok(Envelope::success(StatusCode::CREATED, json!({ "user": UserDto::from(user) })).into_response())
}

/// Fetch one user by identifier.
#[utoipa::path(
    get,
    path = "/users/{user_id}",
    params(("user_id" = String, Path, description = "24-character hexadecimal user id")),
    responses(
        (status = 200, description = "data.user holds the record", body = Envelope),
        (status = 500, description = "Unknown or malformed id, or store failure", body = Envelope)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{user_id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = UserId::decode(&path).map_err(lookup_error)?;
    let user = state.users.find_by_id(&id).await.map_err(lookup_error)?;
    Ok(single_user(user))
}

/// Fetch a user by email, or list a company's users.
#[utoipa::path(
    get,
    path = "/users",
    params(ListUsersQuery),
    responses(
        (status = 200, description = "data.user or data.users", body = Envelope),
        (status = 400, description = "Neither email nor company supplied", body = Envelope),
        (status = 500, description = "Store failure", body = Envelope)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(
    state: web::Data<HttpState>,
    query: web::Query<ListUsersQuery>,
) -> ApiResult<HttpResponse> {
    let ListUsersQuery { email, company } = query.into_inner();

    if let Some(email) = email.filter(|email| !email.is_empty()) {
        let user = state
            .users
            .find_by_email(&email)
            .await
            .map_err(lookup_error)?;
        return Ok(single_user(user));
    }

    let Some(company) = company.filter(|company| !company.is_empty() && company != "undefined")
    else {
        warn!("{COMPANY_MISSING}");
        return Err(Error::invalid_request(COMPANY_MISSING));
    };

    // A token that cannot be an identifier cannot match any stored user.
    let users = match CompanyRef::decode(&company) {
        Ok(company) => state
            .users
            .find_by_company(&company)
            .await
            .map_err(|err: QueryError| {
                error!(error = %err, "company listing failed");
                Error::internal(LIST_FAILED)
            })?,
        Err(_) => Vec::new(),
    };

    let users: Vec<UserDto> = users.into_iter().map(UserDto::from).collect();
    Ok(Envelope::success(StatusCode::OK, json!({ "users": users })).into_response())
}

#[cfg(test)]
mod tests;
