//! Wire shapes exchanged with the company service.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Serialize)]
pub(super) struct CreateCompanyRequestDto<'a> {
    pub(super) name: &'a str,
}

/// Loosely typed response body.
///
/// Successful responses carry `id`, `name` and `apiKey`; failures carry an
/// `error` member and usually a `message`. Only the fields this service acts
/// on are decoded, and their types are checked by hand so a wrong type is
/// reported rather than silently ignored.
#[derive(Debug, Deserialize)]
pub(super) struct CreateCompanyResponseDto {
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    error: Option<Value>,
    #[serde(default)]
    message: Option<Value>,
}

/// Interpretation of a decoded response body.
#[derive(Debug, PartialEq, Eq)]
pub(super) enum CompanyReply {
    Created(String),
    Failed(String),
    Malformed(&'static str),
}

impl CreateCompanyResponseDto {
    pub(super) fn into_reply(self) -> CompanyReply {
        if self.error.as_ref().is_some_and(|error| !error.is_null()) {
            let message = match self.message {
                Some(Value::String(message)) => message,
                _ => "company service reported an error".to_owned(),
            };
            return CompanyReply::Failed(message);
        }
        match self.id {
            Some(Value::String(id)) => CompanyReply::Created(id),
            Some(_) => CompanyReply::Malformed("company id is not a string"),
            None => CompanyReply::Malformed("company id is missing"),
        }
    }
}
