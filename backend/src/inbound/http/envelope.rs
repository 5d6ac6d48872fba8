//! Response envelope shared by every users endpoint.
//!
//! Success and failure bodies have the same shape:
//! `{"status": <http status>, "message": <text>, "data": <object or null>}`.

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// Uniform JSON envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Envelope {
    /// Numeric HTTP status, repeated in the body.
    #[schema(example = 201)]
    pub status: u16,
    /// `success` or a short failure description.
    #[schema(example = "success")]
    pub message: String,
    /// Payload: `{"user": ..}`, `{"users": [..]}`, `{"data": <error text>}`
    /// or `null`.
    #[schema(value_type = Object, nullable = true)]
    pub data: Value,
}

impl Envelope {
    /// Build an envelope for `status`.
    pub fn new(status: StatusCode, message: impl Into<String>, data: Value) -> Self {
        Self {
            status: status.as_u16(),
            message: message.into(),
            data,
        }
    }

    /// Successful envelope carrying `data`.
    pub fn success(status: StatusCode, data: Value) -> Self {
        Self::new(status, "success", data)
    }

    /// Render as an HTTP response with the matching status.
    pub fn into_response(self) -> HttpResponse {
        let status =
            StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        HttpResponse::build(status).json(self)
    }
}
