//! HTTP mapping for domain errors.
//!
//! Domain [`Error`]s render as the users [`Envelope`]: the error message
//! becomes `message` and the optional details become `data`. The trace
//! identifier, when present, is echoed in the `trace-id` header.

use actix_web::error::JsonPayloadError;
use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode};
use serde_json::{Value, json};
use tracing::debug;

use super::Envelope;
use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let mut builder = HttpResponse::build(status);
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }

        let data = self.details().cloned().unwrap_or(Value::Null);
        builder.json(Envelope::new(status, self.message(), data))
    }
}

/// Render malformed JSON bodies as a 400 envelope instead of actix's plain
/// text default.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, "rejected malformed JSON body");
    Error::invalid_request("invalid request body")
        .with_details(json!({ "data": err.to_string() }))
        .into()
}

#[cfg(test)]
mod tests;
