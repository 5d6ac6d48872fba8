//! Tests for HTTP error mapping.

use super::*;
use actix_web::body::to_bytes;
use actix_web::{App, HttpResponse, post, test as actix_test, web};
use rstest::rstest;

use crate::domain::TraceId;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

async fn body_of(response: HttpResponse) -> Value {
    let bytes = to_bytes(response.into_body()).await.expect("body bytes");
    serde_json::from_slice(&bytes).expect("JSON body")
}

#[rstest]
#[case(Error::invalid_request("validation error"), StatusCode::BAD_REQUEST)]
#[case(Error::internal("company error"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] error: Error, #[case] expected: StatusCode) {
    assert_eq!(ResponseError::status_code(&error), expected);
}

#[actix_web::test]
async fn errors_render_as_envelopes_with_details_as_data() {
    let error = Error::internal("error creating a user")
        .with_details(json!({ "data": "user store query failed: disk full" }));

    let response = ResponseError::error_response(&error);
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_of(response).await,
        json!({
            "status": 500,
            "message": "error creating a user",
            "data": { "data": "user store query failed: disk full" },
        })
    );
}

#[actix_web::test]
async fn errors_without_details_render_null_data() {
    let error = Error::invalid_request("company query parameter is missing");

    let body = body_of(ResponseError::error_response(&error)).await;
    assert_eq!(body.get("status"), Some(&json!(400)));
    assert_eq!(body.get("data"), Some(&Value::Null));
}

#[actix_web::test]
async fn trace_id_is_echoed_in_the_header() {
    let trace_id: TraceId = TRACE_ID.parse().expect("valid trace id");
    let error =
        TraceId::scope(trace_id, async { Error::invalid_request("validation error") }).await;

    let response = ResponseError::error_response(&error);
    let header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok());
    assert_eq!(header, Some(TRACE_ID));
}

#[post("/echo")]
async fn echo(payload: web::Json<Value>) -> HttpResponse {
    HttpResponse::Ok().json(payload.into_inner())
}

#[actix_web::test]
async fn malformed_json_bodies_become_invalid_request_envelopes() {
    let app = actix_test::init_service(
        App::new()
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .service(echo),
    )
    .await;

    let request = actix_test::TestRequest::post()
        .uri("/echo")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body.get("message"), Some(&json!("invalid request body")));
    assert!(body.pointer("/data/data").is_some_and(Value::is_string));
}
