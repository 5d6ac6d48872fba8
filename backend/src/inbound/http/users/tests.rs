//! Tests for the users handlers.

use std::sync::Arc;

use actix_web::{App, test as actix_test, web};
use rstest::rstest;
use serde_json::{Value, json};

use super::*;
use crate::domain::ports::{
    CompanyProvisionerError, MockUserRegistration, MockUsersQuery, UserStoreError,
};
use crate::domain::{IdentifierFormatError, ResolutionError, validate_registration};
use crate::inbound::http::json_error_handler;

const COMPANY: &str = "649060d540e3b169621e9629";
const USER: &str = "648a26b07c0d535bb1526e1a";

fn record() -> UserRecord {
    UserRecord {
        id: UserId::decode(USER).expect("fixture user"),
        name: "Test User".to_owned(),
        email: "test@example.com".to_owned(),
        password: "password".to_owned(),
        role: "admin".to_owned(),
        company: CompanyRef::decode(COMPANY).expect("fixture company"),
    }
}

fn registration_payload() -> Value {
    json!({
        "name": "Test User",
        "email": "test@example.com",
        "password": "password",
        "role": "admin",
        "company": COMPANY,
        "invitation": true,
    })
}

fn state(registration: MockUserRegistration, users: MockUsersQuery) -> HttpState {
    HttpState::new(Arc::new(registration), Arc::new(users))
}

async fn call(state: HttpState, request: actix_test::TestRequest) -> (u16, Value) {
    let app = actix_test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .service(create_user)
            .service(get_user)
            .service(list_users),
    )
    .await;
    let response = actix_test::call_service(&app, request.to_request()).await;
    let status = response.status().as_u16();
    let body: Value = actix_test::read_body_json(response).await;
    (status, body)
}

fn registration_failing_with(err: RegistrationError) -> MockUserRegistration {
    let mut registration = MockUserRegistration::new();
    registration
        .expect_register()
        .times(1)
        .return_once(move |_| Err(err));
    registration
}

fn idle_query() -> MockUsersQuery {
    let mut users = MockUsersQuery::new();
    users.expect_find_by_id().times(0);
    users.expect_find_by_email().times(0);
    users.expect_find_by_company().times(0);
    users
}

fn idle_registration() -> MockUserRegistration {
    let mut registration = MockUserRegistration::new();
    registration.expect_register().times(0);
    registration
}

#[actix_web::test]
async fn create_user_returns_created_envelope() {
    let mut registration = MockUserRegistration::new();
    registration
        .expect_register()
        .withf(|request: &RegistrationRequest| {
            request.invitation && request.company == COMPANY && request.email == "test@example.com"
        })
        .times(1)
        .return_once(|_| Ok(record()));

    let (status, body) = call(
        state(registration, idle_query()),
        actix_test::TestRequest::post()
            .uri("/users")
            .set_json(registration_payload()),
    )
    .await;

    assert_eq!(status, 201);
    assert_eq!(
        body,
        json!({
            "status": 201,
            "message": "success",
            "data": {
                "user": {
                    "_id": USER,
                    "name": "Test User",
                    "email": "test@example.com",
                    "password": "password",
                    "role": "admin",
                    "company": COMPANY,
                }
            }
        })
    );
}

#[actix_web::test]
async fn absent_fields_reach_validation_as_empty_strings() {
    let mut registration = MockUserRegistration::new();
    registration
        .expect_register()
        .withf(|request: &RegistrationRequest| {
            request.email == "ada@example.com"
                && request.name.is_empty()
                && request.company.is_empty()
                && !request.invitation
        })
        .times(1)
        .return_once(|request| Err(validate_registration(&request).expect_err("missing").into()));

    let (status, body) = call(
        state(registration, idle_query()),
        actix_test::TestRequest::post()
            .uri("/users")
            .set_json(json!({ "email": "ada@example.com" })),
    )
    .await;

    assert_eq!(status, 400);
    assert_eq!(body["message"], "validation error");
    assert_eq!(
        body["data"]["data"],
        "missing required fields: name, password, role, company"
    );
}

#[rstest]
#[case(
    RegistrationError::already_exists("test@example.com"),
    400,
    "User already exists with email: test@example.com",
    "User already exists with email: test@example.com"
)]
#[case(
    RegistrationError::Resolution(ResolutionError::invalid_reference(
        IdentifierFormatError::InvalidLength { actual: 11 }
    )),
    500,
    "error on companyId as an object",
    "invalid company reference: identifier must be 24 hexadecimal characters (got 11)"
)]
#[case(
    RegistrationError::Resolution(ResolutionError::provisioning_failed(
        &CompanyProvisionerError::rejected("status 503")
    )),
    500,
    "company error",
    "company service rejected the request: status 503"
)]
#[case(
    RegistrationError::Persistence(UserStoreError::query("disk full")),
    500,
    "error creating a user",
    "user store query failed: disk full"
)]
#[actix_web::test]
async fn registration_failures_map_to_envelopes(
    #[case] err: RegistrationError,
    #[case] expected_status: u16,
    #[case] expected_message: &str,
    #[case] expected_data: &str,
) {
    let (status, body) = call(
        state(registration_failing_with(err), idle_query()),
        actix_test::TestRequest::post()
            .uri("/users")
            .set_json(registration_payload()),
    )
    .await;

    assert_eq!(status, expected_status);
    assert_eq!(body["status"], expected_status);
    assert_eq!(body["message"], expected_message);
    assert_eq!(body["data"]["data"], expected_data);
}

#[actix_web::test]
async fn malformed_bodies_are_bad_requests() {
    let (status, body) = call(
        state(idle_registration(), idle_query()),
        actix_test::TestRequest::post()
            .uri("/users")
            .insert_header(("content-type", "application/json"))
            .set_payload("{\"name\":"),
    )
    .await;

    assert_eq!(status, 400);
    assert_eq!(body["message"], "invalid request body");
}

#[actix_web::test]
async fn get_user_returns_the_record() {
    let mut users = MockUsersQuery::new();
    users
        .expect_find_by_id()
        .withf(|id: &UserId| id.to_string() == USER)
        .times(1)
        .return_once(|_| Ok(record()));

    let (status, body) = call(
        state(idle_registration(), users),
        actix_test::TestRequest::get().uri(&format!("/users/{USER}")),
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(body["message"], "success");
    assert_eq!(body["data"]["user"]["_id"], USER);
    assert_eq!(body["data"]["user"]["company"], COMPANY);
}

#[rstest]
#[case("not-an-id")]
#[case("648a26b07c0d535bb1526e1")]
#[actix_web::test]
async fn undecodable_user_ids_are_lookup_failures(#[case] token: &str) {
    let (status, body) = call(
        state(idle_registration(), idle_query()),
        actix_test::TestRequest::get().uri(&format!("/users/{token}")),
    )
    .await;

    assert_eq!(status, 500);
    assert_eq!(body["message"], "Error getting a user from database");
    assert!(body["data"]["data"].is_string());
}

#[actix_web::test]
async fn unknown_user_is_a_lookup_failure() {
    let mut users = MockUsersQuery::new();
    users
        .expect_find_by_id()
        .times(1)
        .return_once(|_| Err(QueryError::NotFound));

    let (status, body) = call(
        state(idle_registration(), users),
        actix_test::TestRequest::get().uri(&format!("/users/{USER}")),
    )
    .await;

    assert_eq!(status, 500);
    assert_eq!(body["message"], "Error getting a user from database");
    assert_eq!(body["data"]["data"], "user not found");
}

#[actix_web::test]
async fn email_filter_takes_priority_over_company() {
    let mut users = MockUsersQuery::new();
    users
        .expect_find_by_email()
        .withf(|email: &str| email == "test@example.com")
        .times(1)
        .return_once(|_| Ok(record()));
    users.expect_find_by_company().times(0);

    let (status, body) = call(
        state(idle_registration(), users),
        actix_test::TestRequest::get()
            .uri(&format!("/users?email=test%40example.com&company={COMPANY}")),
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(body["data"]["user"]["email"], "test@example.com");
}

#[actix_web::test]
async fn unknown_email_is_a_lookup_failure() {
    let mut users = MockUsersQuery::new();
    users
        .expect_find_by_email()
        .times(1)
        .return_once(|_| Err(QueryError::NotFound));

    let (status, body) = call(
        state(idle_registration(), users),
        actix_test::TestRequest::get().uri("/users?email=nobody%40example.com"),
    )
    .await;

    assert_eq!(status, 500);
    assert_eq!(body["message"], "Error getting a user from database");
}

#[actix_web::test]
async fn company_listing_returns_scrubbed_users() {
    let mut users = MockUsersQuery::new();
    users
        .expect_find_by_company()
        .withf(|company: &CompanyRef| company.to_string() == COMPANY)
        .times(1)
        .return_once(|_| Ok(vec![record().without_password()]));

    let (status, body) = call(
        state(idle_registration(), users),
        actix_test::TestRequest::get().uri(&format!("/users?company={COMPANY}")),
    )
    .await;

    assert_eq!(status, 200);
    let listed = body["data"]["users"].as_array().expect("users array");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["password"], "");
}

#[rstest]
#[case("/users")]
#[case("/users?company=")]
#[case("/users?company=undefined")]
#[case("/users?email=")]
#[actix_web::test]
async fn missing_company_is_a_bad_request(#[case] uri: &str) {
    let (status, body) = call(
        state(idle_registration(), idle_query()),
        actix_test::TestRequest::get().uri(uri),
    )
    .await;

    assert_eq!(status, 400);
    assert_eq!(
        body,
        json!({
            "status": 400,
            "message": "company query parameter is missing",
            "data": null,
        })
    );
}

#[actix_web::test]
async fn undecodable_company_lists_nobody() {
    let (status, body) = call(
        state(idle_registration(), idle_query()),
        actix_test::TestRequest::get().uri("/users?company=Acme"),
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(body["data"], json!({ "users": [] }));
}

#[actix_web::test]
async fn company_listing_failures_hide_details() {
    let mut users = MockUsersQuery::new();
    users
        .expect_find_by_company()
        .times(1)
        .return_once(|_| Err(QueryError::Store(UserStoreError::connection("refused"))));

    let (status, body) = call(
        state(idle_registration(), users),
        actix_test::TestRequest::get().uri(&format!("/users?company={COMPANY}")),
    )
    .await;

    assert_eq!(status, 500);
    assert_eq!(body["message"], "failed to fetch users");
    assert_eq!(body["data"], Value::Null);
}
