//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the users endpoints, the health probes and the wire
//! schemas they exchange. The generated document is served by Swagger UI in
//! debug builds and exported via `cargo run --bin openapi-dump`.

use utoipa::OpenApi;

use crate::inbound::http::Envelope;
use crate::inbound::http::users::{CreateUserRequest, UserDto};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "User service API",
        description = "User registration with company provisioning, and user lookups."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::list_users,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(Envelope, UserDto, CreateUserRequest)),
    tags(
        (name = "users", description = "Registration and lookup of users"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    #[case("/users")]
    #[case("/users/{user_id}")]
    #[case("/health/ready")]
    #[case("/health/live")]
    fn paths_are_registered(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing path {path}");
    }

    #[rstest]
    fn users_path_documents_create_and_list() {
        let doc = ApiDoc::openapi();
        let item = doc.paths.paths.get("/users").expect("users path");
        assert!(item.post.is_some());
        assert!(item.get.is_some());
    }

    #[rstest]
    fn user_schema_uses_the_wire_identifier_name() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let user = schemas.get("UserDto").expect("UserDto schema");
        assert_object_schema_has_field(user, "_id");
        assert_object_schema_has_field(user, "company");
    }

    #[rstest]
    fn envelope_schema_has_status_message_and_data() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let envelope = schemas.get("Envelope").expect("Envelope schema");
        for field in ["status", "message", "data"] {
            assert_object_schema_has_field(envelope, field);
        }
    }
}
