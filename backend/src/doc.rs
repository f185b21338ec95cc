//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the post endpoints, the health probes and the schema
//! wrappers for the domain error envelope. Swagger UI serves it in debug
//! builds and `cargo run --bin openapi-dump` exports it for tooling.

use crate::inbound::http::posts_dto::{PostRequest, PostResponse, UserResponse};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Blog backend API",
        description = "CRUD access to blog posts and their authors, plus health probes."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::posts::list_posts,
        crate::inbound::http::posts::get_post,
        crate::inbound::http::posts::create_post,
        crate::inbound::http::posts::update_post,
        crate::inbound::http::posts::delete_post,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        PostRequest,
        PostResponse,
        UserResponse,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "posts", description = "Blog post operations"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
