//! OpenAPI documentation for the REST API.
//!
//! Served by Swagger UI outside production and exported by the
//! `openapi-dump` binary.

use utoipa::OpenApi;

use crate::inbound::http::auth::{LoginRequest, LoginResponse};
use crate::inbound::http::envelope::{ErrorContext, ErrorDetail, ErrorResponse};
use crate::inbound::http::users::{CreateUserRequest, UserResponse};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "PFJ backend API",
        description = "User records and stub WeChat login. Every failure uses the ErrorResponse envelope."
    ),
    servers((url = "/", description = "Relative to the deployment base URL")),
    paths(
        crate::inbound::http::users::get_users,
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::get_user_by_id,
        crate::inbound::http::auth::wechat_login,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorResponse,
        ErrorContext,
        ErrorDetail,
        UserResponse,
        CreateUserRequest,
        LoginRequest,
        LoginResponse,
    )),
    tags(
        (name = "users", description = "User records"),
        (name = "auth", description = "Login"),
        (name = "health", description = "Orchestrator probes")
    )
)]
pub struct ApiDoc;
