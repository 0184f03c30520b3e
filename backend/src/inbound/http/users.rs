//! Users API handlers.
//!
//! ```text
//! GET /users?page=1&limit=10
//! POST /users {"name":"Ada","email":"ada@example.com"}
//! GET /users/{id}
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{NewUser, Page, User, UsersServiceError};
use crate::inbound::http::envelope::ErrorResponse;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{Validate, Violations, validated};
use crate::inbound::http::{ApiError, ApiResult};

/// Body for `POST /users`.
///
/// Only `name` is persisted; `email` is validated and then discarded.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct CreateUserRequest {
    /// Display name.
    #[schema(example = "John Doe")]
    pub name: Option<String>,
    /// Contact address.
    #[schema(example = "john@example.com")]
    pub email: Option<String>,
}

impl Validate for CreateUserRequest {
    type Output = NewUser;

    fn validate(self) -> Result<NewUser, Vec<String>> {
        let mut violations = Violations::new();
        let name = violations.non_empty("name", self.name);
        violations.email("email", self.email);
        violations.finish(NewUser::new(name))
    }
}

/// Query string for `GET /users`.
///
/// Values arrive as raw text so malformed numbers surface as validation
/// violations rather than extractor errors.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct GetUsersQuery {
    /// 1-based page number, defaults to 1.
    #[param(value_type = Option<u32>, minimum = 1, example = 1)]
    pub page: Option<String>,
    /// Page size, defaults to 10.
    #[param(value_type = Option<u32>, minimum = 1, example = 10)]
    pub limit: Option<String>,
}

impl Validate for GetUsersQuery {
    type Output = Page;

    fn validate(self) -> Result<Page, Vec<String>> {
        let mut violations = Violations::new();
        let number = violations.positive_integer("page", self.page.as_deref(), Page::DEFAULT_NUMBER);
        let limit = violations.positive_integer("limit", self.limit.as_deref(), Page::DEFAULT_LIMIT);
        let page = Page::new(number, limit).unwrap_or_default();
        violations.finish(page)
    }
}

/// User as returned by every users endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    /// Stable identifier.
    #[schema(example = "2b20a608-1df5-46aa-b79a-41eeb2c3a5e7")]
    pub id: String,
    /// Display name, if one was recorded.
    #[schema(example = "John Doe")]
    pub name: Option<String>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id().to_owned(),
            name: user.name().map(str::to_owned),
        }
    }
}

fn map_users_error(error: UsersServiceError) -> ApiError {
    ApiError::unexpected(error)
}

/// Endpoint-specific remap for `GET /users/{id}`: a missing user becomes a 404
/// carrying the domain payload, anything else stays unexpected.
pub fn map_lookup_error(error: UsersServiceError) -> ApiError {
    match error {
        UsersServiceError::NotFound(missing) => ApiError::not_found(missing.error_payload()),
        other => ApiError::unexpected(other),
    }
}

/// List users a page at a time, oldest first.
#[utoipa::path(
    get,
    path = "/users",
    params(GetUsersQuery),
    responses(
        (status = 200, description = "Users on the requested page", body = [UserResponse]),
        (status = 400, description = "Invalid paging parameters", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tags = ["users"],
    operation_id = "getUsers"
)]
#[get("/users")]
pub async fn get_users(
    state: web::Data<HttpState>,
    query: web::Query<GetUsersQuery>,
) -> ApiResult<web::Json<Vec<UserResponse>>> {
    let page = validated(query.into_inner())?;
    let users = state.users.get_users(page).await.map_err(map_users_error)?;
    Ok(web::Json(users.into_iter().map(UserResponse::from).collect()))
}

/// Create a user from a name and email.
#[utoipa::path(
    post,
    path = "/users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<CreateUserRequest>,
) -> ApiResult<HttpResponse> {
    let user = validated(payload.into_inner())?;
    let created = state.users.create_user(user).await.map_err(map_users_error)?;
    Ok(HttpResponse::Created().json(UserResponse::from(created)))
}

/// Fetch one user by identifier.
#[utoipa::path(
    get,
    path = "/users/{id}",
    params(("id" = String, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 404, description = "No user with that id", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tags = ["users"],
    operation_id = "getUserById"
)]
#[get("/users/{id}")]
pub async fn get_user_by_id(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<UserResponse>> {
    let id = path.into_inner();
    let user = state
        .users
        .get_user_by_id(&id)
        .await
        .map_err(map_lookup_error)?;
    Ok(web::Json(UserResponse::from(user)))
}

#[cfg(test)]
#[path = "users_tests.rs"]
mod tests;
