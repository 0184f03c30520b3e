//! Login handler.
//!
//! ```text
//! POST /auth/wechat-login {"code":"081xYz"}
//! ```

use actix_web::{post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::inbound::http::envelope::ErrorResponse;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{Validate, Violations, validated};
use crate::inbound::http::{ApiError, ApiResult};

/// Body for `POST /auth/wechat-login`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct LoginRequest {
    /// One-time code issued by the WeChat client.
    #[schema(example = "081xYz0w3Kx8Gz2q1b0w3Kx8Gz2q1b0w")]
    pub code: Option<String>,
}

impl Validate for LoginRequest {
    type Output = String;

    fn validate(self) -> Result<String, Vec<String>> {
        let mut violations = Violations::new();
        let code = violations.non_empty("code", self.code);
        violations.finish(code)
    }
}

/// Signed access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    /// HS256 token carrying the user's id and name.
    pub token: String,
}

/// Exchange a WeChat login code for an access token.
///
/// Every failure, including a missing development user, surfaces as 500:
/// this endpoint does not remap domain errors.
#[utoipa::path(
    post,
    path = "/auth/wechat-login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token issued", body = LoginResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tags = ["auth"],
    operation_id = "wechatLogin",
    security([])
)]
#[post("/auth/wechat-login")]
pub async fn wechat_login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<LoginResponse>> {
    let code = validated(payload.into_inner())?;
    let token = state
        .auth
        .wechat_login(&code)
        .await
        .map_err(ApiError::unexpected)?;
    Ok(web::Json(LoginResponse { token }))
}

#[cfg(test)]
mod tests {
    //! Handler-level coverage for the stub login.
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use rstest::rstest;
    use serde_json::{Value, json};

    use super::*;
    use crate::domain::DEVELOPMENT_USER_ID;
    use crate::domain::ports::{FixtureUserRepository, MockTokenIssuer, TokenIssueError};
    use crate::inbound::http::envelope::Disclosure;
    use crate::inbound::http::test_utils::{EchoTokenIssuer, sample_users, state_with};
    use crate::middleware::ErrorTranslator;

    async fn login(state: HttpState, body: Value) -> (StatusCode, Value) {
        let app = actix_test::init_service(
            App::new()
                .wrap(ErrorTranslator::new(Disclosure::Full))
                .app_data(web::Data::new(state))
                .service(wechat_login),
        )
        .await;
        let request = actix_test::TestRequest::post()
            .uri("/auth/wechat-login")
            .set_json(body)
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        let status = response.status();
        let body: Value = actix_test::read_body_json(response).await;
        (status, body)
    }

    fn repository(ids: &[&str]) -> Arc<FixtureUserRepository> {
        Arc::new(FixtureUserRepository::with_users(sample_users(ids)))
    }

    #[actix_web::test]
    async fn issues_token_for_development_user() {
        let state = state_with(repository(&[DEVELOPMENT_USER_ID]), Arc::new(EchoTokenIssuer));

        let (status, body) = login(state, json!({"code": "abc"})).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"token": format!("token-for-{DEVELOPMENT_USER_ID}")}));
    }

    #[rstest]
    #[case(json!({}))]
    #[case(json!({"code": ""}))]
    #[actix_web::test]
    async fn rejects_missing_code(#[case] body: Value) {
        let state = state_with(repository(&[DEVELOPMENT_USER_ID]), Arc::new(EchoTokenIssuer));

        let (status, envelope) = login(state, body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(envelope["error"]["details"], json!(["code must not be empty"]));
    }

    #[actix_web::test]
    async fn missing_development_user_is_not_remapped() {
        let state = state_with(repository(&[]), Arc::new(EchoTokenIssuer));

        let (status, body) = login(state, json!({"code": "abc"})).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "Something went wrong in the server");
        assert_eq!(body["error"]["code"], "INTERNAL_SERVER_ERROR");
    }

    #[actix_web::test]
    async fn signing_failure_is_internal() {
        let mut tokens = MockTokenIssuer::new();
        tokens
            .expect_issue()
            .return_once(|_| Err(TokenIssueError::signing("bad key")));
        let state = state_with(repository(&[DEVELOPMENT_USER_ID]), Arc::new(tokens));

        let (status, _) = login(state, json!({"code": "abc"})).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
