//! Stub WeChat login flow.
//!
//! The login code is not yet verified against WeChat; every valid request
//! resolves to the development user and receives a signed token for it.

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::domain::ports::{AccessClaims, TokenIssueError, TokenIssuer};
use crate::domain::{UsersService, UsersServiceError};

/// User every stub login resolves to.
pub const DEVELOPMENT_USER_ID: &str = "2b20a608-1df5-46aa-b79a-41eeb2c3a5e7";

/// Failures raised by [`AuthService`].
#[derive(Debug, Error)]
pub enum AuthError {
    /// Looking up the user failed, including when it does not exist.
    #[error(transparent)]
    Users(#[from] UsersServiceError),
    /// The token could not be signed.
    #[error(transparent)]
    Token(#[from] TokenIssueError),
}

/// Login use-case.
#[derive(Clone)]
pub struct AuthService {
    users: Arc<UsersService>,
    tokens: Arc<dyn TokenIssuer>,
}

impl AuthService {
    /// Wire the service to user lookups and a token signer.
    pub fn new(users: Arc<UsersService>, tokens: Arc<dyn TokenIssuer>) -> Self {
        Self { users, tokens }
    }

    /// Exchange a WeChat login code for an access token.
    pub async fn wechat_login(&self, code: &str) -> Result<String, AuthError> {
        info!(code, "verifying user with login code");
        info!("check and create user if not exists");

        let user = self.users.get_user_by_id(DEVELOPMENT_USER_ID).await?;
        let claims = AccessClaims {
            id: user.id().to_owned(),
            name: user.name().map(str::to_owned),
        };
        Ok(self.tokens.issue(&claims)?)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for the stub login.
    use super::*;
    use crate::domain::User;
    use crate::domain::ports::{FixtureUserRepository, MockTokenIssuer};
    use chrono::Utc;
    use rstest::rstest;

    fn users_with(users: Vec<User>) -> Arc<UsersService> {
        Arc::new(UsersService::new(Arc::new(
            FixtureUserRepository::with_users(users),
        )))
    }

    #[rstest]
    #[tokio::test]
    async fn wechat_login_signs_claims_for_development_user() {
        let now = Utc::now();
        let users = users_with(vec![User::new(
            DEVELOPMENT_USER_ID,
            Some("Dev".to_owned()),
            now,
            now,
        )]);
        let mut tokens = MockTokenIssuer::new();
        tokens
            .expect_issue()
            .withf(|claims| claims.id == DEVELOPMENT_USER_ID && claims.name.as_deref() == Some("Dev"))
            .times(1)
            .return_once(|_| Ok("signed".to_owned()));

        let service = AuthService::new(users, Arc::new(tokens));
        let token = service.wechat_login("081yFsXh").await.expect("login succeeds");

        assert_eq!(token, "signed");
    }

    #[rstest]
    #[tokio::test]
    async fn wechat_login_propagates_missing_user() {
        let mut tokens = MockTokenIssuer::new();
        tokens.expect_issue().never();

        let service = AuthService::new(users_with(Vec::new()), Arc::new(tokens));
        let err = service
            .wechat_login("code")
            .await
            .expect_err("missing user must fail");

        assert!(matches!(
            err,
            AuthError::Users(UsersServiceError::NotFound(_))
        ));
    }

    #[rstest]
    #[tokio::test]
    async fn wechat_login_propagates_signing_failure() {
        let mut tokens = MockTokenIssuer::new();
        tokens
            .expect_issue()
            .return_once(|_| Err(TokenIssueError::signing("bad key")));

        let service = AuthService::new(
            Arc::new(UsersService::new(Arc::new(FixtureUserRepository::seeded()))),
            Arc::new(tokens),
        );
        let err = service
            .wechat_login("code")
            .await
            .expect_err("signing failure must surface");

        assert!(matches!(err, AuthError::Token(_)));
    }
}
