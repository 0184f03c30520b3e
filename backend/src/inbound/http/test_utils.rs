//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

use crate::domain::ports::{AccessClaims, TokenIssueError, TokenIssuer, UserRepository};
use crate::domain::{AuthService, User, UsersService};
use crate::inbound::http::state::HttpState;

/// Token signer returning a readable, unsigned token.
pub struct EchoTokenIssuer;

impl TokenIssuer for EchoTokenIssuer {
    fn issue(&self, claims: &AccessClaims) -> Result<String, TokenIssueError> {
        Ok(format!("token-for-{}", claims.id))
    }
}

/// Build handler state over `repository` and `tokens`.
pub fn state_with(
    repository: Arc<dyn UserRepository>,
    tokens: Arc<dyn TokenIssuer>,
) -> HttpState {
    let users = Arc::new(UsersService::new(repository));
    let auth = Arc::new(AuthService::new(users.clone(), tokens));
    HttpState::new(users, auth)
}

/// Users created one second apart so ordering is deterministic.
pub fn sample_users(ids: &[&str]) -> Vec<User> {
    let base: DateTime<Utc> = DateTime::UNIX_EPOCH;
    ids.iter()
        .zip(0_i64..)
        .map(|(id, offset)| {
            let at = base + Duration::seconds(offset);
            User::new(*id, Some(format!("User {id}")), at, at)
        })
        .collect()
}
