//! Port for issuing access tokens after a successful login.

use serde::{Deserialize, Serialize};

use super::define_port_error;

define_port_error! {
    /// Failures raised while signing a token.
    pub enum TokenIssueError {
        /// The signer rejected the claims or key.
        Signing { message: String } => "failed to issue access token: {message}",
    }
}

/// Claims embedded in an access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Authenticated user key.
    pub id: String,
    /// Display name at the time of login.
    pub name: Option<String>,
}

/// Signs access tokens for authenticated users.
#[cfg_attr(test, mockall::automock)]
pub trait TokenIssuer: Send + Sync {
    /// Produce a signed, serialised token for the claims.
    fn issue(&self, claims: &AccessClaims) -> Result<String, TokenIssueError>;
}
