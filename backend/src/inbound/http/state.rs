//! Shared HTTP adapter state.
//!
//! Handlers receive this through `actix_web::web::Data` and only see domain
//! services, so they stay testable without I/O.

use std::sync::Arc;

use crate::domain::{AuthService, UsersService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// User listing, lookup and creation.
    pub users: Arc<UsersService>,
    /// Stub login flow.
    pub auth: Arc<AuthService>,
}

impl HttpState {
    /// Bundle the services handlers depend on.
    pub fn new(users: Arc<UsersService>, auth: Arc<AuthService>) -> Self {
        Self { users, auth }
    }
}
