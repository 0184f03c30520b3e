//! Domain ports defining the edges of the hexagon.
//!
//! Driven adapters (the database, the token signer) implement these traits so
//! services stay free of infrastructure imports. Each port exposes a typed
//! error enum rather than `eyre::Report`.

mod token_issuer;
mod user_repository;

pub(crate) use super::macros::define_port_error;

pub use token_issuer::{AccessClaims, TokenIssueError, TokenIssuer};
#[cfg(test)]
pub use token_issuer::MockTokenIssuer;
pub use user_repository::{FixtureUserRepository, UserPersistenceError, UserRepository};
#[cfg(test)]
pub use user_repository::MockUserRepository;
