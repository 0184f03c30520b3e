//! User service: paging, lookup and creation on top of the record store.

use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{NewUser, Page, User, UserNotFoundError, UserOrder};

/// Failures raised by [`UsersService`].
///
/// `NotFound` is the only domain error; callers that know what a missing
/// user means remap it, everything else is unexpected.
#[derive(Debug, Error)]
pub enum UsersServiceError {
    /// No user exists for the requested key.
    #[error(transparent)]
    NotFound(#[from] UserNotFoundError),
    /// The record store failed.
    #[error(transparent)]
    Persistence(#[from] UserPersistenceError),
}

/// Service layer for user records.
#[derive(Clone)]
pub struct UsersService {
    repository: Arc<dyn UserRepository>,
}

impl UsersService {
    /// Create a service backed by the given record store.
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    /// List users oldest first, one page at a time.
    pub async fn get_users(&self, page: Page) -> Result<Vec<User>, UsersServiceError> {
        debug!(page = page.number(), limit = page.limit(), "listing users");
        Ok(self
            .repository
            .find_many(page.skip(), page.take(), UserOrder::CreatedAtAsc)
            .await?)
    }

    /// Fetch a single user.
    ///
    /// # Errors
    /// Returns [`UsersServiceError::NotFound`] when the key is unknown.
    pub async fn get_user_by_id(&self, id: &str) -> Result<User, UsersServiceError> {
        self.repository
            .find_unique(id)
            .await?
            .ok_or_else(|| UserNotFoundError::new(id).into())
    }

    /// Store a new user.
    pub async fn create_user(&self, user: NewUser) -> Result<User, UsersServiceError> {
        let created = self.repository.create(&user).await?;
        debug!(user_id = created.id(), "user created");
        Ok(created)
    }
}

#[cfg(test)]
#[path = "users_service_tests.rs"]
mod tests;
