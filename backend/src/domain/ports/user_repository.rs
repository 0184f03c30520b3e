//! Port abstraction for the user record store and its errors.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::{DEVELOPMENT_USER_ID, NewUser, User, UserOrder};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
    }
}

/// Key-based record store for users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch a window of users in the requested order.
    async fn find_many(
        &self,
        skip: u64,
        take: u64,
        order: UserOrder,
    ) -> Result<Vec<User>, UserPersistenceError>;

    /// Fetch a user by key.
    async fn find_unique(&self, id: &str) -> Result<Option<User>, UserPersistenceError>;

    /// Insert a new user and return the stored record.
    async fn create(&self, user: &NewUser) -> Result<User, UserPersistenceError>;
}

/// In-memory repository used when no database is configured.
#[derive(Debug, Default)]
pub struct FixtureUserRepository {
    users: Mutex<Vec<User>>,
}

impl FixtureUserRepository {
    /// Repository pre-populated with the given users.
    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        Self {
            users: Mutex::new(users.into_iter().collect()),
        }
    }

    /// Repository holding only the development login user.
    pub fn seeded() -> Self {
        let now = Utc::now();
        Self::with_users([User::new(
            DEVELOPMENT_USER_ID,
            Some("Development User".to_owned()),
            now,
            now,
        )])
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Vec<User>>, UserPersistenceError> {
        self.users
            .lock()
            .map_err(|_| UserPersistenceError::connection("fixture store lock poisoned"))
    }
}

#[async_trait]
impl UserRepository for FixtureUserRepository {
    async fn find_many(
        &self,
        skip: u64,
        take: u64,
        order: UserOrder,
    ) -> Result<Vec<User>, UserPersistenceError> {
        let UserOrder::CreatedAtAsc = order;
        let mut users = self.lock()?.clone();
        users.sort_by(|a, b| {
            a.created_at()
                .cmp(&b.created_at())
                .then_with(|| a.id().cmp(b.id()))
        });
        let skip = usize::try_from(skip).unwrap_or(usize::MAX);
        let take = usize::try_from(take).unwrap_or(usize::MAX);
        Ok(users.into_iter().skip(skip).take(take).collect())
    }

    async fn find_unique(&self, id: &str) -> Result<Option<User>, UserPersistenceError> {
        Ok(self.lock()?.iter().find(|user| user.id() == id).cloned())
    }

    async fn create(&self, user: &NewUser) -> Result<User, UserPersistenceError> {
        let now = Utc::now();
        let created = User::new(
            Uuid::new_v4().to_string(),
            Some(user.name().to_owned()),
            now,
            now,
        );
        self.lock()?.push(created.clone());
        Ok(created)
    }
}
