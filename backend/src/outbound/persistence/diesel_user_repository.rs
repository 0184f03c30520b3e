//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{NewUser, User, UserOrder};

use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a repository over the given pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            UserPersistenceError::connection(message)
        }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> UserPersistenceError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(%error, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            UserPersistenceError::connection("database connection error")
        }
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            UserPersistenceError::query("user already exists")
        }
        DieselError::NotFound => UserPersistenceError::query("record not found"),
        _ => UserPersistenceError::query("database error"),
    }
}

fn to_sql_bound(value: u64, what: &str) -> Result<i64, UserPersistenceError> {
    i64::try_from(value)
        .map_err(|_| UserPersistenceError::query(format!("{what} {value} is out of range")))
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn find_many(
        &self,
        skip: u64,
        take: u64,
        order: UserOrder,
    ) -> Result<Vec<User>, UserPersistenceError> {
        let offset = to_sql_bound(skip, "offset")?;
        let limit = to_sql_bound(take, "limit")?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let UserOrder::CreatedAtAsc = order;
        let rows: Vec<UserRow> = users::table
            .select(UserRow::as_select())
            .order((users::created_at.asc(), users::id.asc()))
            .offset(offset)
            .limit(limit)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn find_unique(&self, id: &str) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .filter(users::id.eq(id))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(User::from))
    }

    async fn create(&self, user: &NewUser) -> Result<User, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let id = Uuid::new_v4().to_string();
        let row = NewUserRow {
            id: &id,
            name: Some(user.name()),
        };

        let stored: UserRow = diesel::insert_into(users::table)
            .values(&row)
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(stored.into())
    }
}
