//! PostgreSQL persistence adapters using Diesel with `diesel-async` and `bb8`.
//!
//! Row structs and table definitions stay private to this module; only the
//! repository and its pool are exported.
//!
//! ```ignore
//! use pfj_backend::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/users")).await?;
//! let repository = DieselUserRepository::new(pool);
//! ```

mod diesel_user_repository;
mod models;
mod pool;
mod schema;

pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
