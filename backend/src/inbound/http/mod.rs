//! HTTP inbound adapter exposing REST endpoints.
//!
//! Handlers validate input, call domain services and apply their own remap
//! policy. Rendering failures is left to
//! [`ErrorTranslator`](crate::middleware::ErrorTranslator).

pub mod auth;
pub mod envelope;
pub mod error;
pub mod health;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

pub use error::{ApiError, ApiResult};
