//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed user store using Diesel
//! - **token**: HS256 access tokens via `jwt-compact`
//!
//! Adapters only translate between domain types and infrastructure
//! representations.

pub mod persistence;
pub mod token;
