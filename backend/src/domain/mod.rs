//! Domain types, errors, ports and services.
//!
//! Purpose: keep business rules free of transport and storage concerns.
//! Services report expected failures as [`ServiceError`] subtypes; inbound
//! adapters decide how those surface to clients.
//!
//! Public surface:
//! - ServiceError / ErrorPayload: root domain error and its projection.
//! - UserNotFoundError: the `UserService`/`USER_NOT_FOUND` subtype.
//! - UsersService, AuthService: service-layer use-cases.

pub mod auth;
mod macros;
pub mod ports;
pub mod service_error;
pub mod user;
pub mod users_service;

pub use self::auth::{AuthError, AuthService, DEVELOPMENT_USER_ID};
pub use self::service_error::{ErrorPayload, ServiceError, ServiceErrorValidationError};
pub use self::user::{NewUser, Page, User, UserNotFoundError, UserOrder};
pub use self::users_service::{UsersService, UsersServiceError};
