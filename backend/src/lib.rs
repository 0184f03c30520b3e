//! User records service with a uniform error envelope.
//!
//! Domain failures are typed [`domain::ServiceError`]s; handlers remap them
//! to [`inbound::http::ApiError`]s, and [`ErrorTranslator`] renders every
//! failure as the same JSON envelope.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::ErrorTranslator;
