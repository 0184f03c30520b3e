//! Service-layer error taxonomy.
//!
//! Domain services raise [`ServiceError`] values to report business-rule
//! failures. Every error names the module that owns it and a stable code, so
//! inbound adapters can remap it to a transport status and log consumers can
//! attribute it. Concrete failure kinds are declared with
//! [`define_service_error!`](crate::define_service_error), each pinned to one
//! `(module, code, message template)` triple.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use utoipa::ToSchema;

/// Validation failures raised when constructing a [`ServiceError`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceErrorValidationError {
    /// The owning module name was blank.
    #[error("error module must not be empty")]
    EmptyModule,
    /// The machine-readable code was blank.
    #[error("error code must not be empty")]
    EmptyCode,
    /// The human-readable message was blank.
    #[error("error message must not be empty")]
    EmptyMessage,
}

/// Business-rule failure raised by a domain service.
///
/// ## Invariants
/// - `module`, `code` and `message` are non-empty once trimmed.
/// - Fields are fixed at construction; the value is immutable afterwards
///   apart from builder-style [`ServiceError::with_details`].
///
/// # Examples
/// ```
/// use pfj_backend::domain::ServiceError;
///
/// let err = ServiceError::new("UserService", "USER_NOT_FOUND", "User with id 7 not found");
/// assert_eq!(err.code(), "USER_NOT_FOUND");
/// assert_eq!(err.error_payload().module, "UserService");
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct ServiceError {
    module: String,
    code: String,
    message: String,
    details: Option<Value>,
}

impl ServiceError {
    /// Create a new error, panicking if validation fails.
    ///
    /// Intended for compile-time constants such as those emitted by
    /// [`define_service_error!`](crate::define_service_error).
    ///
    /// # Panics
    /// Panics when any of the three fields is blank.
    pub fn new(
        module: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        match Self::try_new(module, code, message) {
            Ok(value) => value,
            Err(err) => panic!("service errors must satisfy validation: {err}"),
        }
    }

    /// Fallible constructor that validates every field.
    pub fn try_new(
        module: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Result<Self, ServiceErrorValidationError> {
        let module = module.into();
        let code = code.into();
        let message = message.into();
        if module.trim().is_empty() {
            return Err(ServiceErrorValidationError::EmptyModule);
        }
        if code.trim().is_empty() {
            return Err(ServiceErrorValidationError::EmptyCode);
        }
        if message.trim().is_empty() {
            return Err(ServiceErrorValidationError::EmptyMessage);
        }
        Ok(Self {
            module,
            code,
            message,
            details: None,
        })
    }

    /// Attach structured context, such as the failing identifier.
    #[must_use]
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Owning subsystem name.
    pub fn module(&self) -> &str {
        self.module.as_str()
    }

    /// Stable machine-readable identifier.
    pub fn code(&self) -> &str {
        self.code.as_str()
    }

    /// Human-readable description.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Additional structured context, if any.
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Project the error into its transport-neutral payload.
    ///
    /// Pure: repeated calls return equal values.
    pub fn error_payload(&self) -> ErrorPayload {
        ErrorPayload {
            module: self.module.clone(),
            code: self.code.clone(),
            message: self.message.clone(),
            details: self.details.clone(),
        }
    }
}

/// Four-field projection of a [`ServiceError`].
///
/// Carried by transport failures that remap a domain error, and attached to
/// log records. `details` is omitted from JSON when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorPayload {
    /// Owning subsystem name.
    #[schema(example = "UserService")]
    pub module: String,
    /// Stable machine-readable identifier.
    #[schema(example = "USER_NOT_FOUND")]
    pub code: String,
    /// Human-readable description.
    #[schema(example = "User with id 999 not found")]
    pub message: String,
    /// Additional structured context.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

#[cfg(test)]
#[path = "service_error_tests.rs"]
mod tests;
