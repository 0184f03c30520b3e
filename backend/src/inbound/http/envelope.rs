//! Uniform error envelope written for every failed request.
//!
//! [`ErrorResponse::translate`] is a pure function of the failure, the request
//! path and the current instant. Disclosure of the diagnostic `error` block is
//! a separate step so the full envelope can always be logged.

use actix_web::http::StatusCode;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use super::error::ApiError;

/// Client message used for every unexpected failure.
pub const INTERNAL_MESSAGE: &str = "Something went wrong in the server";
/// Code used for every unexpected failure.
pub const INTERNAL_CODE: &str = "INTERNAL_SERVER_ERROR";
/// Client message used for validation failures.
pub const VALIDATION_MESSAGE: &str = "Input validation failed";
/// Code used for validation failures.
pub const VALIDATION_CODE: &str = "VALIDATION_ERROR";
/// Module attributed to validation failures.
pub const VALIDATION_MODULE: &str = "ValidationPipe";
/// Code used when a transport error carries no domain code.
pub const UNKNOWN_CODE: &str = "UNKNOWN_ERROR";
/// Module used when no component can be attributed.
pub const UNKNOWN_MODULE: &str = "Unknown";

/// How much of the envelope reaches the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disclosure {
    /// Diagnostic block included (development).
    Full,
    /// Diagnostic block removed (production).
    Redacted,
}

/// Body returned for every failed request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// HTTP status, repeated in the body.
    #[schema(example = 404)]
    pub status_code: u16,
    /// Client-facing summary.
    #[schema(example = "User with id 999 not found")]
    pub message: String,
    /// Where and when the failure happened.
    pub context: ErrorContext,
    /// Diagnostics, omitted in production.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorDetail>,
}

/// Request context echoed in the envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorContext {
    /// ISO-8601 UTC instant with millisecond precision.
    #[schema(example = "2025-11-04T07:09:52.809Z")]
    pub timestamp: String,
    /// Request path, including any query string.
    #[schema(example = "/users/999")]
    pub path: String,
}

/// Diagnostic block of the envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    /// Stable machine-readable code.
    #[schema(example = "USER_NOT_FOUND")]
    pub code: String,
    /// Component that raised the failure.
    #[schema(example = "UserService")]
    pub module: String,
    /// Structured extra data; serialized as `null` when absent.
    #[serde(default)]
    pub details: Option<Value>,
    /// Diagnostic trace of the underlying failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace: Option<String>,
}

struct Classified {
    status: StatusCode,
    message: String,
    code: String,
    module: String,
    details: Option<Value>,
}

impl Classified {
    fn internal() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: INTERNAL_MESSAGE.to_owned(),
            code: INTERNAL_CODE.to_owned(),
            module: UNKNOWN_MODULE.to_owned(),
            details: None,
        }
    }

    fn unattributed(status: StatusCode, message: &str) -> Self {
        Self {
            status,
            message: message.to_owned(),
            code: UNKNOWN_CODE.to_owned(),
            module: UNKNOWN_MODULE.to_owned(),
            details: None,
        }
    }
}

fn non_empty_or(value: &str, fallback: &str) -> String {
    if value.trim().is_empty() {
        fallback.to_owned()
    } else {
        value.to_owned()
    }
}

fn classify(failure: &ApiError) -> Classified {
    match failure {
        ApiError::Validation(violations) if !violations.is_empty() => Classified {
            status: StatusCode::BAD_REQUEST,
            message: VALIDATION_MESSAGE.to_owned(),
            code: VALIDATION_CODE.to_owned(),
            module: VALIDATION_MODULE.to_owned(),
            details: Some(Value::from(violations.clone())),
        },
        // An empty violation list is not a validation failure.
        ApiError::Validation(_) => Classified::unattributed(StatusCode::BAD_REQUEST, "Bad Request"),
        ApiError::Status {
            status,
            message,
            payload: Some(payload),
            ..
        } => Classified {
            status: *status,
            message: message.clone(),
            code: non_empty_or(&payload.code, UNKNOWN_CODE),
            module: non_empty_or(&payload.module, UNKNOWN_MODULE),
            details: payload.details.clone(),
        },
        ApiError::Status {
            status,
            message,
            payload: None,
            ..
        } => Classified::unattributed(*status, message),
        ApiError::Unexpected(_) => Classified::internal(),
    }
}

/// Render an instant the way the envelope expects, e.g. `2025-11-04T07:09:52.809Z`.
pub fn format_timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Millis, true)
}

impl ErrorResponse {
    /// Build the full envelope, diagnostics included, for `failure`.
    pub fn translate(failure: &ApiError, path: &str, now: DateTime<Utc>) -> Self {
        let classified = classify(failure);
        Self {
            status_code: classified.status.as_u16(),
            message: classified.message,
            context: ErrorContext {
                timestamp: format_timestamp(now),
                path: path.to_owned(),
            },
            error: Some(ErrorDetail {
                code: classified.code,
                module: classified.module,
                details: classified.details,
                trace: Some(failure.trace()),
            }),
        }
    }

    /// Generic 500 envelope, used when nothing better can be produced.
    pub fn internal(path: &str, now: DateTime<Utc>) -> Self {
        let classified = Classified::internal();
        Self {
            status_code: classified.status.as_u16(),
            message: classified.message,
            context: ErrorContext {
                timestamp: format_timestamp(now),
                path: path.to_owned(),
            },
            error: None,
        }
    }

    /// Apply the disclosure policy before the envelope leaves the process.
    #[must_use]
    pub fn disclose(mut self, disclosure: Disclosure) -> Self {
        if disclosure == Disclosure::Redacted {
            self.error = None;
        }
        self
    }

    /// Status carried by the envelope.
    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

#[cfg(test)]
#[path = "envelope_tests.rs"]
mod tests;
