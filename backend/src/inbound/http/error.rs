//! Transport-level failures raised by HTTP handlers.
//!
//! Handlers return [`ApiError`] and never build error bodies themselves: the
//! [`ErrorTranslator`](crate::middleware::ErrorTranslator) middleware owns the
//! wire format because only it sees the request path.

use std::any::Any;
use std::backtrace::{Backtrace, BacktraceStatus};
use std::fmt;

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use color_eyre::eyre::{Report, eyre};

use crate::domain::ErrorPayload;

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// Failure raised while handling a request.
///
/// The three variants mirror the translator's classification: input
/// validation, deliberate transport errors and everything else.
#[derive(Debug)]
pub enum ApiError {
    /// Request input broke one or more field constraints, in declaration order.
    Validation(Vec<String>),
    /// Deliberate failure carrying an explicit HTTP status.
    Status {
        /// Status written to the response.
        status: StatusCode,
        /// Client-facing summary.
        message: String,
        /// Remapped domain error, when the failure originated from one.
        payload: Option<ErrorPayload>,
        /// Where the failure was raised.
        backtrace: Backtrace,
    },
    /// Anything the handler did not anticipate.
    Unexpected(Report),
}

impl ApiError {
    /// Validation failure from an ordered list of violations.
    pub fn validation(violations: Vec<String>) -> Self {
        Self::Validation(violations)
    }

    /// Deliberate failure with a status and summary but no domain payload.
    pub fn with_status(status: StatusCode, message: impl Into<String>) -> Self {
        Self::Status {
            status,
            message: message.into(),
            payload: None,
            backtrace: Backtrace::capture(),
        }
    }

    /// 400 failure without a domain payload.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::with_status(StatusCode::BAD_REQUEST, message)
    }

    /// 404 failure remapped from a domain error.
    ///
    /// # Examples
    /// ```
    /// use actix_web::http::StatusCode;
    /// use pfj_backend::domain::UserNotFoundError;
    /// use pfj_backend::inbound::http::ApiError;
    ///
    /// let err = ApiError::not_found(UserNotFoundError::new("999").error_payload());
    /// assert_eq!(err.status(), StatusCode::NOT_FOUND);
    /// assert_eq!(err.to_string(), "User with id 999 not found");
    /// ```
    pub fn not_found(payload: ErrorPayload) -> Self {
        Self::Status {
            status: StatusCode::NOT_FOUND,
            message: payload.message.clone(),
            payload: Some(payload),
            backtrace: Backtrace::capture(),
        }
    }

    /// Wrap a failure the handler does not know how to map.
    pub fn unexpected(error: impl Into<Report>) -> Self {
        Self::Unexpected(error.into())
    }

    /// Classify an error produced by actix itself, such as an extractor
    /// rejection. Server-side statuses count as unexpected.
    pub fn from_actix(error: &actix_web::Error) -> Self {
        let status = error.as_response_error().status_code();
        if status.is_server_error() {
            Self::Unexpected(eyre!("{error}"))
        } else {
            Self::with_status(status, error.to_string())
        }
    }

    /// Describe a panic caught while a handler was running.
    pub fn from_panic(panic: &(dyn Any + Send)) -> Self {
        let message = panic
            .downcast_ref::<&str>()
            .map(|text| (*text).to_owned())
            .or_else(|| panic.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "non-string panic payload".to_owned());
        Self::Unexpected(eyre!("handler panicked: {message}"))
    }

    /// HTTP status this failure maps to.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Status { status, .. } => *status,
            Self::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Diagnostic text recorded alongside the envelope. Never empty.
    pub fn trace(&self) -> String {
        match self {
            Self::Validation(violations) => {
                format!("ValidationError: {}", violations.join("; "))
            }
            Self::Status {
                status,
                message,
                backtrace,
                ..
            } => {
                if backtrace.status() == BacktraceStatus::Captured {
                    format!("HttpError {status}: {message}\n{backtrace}")
                } else {
                    format!("HttpError {status}: {message}")
                }
            }
            // Plain cause chain; the installed eyre handler would add colour codes.
            Self::Unexpected(report) => report
                .chain()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("\nCaused by: "),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation(violations) => {
                write!(f, "input validation failed: {}", violations.join("; "))
            }
            Self::Status { message, .. } => f.write_str(message),
            Self::Unexpected(report) => write!(f, "{report}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<Report> for ApiError {
    fn from(report: Report) -> Self {
        Self::Unexpected(report)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        // Body intentionally empty: ErrorTranslator replaces it with the envelope.
        HttpResponse::new(self.status_code())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for transport failures.
    use super::*;
    use crate::domain::{ServiceError, UserNotFoundError};
    use rstest::rstest;

    #[rstest]
    #[case(ApiError::validation(vec!["name must not be empty".to_owned()]), StatusCode::BAD_REQUEST)]
    #[case(ApiError::bad_request("nope"), StatusCode::BAD_REQUEST)]
    #[case(ApiError::not_found(UserNotFoundError::new("1").error_payload()), StatusCode::NOT_FOUND)]
    #[case(ApiError::with_status(StatusCode::CONFLICT, "taken"), StatusCode::CONFLICT)]
    #[case(ApiError::unexpected(eyre!("Database down")), StatusCode::INTERNAL_SERVER_ERROR)]
    fn status_follows_variant(#[case] error: ApiError, #[case] expected: StatusCode) {
        assert_eq!(error.status(), expected);
        assert_eq!(ResponseError::status_code(&error), expected);
    }

    #[rstest]
    fn not_found_keeps_domain_payload() {
        let payload = ServiceError::new("UserService", "USER_NOT_FOUND", "User with id 9 not found")
            .error_payload();
        let error = ApiError::not_found(payload.clone());

        match error {
            ApiError::Status {
                message,
                payload: Some(carried),
                ..
            } => {
                assert_eq!(message, "User with id 9 not found");
                assert_eq!(carried, payload);
            }
            other => panic!("expected status failure, got {other:?}"),
        }
    }

    #[rstest]
    #[case(ApiError::validation(vec!["a".to_owned()]))]
    #[case(ApiError::bad_request("bad"))]
    #[case(ApiError::unexpected(eyre!("Database down")))]
    fn trace_is_never_empty(#[case] error: ApiError) {
        assert!(!error.trace().trim().is_empty());
    }

    #[rstest]
    fn unexpected_trace_includes_the_cause() {
        let error = ApiError::unexpected(eyre!("Database down"));
        assert!(error.trace().contains("Database down"));
    }

    #[rstest]
    fn unexpected_trace_is_plain_text_with_the_cause_chain() {
        let error = ApiError::unexpected(eyre!("Database down").wrap_err("loading users"));
        let trace = error.trace();

        assert_eq!(trace, "loading users\nCaused by: Database down");
        assert!(!trace.contains('\u{1b}'));
    }

    #[rstest]
    fn actix_client_errors_keep_their_status() {
        let error = ApiError::from_actix(&actix_web::error::ErrorForbidden("no entry"));
        assert_eq!(error.status(), StatusCode::FORBIDDEN);
        assert_eq!(error.to_string(), "no entry");
    }

    #[rstest]
    fn actix_server_errors_become_unexpected() {
        let error = ApiError::from_actix(&actix_web::error::ErrorBadGateway("upstream"));
        assert!(matches!(error, ApiError::Unexpected(_)));
    }

    #[rstest]
    #[case(Box::new("static text") as Box<dyn Any + Send>, "static text")]
    #[case(Box::new(String::from("owned text")) as Box<dyn Any + Send>, "owned text")]
    #[case(Box::new(7_u8) as Box<dyn Any + Send>, "non-string panic payload")]
    fn panics_become_unexpected(#[case] panic: Box<dyn Any + Send>, #[case] expected: &str) {
        let error = ApiError::from_panic(panic.as_ref());
        assert!(matches!(error, ApiError::Unexpected(_)));
        assert!(error.to_string().contains(expected));
    }

    #[rstest]
    fn error_response_has_empty_body() {
        let response = ResponseError::error_response(&ApiError::bad_request("bad"));
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
