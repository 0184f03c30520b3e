//! Middleware translating every failure into the uniform error envelope.
//!
//! Handler errors, extractor rejections, unmatched routes and panics all pass
//! through [`ErrorTranslator`]. Each failure is logged exactly once with the
//! full envelope, then the disclosure policy decides what the client sees.
//! Successful responses are forwarded untouched.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::task::{Context, Poll};

use actix_web::body::{EitherBody, MessageBody};
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::error::InternalError;
use actix_web::http::{Method, Uri, header::ContentType};
use actix_web::{Error, HttpResponse};
use futures_util::FutureExt;
use futures_util::future::{LocalBoxFuture, Ready, ready};
use mockable::{Clock, DefaultClock};
use tracing::error;

use crate::inbound::http::ApiError;
use crate::inbound::http::envelope::{Disclosure, ErrorResponse};

/// Error translation middleware.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use pfj_backend::inbound::http::envelope::Disclosure;
/// use pfj_backend::middleware::ErrorTranslator;
///
/// let _app = App::new().wrap(ErrorTranslator::new(Disclosure::Redacted));
/// ```
#[derive(Clone)]
pub struct ErrorTranslator {
    disclosure: Disclosure,
    clock: Arc<dyn Clock>,
}

impl ErrorTranslator {
    /// Translator stamping envelopes with the system clock.
    pub fn new(disclosure: Disclosure) -> Self {
        Self {
            disclosure,
            clock: Arc::new(DefaultClock),
        }
    }

    /// Replace the clock used for envelope timestamps.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    fn respond(&self, method: &Method, path: &str, failure: &ApiError) -> HttpResponse {
        let now = self.clock.utc();
        let envelope = ErrorResponse::translate(failure, path, now);
        log_failure(method, &envelope);

        let client = envelope.disclose(self.disclosure);
        match serde_json::to_vec(&client) {
            Ok(body) => HttpResponse::build(client.status())
                .content_type(ContentType::json())
                .body(body),
            Err(err) => {
                error!(error = %err, path = %path, "failed to serialise error envelope");
                let fallback = ErrorResponse::internal(path, now);
                let body = serde_json::to_vec(&fallback).unwrap_or_else(|_| {
                    br#"{"statusCode":500,"message":"Something went wrong in the server"}"#.to_vec()
                });
                HttpResponse::InternalServerError()
                    .content_type(ContentType::json())
                    .body(body)
            }
        }
    }

    fn respond_to_actix(&self, method: &Method, path: &str, error: &Error) -> HttpResponse {
        error.as_error::<ApiError>().map_or_else(
            || self.respond(method, path, &ApiError::from_actix(error)),
            |failure| self.respond(method, path, failure),
        )
    }
}

fn request_path(uri: &Uri) -> String {
    uri.path_and_query().map_or_else(
        || uri.path().to_owned(),
        |path_and_query| path_and_query.as_str().to_owned(),
    )
}

fn log_failure(method: &Method, envelope: &ErrorResponse) {
    let rendered = serde_json::to_string(envelope)
        .unwrap_or_else(|err| format!("<unserialisable envelope: {err}>"));
    let (code, module, trace) = envelope.error.as_ref().map_or(("", "", ""), |detail| {
        (
            detail.code.as_str(),
            detail.module.as_str(),
            detail.trace.as_deref().unwrap_or_default(),
        )
    });
    error!(
        status_code = envelope.status_code,
        method = %method,
        path = %envelope.context.path,
        code,
        module,
        trace,
        envelope = %rendered,
        "{}",
        envelope.message
    );
}

impl<S, B> Transform<S, ServiceRequest> for ErrorTranslator
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = ErrorTranslatorMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(ErrorTranslatorMiddleware {
            service,
            translator: self.clone(),
        }))
    }
}

/// Service wrapper produced by [`ErrorTranslator`].
pub struct ErrorTranslatorMiddleware<S> {
    service: S,
    translator: ErrorTranslator,
}

impl<S, B> Service<ServiceRequest> for ErrorTranslatorMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        // Routing needs sole ownership of the request, so only copies of the
        // method and path are held across the inner call.
        let method = req.method().clone();
        let path = request_path(req.uri());
        let translator = self.translator.clone();
        let fut = self.service.call(req);
        Box::pin(async move {
            match AssertUnwindSafe(fut).catch_unwind().await {
                Ok(Ok(res)) => {
                    let Some(error) = res.response().error() else {
                        return Ok(res.map_into_left_body());
                    };
                    let response = translator.respond_to_actix(&method, &path, error);
                    Ok(res.into_response(response).map_into_right_body())
                }
                Ok(Err(error)) => {
                    let response = translator.respond_to_actix(&method, &path, &error);
                    Err(InternalError::from_response(error, response).into())
                }
                Err(panic) => {
                    let failure = ApiError::from_panic(panic.as_ref());
                    let response = translator.respond(&method, &path, &failure);
                    Err(InternalError::from_response(failure, response).into())
                }
            }
        })
    }
}

#[cfg(test)]
#[path = "error_translator_tests.rs"]
mod tests;
