//! Server construction and middleware wiring.

mod settings;

pub use settings::{AppSettings, Environment, SettingsError};

use std::sync::Arc;

use actix_web::body::{BoxBody, EitherBody};
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, HttpRequest, HttpResponse, HttpServer, web};
use color_eyre::eyre::{Result, WrapErr};
use tracing::{info, warn};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::doc::ApiDoc;
use crate::domain::ports::{FixtureUserRepository, UserRepository};
use crate::domain::{AuthService, UsersService};
use crate::inbound::http::auth::wechat_login;
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users::{create_user, get_user_by_id, get_users};
use crate::inbound::http::{ApiError, ApiResult};
use crate::middleware::ErrorTranslator;
use crate::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};
use crate::outbound::token::JwtTokenIssuer;

/// Fallback for requests no route matched.
async fn route_not_found(request: HttpRequest) -> ApiResult<HttpResponse> {
    Err(ApiError::with_status(
        StatusCode::NOT_FOUND,
        format!("Cannot {} {}", request.method(), request.path()),
    ))
}

/// Assemble the application: routes, error translation and, outside
/// production, Swagger UI at `/api` with the document at `/api-json`.
pub fn build_app(
    http_state: web::Data<HttpState>,
    health_state: web::Data<HealthState>,
    environment: Environment,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<EitherBody<BoxBody>>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(http_state)
        .app_data(health_state)
        .wrap(ErrorTranslator::new(environment.into()))
        .service(get_users)
        .service(create_user)
        .service(get_user_by_id)
        .service(wechat_login)
        .service(ready)
        .service(live)
        .default_service(web::to(route_not_found));

    if environment.is_production() {
        app
    } else {
        app.service(SwaggerUi::new("/api/{_:.*}").url("/api-json", ApiDoc::openapi()))
    }
}

async fn user_repository(settings: &AppSettings) -> Result<Arc<dyn UserRepository>> {
    match settings.database_url.as_deref() {
        Some(url) => {
            let pool = DbPool::new(PoolConfig::new(url))
                .await
                .wrap_err("failed to create database pool")?;
            Ok(Arc::new(DieselUserRepository::new(pool)))
        }
        None => {
            warn!("PFJ_DATABASE_URL not set; serving users from an in-memory store");
            Ok(Arc::new(FixtureUserRepository::seeded()))
        }
    }
}

/// Start the HTTP server and run until shutdown.
///
/// # Errors
/// Fails when configuration is invalid, the pool cannot be built or the
/// socket cannot be bound.
pub async fn run(settings: AppSettings) -> Result<()> {
    let environment = settings.environment();
    let secret = settings.jwt_secret()?;

    let users = Arc::new(UsersService::new(user_repository(&settings).await?));
    let tokens = Arc::new(JwtTokenIssuer::new(secret));
    let auth = Arc::new(AuthService::new(users.clone(), tokens));
    let http_state = web::Data::new(HttpState::new(users, auth));
    let health_state = web::Data::new(HealthState::new());

    let server_health_state = health_state.clone();
    let (host, port) = settings.bind_addr();
    let server = HttpServer::new(move || {
        build_app(http_state.clone(), server_health_state.clone(), environment)
    })
    .bind((host.as_str(), port))
    .wrap_err_with(|| format!("failed to bind {host}:{port}"))?
    .run();

    health_state.mark_ready();
    info!(%host, port, ?environment, "server listening");
    server.await.wrap_err("server terminated unexpectedly")
}
