//! Backend entry-point: loads settings, installs logging and serves HTTP.

use color_eyre::eyre::{Result, eyre};
use ortho_config::OrthoConfig;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use pfj_backend::server::{self, AppSettings};

#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if let Err(e) = fmt().with_env_filter(filter).json().try_init() {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load_from_iter(std::env::args_os())
        .map_err(|err| eyre!("failed to load configuration: {err}"))?;
    server::run(settings).await
}
