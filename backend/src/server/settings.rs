//! Process configuration loaded via OrthoConfig.
//!
//! Values come from `PFJ_*` environment variables, matching CLI flags or a
//! config file. Everything is read once at start-up.

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;
use tracing::warn;
use uuid::Uuid;
use zeroize::Zeroizing;

use crate::inbound::http::envelope::Disclosure;

const DEFAULT_ENVIRONMENT: &str = "development";
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;

/// Deployment environment, deciding how much error detail clients see.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    /// Full diagnostics in error responses and Swagger UI enabled.
    #[default]
    Development,
    /// Diagnostics withheld from clients.
    Production,
}

impl Environment {
    /// Parse the configured name. Only `production` (any case) selects
    /// [`Environment::Production`].
    pub fn from_name(name: &str) -> Self {
        if name.trim().eq_ignore_ascii_case("production") {
            Self::Production
        } else {
            Self::Development
        }
    }

    /// Whether this is a production deployment.
    pub fn is_production(self) -> bool {
        self == Self::Production
    }
}

impl From<Environment> for Disclosure {
    fn from(environment: Environment) -> Self {
        match environment {
            Environment::Development => Self::Full,
            Environment::Production => Self::Redacted,
        }
    }
}

/// Configuration errors detected after loading.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    /// Production deployments must sign tokens with a stable secret.
    #[error("PFJ_JWT_SECRET must be set in production")]
    MissingJwtSecret,
}

/// Server settings.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "PFJ")]
pub struct AppSettings {
    /// `production` or anything else for development.
    #[ortho_config(default = String::from(DEFAULT_ENVIRONMENT))]
    pub environment: String,
    /// Interface to bind.
    #[ortho_config(default = String::from(DEFAULT_HOST))]
    pub host: String,
    /// Port to bind.
    #[ortho_config(default = DEFAULT_PORT)]
    pub port: u16,
    /// PostgreSQL URL; the in-memory store is used when absent.
    pub database_url: Option<String>,
    /// HMAC secret for access tokens.
    pub jwt_secret: Option<String>,
}

impl AppSettings {
    /// Resolved deployment environment.
    pub fn environment(&self) -> Environment {
        Environment::from_name(&self.environment)
    }

    /// Host and port to bind.
    pub fn bind_addr(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }

    /// Token signing secret.
    ///
    /// Development without a configured secret gets a random one, so tokens
    /// stop validating after a restart.
    ///
    /// # Errors
    /// [`SettingsError::MissingJwtSecret`] in production when unset.
    pub fn jwt_secret(&self) -> Result<Zeroizing<Vec<u8>>, SettingsError> {
        match self.jwt_secret.as_deref().filter(|s| !s.is_empty()) {
            Some(secret) => Ok(Zeroizing::new(secret.as_bytes().to_vec())),
            None if self.environment().is_production() => Err(SettingsError::MissingJwtSecret),
            None => {
                warn!("PFJ_JWT_SECRET not set; using an ephemeral signing key");
                let mut secret = Uuid::new_v4().as_bytes().to_vec();
                secret.extend_from_slice(Uuid::new_v4().as_bytes());
                Ok(Zeroizing::new(secret))
            }
        }
    }
}
