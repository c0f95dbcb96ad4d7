//! Application configuration structs
//!
//! Loads configuration from environment variables and an optional `.env` file.

use serde::Deserialize;
use std::env;
use std::fmt;

use scamhub_core::Performer;
use subtle::ConstantTimeEq;

use crate::error::{AppError, AppResult};

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub database: DatabaseConfig,
    pub admin: AdminConfig,
    pub storage: StorageConfig,
    pub link_sweep: LinkSweepConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

/// Moderator credentials, read once at startup
#[derive(Clone, Deserialize)]
pub struct AdminConfig {
    pub user: String,
    pub password: String,
}

impl AdminConfig {
    /// Check submitted credentials; on success the username becomes the
    /// performer recorded on audit entries.
    pub fn authenticate(&self, user: &str, password: &str) -> AppResult<Performer> {
        let user_ok = self.user.as_bytes().ct_eq(user.as_bytes());
        let pass_ok = self.password.as_bytes().ct_eq(password.as_bytes());
        if bool::from(user_ok & pass_ok) {
            Ok(Performer::moderator(user))
        } else {
            Err(AppError::InvalidCredentials)
        }
    }
}

impl fmt::Debug for AdminConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminConfig")
            .field("user", &self.user)
            .field("password", &"[redacted]")
            .finish()
    }
}

/// Upload storage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_upload_dir")]
    pub upload_dir: String,
    #[serde(default = "default_max_file_size")]
    pub max_file_size_mb: u32,
}

impl StorageConfig {
    #[must_use]
    pub fn max_file_size_bytes(&self) -> u64 {
        u64::from(self.max_file_size_mb) * 1024 * 1024
    }
}

/// Batch link extraction settings
#[derive(Debug, Clone, Deserialize)]
pub struct LinkSweepConfig {
    #[serde(default = "default_sweep_batch_size")]
    pub batch_size: i64,
    #[serde(default = "default_sweep_concurrency")]
    pub concurrency: usize,
}

impl Default for LinkSweepConfig {
    fn default() -> Self {
        Self {
            batch_size: default_sweep_batch_size(),
            concurrency: default_sweep_concurrency(),
        }
    }
}

// Default value functions
fn default_app_name() -> String {
    "scamhub".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    5
}

fn default_upload_dir() -> String {
    "./uploads".to_string()
}

fn default_max_file_size() -> u32 {
    10
}

fn default_sweep_batch_size() -> i64 {
    200
}

fn default_sweep_concurrency() -> usize {
    8
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::MissingVar(key))
        };

        let link_sweep = LinkSweepConfig {
            batch_size: lookup("LINK_SWEEP_BATCH_SIZE")
                .and_then(|s| s.parse().ok())
                .unwrap_or_else(default_sweep_batch_size),
            concurrency: lookup("LINK_SWEEP_CONCURRENCY")
                .and_then(|s| s.parse().ok())
                .unwrap_or_else(default_sweep_concurrency),
        };
        if link_sweep.batch_size < 1 {
            return Err(ConfigError::InvalidValue(
                "LINK_SWEEP_BATCH_SIZE",
                link_sweep.batch_size.to_string(),
            ));
        }
        if link_sweep.concurrency == 0 {
            return Err(ConfigError::InvalidValue(
                "LINK_SWEEP_CONCURRENCY",
                "0".to_string(),
            ));
        }

        Ok(Self {
            app: AppSettings {
                name: lookup("APP_NAME").unwrap_or_else(default_app_name),
                env: lookup("APP_ENV")
                    .and_then(|s| match s.to_lowercase().as_str() {
                        "production" => Some(Environment::Production),
                        "staging" => Some(Environment::Staging),
                        "development" => Some(Environment::Development),
                        _ => None,
                    })
                    .unwrap_or_default(),
            },
            database: DatabaseConfig {
                url: required("DATABASE_URL")?,
                max_connections: lookup("DATABASE_MAX_CONNECTIONS")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_max_connections),
                min_connections: lookup("DATABASE_MIN_CONNECTIONS")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_min_connections),
            },
            admin: AdminConfig {
                user: required("ADMIN_USER")?,
                password: required("ADMIN_PASSWORD")?,
            },
            storage: StorageConfig {
                upload_dir: lookup("UPLOAD_DIR").unwrap_or_else(default_upload_dir),
                max_file_size_mb: lookup("MAX_FILE_SIZE_MB")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_max_file_size),
            },
            link_sweep,
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
