//! Tracing and logging setup
//!
//! Configures the `tracing` subscriber with environment-based filtering.
//! `RUST_LOG` always wins over the configured level when it is set.

use tracing::Level;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::{SubscriberInitExt, TryInitError},
    EnvFilter,
};

use crate::config::Environment;

/// Tracing configuration options
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// Level applied to the scamhub crates when `RUST_LOG` is unset
    pub level: Level,
    /// Level applied to sqlx query logging when `RUST_LOG` is unset
    pub sql_level: Level,
    /// Enable JSON output format
    pub json: bool,
    /// Include span events (new, close)
    pub span_events: bool,
    /// Include file and line numbers
    pub file_line: bool,
    /// Include the target module path
    pub target: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            sql_level: Level::WARN,
            json: false,
            span_events: false,
            file_line: true,
            target: true,
        }
    }
}

impl TracingConfig {
    /// Create a development configuration with debug logging
    #[must_use]
    pub fn development() -> Self {
        Self {
            level: Level::DEBUG,
            sql_level: Level::INFO,
            json: false,
            span_events: true,
            file_line: true,
            target: true,
        }
    }

    /// Create a production configuration with JSON logging
    #[must_use]
    pub fn production() -> Self {
        Self {
            level: Level::INFO,
            sql_level: Level::WARN,
            json: true,
            span_events: false,
            file_line: false,
            target: true,
        }
    }

    /// Pick the preset matching the deployment environment
    #[must_use]
    pub fn for_environment(env: Environment) -> Self {
        match env {
            Environment::Development => Self::development(),
            Environment::Staging => Self::default(),
            Environment::Production => Self::production(),
        }
    }

    /// Filter directives used when `RUST_LOG` is not set
    #[must_use]
    pub fn default_directives(&self) -> String {
        let level = self.level.as_str().to_lowercase();
        format!(
            "warn,scamhub_core={level},scamhub_common={level},scamhub_db={level},scamhub_service={level},link_sweep={level},sqlx={}",
            self.sql_level.as_str().to_lowercase()
        )
    }

    fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(self.default_directives()))
    }

    fn span_events(&self) -> FmtSpan {
        if self.span_events {
            FmtSpan::NEW | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        }
    }

    fn install(&self) -> Result<(), TryInitError> {
        let registry = tracing_subscriber::registry().with(self.env_filter());

        if self.json {
            // JSON format for production/structured logging
            let fmt_layer = fmt::layer()
                .json()
                .with_file(self.file_line)
                .with_line_number(self.file_line)
                .with_target(self.target)
                .with_span_events(self.span_events());
            registry.with(fmt_layer).try_init()
        } else {
            let fmt_layer = fmt::layer()
                .with_file(self.file_line)
                .with_line_number(self.file_line)
                .with_target(self.target)
                .with_span_events(self.span_events());
            registry.with(fmt_layer).try_init()
        }
    }
}

/// Initialize the tracing subscriber with default configuration
///
/// # Panics
/// Panics if the subscriber cannot be initialized (usually means it's already set).
pub fn init_tracing() {
    init_tracing_with_config(TracingConfig::default());
}

/// Initialize the tracing subscriber with custom configuration
///
/// # Panics
/// Panics if the subscriber cannot be initialized (usually means it's already set).
pub fn init_tracing_with_config(config: TracingConfig) {
    if let Err(e) = config.install() {
        panic!("failed to install tracing subscriber: {e}");
    }
}

/// Try to initialize tracing; does not panic when called twice
pub fn try_init_tracing() -> Result<(), TracingError> {
    try_init_tracing_with_config(TracingConfig::default())
}

/// Try to initialize tracing with custom configuration
pub fn try_init_tracing_with_config(config: TracingConfig) -> Result<(), TracingError> {
    config
        .install()
        .map_err(|_| TracingError::AlreadyInitialized)
}

/// Tracing initialization errors
#[derive(Debug, thiserror::Error)]
pub enum TracingError {
    #[error("Tracing subscriber already initialized")]
    AlreadyInitialized,
}
