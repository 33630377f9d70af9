//! Structured logging for the API binary.
//!
//! JSON lines through `tracing-subscriber`, filtered by `LUMEN_LOG` (falling
//! back to `RUST_LOG`).

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::{ApiError, ApiResult};

const DEFAULT_FILTER: &str = "lumen_api=debug,lumen_storage=debug,tower_http=debug,info";

/// Log output shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

/// Telemetry configuration from environment variables.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub service_name: String,
    pub environment: String,
    /// Explicit filter directives; `None` uses `RUST_LOG` or the default.
    pub filter: Option<String>,
    pub format: LogFormat,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: std::env::var("LUMEN_SERVICE_NAME")
                .unwrap_or_else(|_| "lumen-api".to_string()),
            environment: std::env::var("LUMEN_ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string()),
            filter: std::env::var("LUMEN_LOG").ok(),
            format: match std::env::var("LUMEN_LOG_FORMAT").as_deref() {
                Ok("pretty") => LogFormat::Pretty,
                _ => LogFormat::Json,
            },
        }
    }
}

impl TelemetryConfig {
    fn env_filter(&self) -> EnvFilter {
        match &self.filter {
            Some(directives) => EnvFilter::try_new(directives)
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
            None => EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
        }
    }
}

/// Install the global tracing subscriber.
///
/// Call once at startup before any tracing occurs.
pub fn init_tracing(config: &TelemetryConfig) -> ApiResult<()> {
    let registry = tracing_subscriber::registry().with(config.env_filter());

    let result = match config.format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).try_init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer().pretty()).try_init(),
    };
    result.map_err(|e| ApiError::internal_error(format!("Failed to init subscriber: {}", e)))?;

    tracing::info!(
        service_name = config.service_name,
        environment = config.environment,
        "Telemetry initialized"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_filter_falls_back_to_default() {
        let config = TelemetryConfig {
            service_name: "lumen-api".to_string(),
            environment: "test".to_string(),
            filter: Some("lumen_api=notalevel".to_string()),
            format: LogFormat::Json,
        };
        assert_eq!(config.env_filter().to_string(), EnvFilter::new(DEFAULT_FILTER).to_string());
    }
}
