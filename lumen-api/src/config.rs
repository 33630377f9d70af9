//! API Configuration Module
//!
//! Configuration is loaded from environment variables with sensible defaults
//! for development: an in-memory store and permissive CORS.

use std::path::PathBuf;
use std::str::FromStr;

use lumen_core::ConfigError;

// ============================================================================
// STORE BACKEND
// ============================================================================

/// Which keyed store backs the repositories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// Process-local map, lost on restart.
    Memory,
    /// LMDB environment under the data directory.
    Lmdb,
}

impl FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" | "mem" => Ok(StoreBackend::Memory),
            "lmdb" => Ok(StoreBackend::Lmdb),
            other => Err(ConfigError::InvalidValue {
                field: "LUMEN_STORE".to_string(),
                value: other.to_string(),
                reason: "expected 'memory' or 'lmdb'".to_string(),
            }),
        }
    }
}

// ============================================================================
// API CONFIGURATION
// ============================================================================

/// API configuration for storage and CORS.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    // ========================================================================
    // Storage Configuration
    // ========================================================================
    pub store_backend: StoreBackend,

    /// Directory holding the LMDB environment.
    pub data_dir: PathBuf,

    /// LMDB map size in megabytes.
    pub store_max_mb: usize,

    // ========================================================================
    // CORS Configuration
    // ========================================================================
    /// Allowed CORS origins (comma-separated in env var).
    /// Empty means allow all origins (dev mode).
    /// Example: "https://lumen-lighting.example,https://admin.lumen-lighting.example"
    pub cors_origins: Vec<String>,

    /// Whether to allow credentials in CORS requests.
    pub cors_allow_credentials: bool,

    /// Max age for CORS preflight cache in seconds.
    pub cors_max_age_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            store_backend: StoreBackend::Memory,
            data_dir: PathBuf::from("./data"),
            store_max_mb: 64,
            cors_origins: Vec::new(),
            cors_allow_credentials: false,
            cors_max_age_secs: 86400,
        }
    }
}

impl ApiConfig {
    /// Create ApiConfig from environment variables.
    ///
    /// Environment variables:
    /// - `LUMEN_STORE`: "memory" or "lmdb" (default: memory)
    /// - `LUMEN_DATA_DIR`: LMDB directory (default: ./data)
    /// - `LUMEN_STORE_MAX_MB`: LMDB map size (default: 64)
    /// - `LUMEN_CORS_ORIGINS`: Comma-separated allowed origins (empty = allow all)
    /// - `LUMEN_CORS_ALLOW_CREDENTIALS`: "true" or "false" (default: false)
    /// - `LUMEN_CORS_MAX_AGE_SECS`: Preflight cache duration (default: 86400)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let store_backend = match lookup("LUMEN_STORE") {
            Some(value) => value.parse()?,
            None => defaults.store_backend,
        };

        let data_dir = lookup("LUMEN_DATA_DIR")
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.data_dir);

        let store_max_mb = match lookup("LUMEN_STORE_MAX_MB") {
            Some(value) => parse_positive("LUMEN_STORE_MAX_MB", &value)?,
            None => defaults.store_max_mb,
        };

        let cors_origins = lookup("LUMEN_CORS_ORIGINS")
            .map(|s| {
                s.split(',')
                    .map(|o| o.trim().to_string())
                    .filter(|o| !o.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        let cors_allow_credentials = lookup("LUMEN_CORS_ALLOW_CREDENTIALS")
            .map(|s| s.to_lowercase() == "true")
            .unwrap_or(defaults.cors_allow_credentials);

        let cors_max_age_secs = lookup("LUMEN_CORS_MAX_AGE_SECS")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.cors_max_age_secs);

        Ok(Self {
            store_backend,
            data_dir,
            store_max_mb,
            cors_origins,
            cors_allow_credentials,
            cors_max_age_secs,
        })
    }

    /// Check if running in production mode (strict CORS).
    pub fn is_production(&self) -> bool {
        !self.cors_origins.is_empty()
    }
}

fn parse_positive(field: &str, value: &str) -> Result<usize, ConfigError> {
    match value.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ConfigError::InvalidValue {
            field: field.to_string(),
            value: value.to_string(),
            reason: "must be a positive integer".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() -> Result<(), ConfigError> {
        let config = ApiConfig::from_lookup(lookup(&[]))?;
        assert_eq!(config.store_backend, StoreBackend::Memory);
        assert_eq!(config.store_max_mb, 64);
        assert!(config.cors_origins.is_empty());
        assert!(!config.cors_allow_credentials);
        assert_eq!(config.cors_max_age_secs, 86400);
        assert!(!config.is_production());
        Ok(())
    }

    #[test]
    fn test_lmdb_config() -> Result<(), ConfigError> {
        let config = ApiConfig::from_lookup(lookup(&[
            ("LUMEN_STORE", "LMDB"),
            ("LUMEN_DATA_DIR", "/var/lib/lumen"),
            ("LUMEN_STORE_MAX_MB", "256"),
        ]))?;
        assert_eq!(config.store_backend, StoreBackend::Lmdb);
        assert_eq!(config.data_dir, PathBuf::from("/var/lib/lumen"));
        assert_eq!(config.store_max_mb, 256);
        Ok(())
    }

    #[test]
    fn test_cors_origins_parsing() -> Result<(), ConfigError> {
        let config = ApiConfig::from_lookup(lookup(&[(
            "LUMEN_CORS_ORIGINS",
            " https://lumen-lighting.example , ,https://admin.lumen-lighting.example",
        )]))?;
        assert_eq!(
            config.cors_origins,
            vec![
                "https://lumen-lighting.example".to_string(),
                "https://admin.lumen-lighting.example".to_string()
            ]
        );
        assert!(config.is_production());
        Ok(())
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(matches!(
            ApiConfig::from_lookup(lookup(&[("LUMEN_STORE", "postgres")])),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            ApiConfig::from_lookup(lookup(&[("LUMEN_STORE_MAX_MB", "0")])),
            Err(ConfigError::InvalidValue { .. })
        ));
    }
}
