//! Daemon configuration.
//!
//! Loads configuration from environment variables with sensible defaults.

use crate::error::{DaemonError, DaemonResult};
use shelf_engine::EngineConfig;
use shelf_store::StoreConfig;
use std::env;
use std::path::PathBuf;

// =============================================================================
// Configuration
// =============================================================================

/// Daemon configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// API server configuration
    pub api: ApiConfig,

    /// Backing resource locations
    pub store: StoreConfig,

    /// Engine configuration
    pub engine: EngineConfig,

    /// Environment (test, development, production)
    pub environment: Environment,
}

/// API server configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,
    /// Port to bind to
    pub port: u16,
}

/// Environment type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    /// Test environment
    Test,
    /// Development environment
    Development,
    /// Production environment
    Production,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> DaemonResult<Self> {
        // Load .env file if present (ignore errors)
        let _ = dotenvy::dotenv();

        let environment = Self::load_environment()?;
        let api = Self::load_api_config()?;
        let store = Self::load_store_config();
        let engine = Self::load_engine_config()?;

        Ok(Self {
            api,
            store,
            engine,
            environment,
        })
    }

    /// Create test configuration with both resources inside `data_dir`.
    pub fn test(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 0, // Let OS assign port
            },
            store: StoreConfig::in_dir(data_dir),
            engine: EngineConfig::default(),
            environment: Environment::Test,
        }
    }

    fn load_environment() -> DaemonResult<Environment> {
        let env_str = env::var("SHELF_ENV").unwrap_or_else(|_| "development".to_string());

        match env_str.to_lowercase().as_str() {
            "test" => Ok(Environment::Test),
            "development" | "dev" => Ok(Environment::Development),
            "production" | "prod" => Ok(Environment::Production),
            other => Err(DaemonError::Config(format!(
                "Invalid SHELF_ENV: {}. Expected: test, development, production",
                other
            ))),
        }
    }

    fn load_api_config() -> DaemonResult<ApiConfig> {
        let host = env::var("SHELF_API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port_str = env::var("SHELF_API_PORT").unwrap_or_else(|_| "3000".to_string());

        let port = port_str
            .parse::<u16>()
            .map_err(|_| DaemonError::Config(format!("Invalid SHELF_API_PORT: {}", port_str)))?;

        Ok(ApiConfig { host, port })
    }

    fn load_store_config() -> StoreConfig {
        let defaults = StoreConfig::default();

        StoreConfig {
            data_file: env::var_os("SHELF_DATA_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_file),
            request_log: env::var_os("SHELF_REQUEST_LOG")
                .map(PathBuf::from)
                .unwrap_or(defaults.request_log),
        }
    }

    fn load_engine_config() -> DaemonResult<EngineConfig> {
        let empty_price_min_is_error = Self::load_bool_env(
            "SHELF_EMPTY_PRICE_MIN_IS_ERROR",
            EngineConfig::default().empty_price_min_is_error,
        )?;

        Ok(EngineConfig {
            empty_price_min_is_error,
        })
    }

    fn load_bool_env(key: &str, default: bool) -> DaemonResult<bool> {
        match env::var(key) {
            Ok(val) => parse_bool(&val)
                .ok_or_else(|| DaemonError::Config(format!("Invalid {} value: {}", key, val))),
            Err(_) => Ok(default),
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                host: "0.0.0.0".to_string(),
                port: 3000,
            },
            store: StoreConfig::default(),
            engine: EngineConfig::default(),
            environment: Environment::Development,
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Test => write!(f, "test"),
            Environment::Development => write!(f, "development"),
            Environment::Production => write!(f, "production"),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
