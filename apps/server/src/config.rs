//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

use secrecy::{ExposeSecret, SecretString};

/// Development default values - NEVER use in production.
pub mod defaults {
    pub const DEV_HOST: &str = "127.0.0.1";
    pub const DEV_PORT: u16 = 8080;
    pub const DEV_LOCAL_ROOT: &str = "./data";
    pub const DEV_WORKERS: usize = 4;
    pub const RESPONSE_BUFFER_SIZE: usize = 65_536; // 64KB held before the response is committed
    pub const CHANNEL_CAPACITY: usize = 16; // Chunks in flight between backend and client

    // S3/MinIO defaults for development
    pub const DEV_S3_ENDPOINT: &str = "http://localhost:9100";
    pub const DEV_S3_BUCKET: &str = "files";
    pub const DEV_S3_REGION: &str = "us-east-1";
    pub const DEV_S3_ACCESS_KEY: &str = "minioadmin";
    pub const DEV_S3_SECRET_KEY: &str = "minioadmin";
}

/// Runtime environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    /// Parse environment from string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Some(Self::Development),
            "production" | "prod" => Some(Self::Production),
            _ => None,
        }
    }

    /// Check if this is a development environment.
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    /// Check if this is a production environment.
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
        }
    }
}

/// Which storage backend serves the bridged files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    Local,
    S3,
}

impl BackendKind {
    /// Parse backend kind from string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "local" | "fs" => Some(Self::Local),
            "s3" | "minio" => Some(Self::S3),
            _ => None,
        }
    }
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Local => write!(f, "local"),
            Self::S3 => write!(f, "s3"),
        }
    }
}

/// S3 storage configuration.
#[derive(Debug, Clone)]
pub struct StorageSettings {
    /// S3 endpoint URL (for MinIO or custom S3-compatible services)
    pub endpoint: Option<String>,
    /// S3 bucket name
    pub bucket: String,
    /// S3 region
    pub region: String,
    /// S3 access key ID
    pub access_key: String,
    /// S3 secret access key
    pub secret_key: SecretString,
}

/// Tuning for the streaming bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BridgeSettings {
    /// Bytes held back before the response is committed. Transfers that fit
    /// get an exact Content-Length; larger ones are streamed chunked.
    pub response_buffer_size: usize,
    /// Capacity of the chunk channel between backend writes and the response body
    pub channel_capacity: usize,
}

impl Default for BridgeSettings {
    fn default() -> Self {
        Self {
            response_buffer_size: defaults::RESPONSE_BUFFER_SIZE,
            channel_capacity: defaults::CHANNEL_CAPACITY,
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Runtime environment
    pub environment: Environment,
    /// Server host address
    pub host: String,
    /// Server port
    pub port: u16,
    /// Number of actix workers
    pub workers: usize,
    /// Selected storage backend
    pub backend: BackendKind,
    /// Root directory for the local backend
    pub local_root: Option<PathBuf>,
    /// S3 storage configuration
    pub storage: StorageSettings,
    /// Streaming bridge tuning
    pub bridge: BridgeSettings,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// In development mode (RUST_ENV=development):
    /// - All variables have sensible defaults
    /// - Only RUST_ENV is required
    ///
    /// In production mode (RUST_ENV=production):
    /// - The selected backend must be fully configured
    /// - Server will NOT start if using development defaults
    ///
    /// Environment variables:
    /// - `RUST_ENV`: Environment (development/production) - REQUIRED
    /// - `BRIDGE_HOST`: Server host (default: 127.0.0.1)
    /// - `BRIDGE_PORT`: Server port (default: 8080)
    /// - `BRIDGE_WORKERS`: Worker count (default: 4 in development, CPU count in production)
    /// - `BRIDGE_BACKEND`: `local` or `s3` (default: local)
    /// - `BRIDGE_LOCAL_ROOT`: Root directory for the local backend
    /// - `BRIDGE_RESPONSE_BUFFER_SIZE`: Bytes buffered before commit (default: 64KB)
    /// - `BRIDGE_CHANNEL_CAPACITY`: Chunks in flight per transfer (default: 16)
    /// - `S3_ENDPOINT`: S3 endpoint URL (for MinIO/custom S3)
    /// - `S3_BUCKET`: S3 bucket name
    /// - `S3_REGION`: S3 region
    /// - `S3_ACCESS_KEY`: S3 access key ID
    /// - `S3_SECRET_KEY`: S3 secret access key
    pub fn from_env() -> Result<Self, ConfigError> {
        // Parse environment - required
        let env_str = env::var("RUST_ENV").map_err(|_| ConfigError::MissingEnvVar("RUST_ENV"))?;

        let environment = Environment::parse(&env_str).ok_or(ConfigError::InvalidValue(
            "RUST_ENV must be 'development' or 'production'",
        ))?;

        let host = env::var("BRIDGE_HOST").unwrap_or_else(|_| defaults::DEV_HOST.to_string());

        let port = env::var("BRIDGE_PORT")
            .unwrap_or_else(|_| defaults::DEV_PORT.to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidValue("BRIDGE_PORT must be a valid port number"))?;

        let workers = match env::var("BRIDGE_WORKERS") {
            Ok(value) => value
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or(ConfigError::InvalidValue(
                    "BRIDGE_WORKERS must be a positive number",
                ))?,
            Err(_) if environment.is_development() => defaults::DEV_WORKERS,
            Err(_) => num_cpus::get(),
        };

        let backend = match env::var("BRIDGE_BACKEND") {
            Ok(value) => BackendKind::parse(&value).ok_or(ConfigError::InvalidValue(
                "BRIDGE_BACKEND must be 'local' or 's3'",
            ))?,
            Err(_) => BackendKind::Local,
        };

        let local_root = env::var("BRIDGE_LOCAL_ROOT")
            .ok()
            .map(PathBuf::from)
            .or_else(|| {
                if environment.is_development() {
                    Some(PathBuf::from(defaults::DEV_LOCAL_ROOT))
                } else {
                    None
                }
            });

        let response_buffer_size = env::var("BRIDGE_RESPONSE_BUFFER_SIZE")
            .unwrap_or_else(|_| defaults::RESPONSE_BUFFER_SIZE.to_string())
            .parse::<usize>()
            .map_err(|_| {
                ConfigError::InvalidValue("BRIDGE_RESPONSE_BUFFER_SIZE must be a valid number")
            })?;

        let channel_capacity = env::var("BRIDGE_CHANNEL_CAPACITY")
            .unwrap_or_else(|_| defaults::CHANNEL_CAPACITY.to_string())
            .parse::<usize>()
            .ok()
            .filter(|n| *n > 0)
            .ok_or(ConfigError::InvalidValue(
                "BRIDGE_CHANNEL_CAPACITY must be a positive number",
            ))?;

        // S3 configuration
        let storage = StorageSettings {
            endpoint: env::var("S3_ENDPOINT").ok().or_else(|| {
                if environment.is_development() {
                    Some(defaults::DEV_S3_ENDPOINT.to_string())
                } else {
                    None
                }
            }),
            bucket: env::var("S3_BUCKET").unwrap_or_else(|_| defaults::DEV_S3_BUCKET.to_string()),
            region: env::var("S3_REGION").unwrap_or_else(|_| defaults::DEV_S3_REGION.to_string()),
            access_key: env::var("S3_ACCESS_KEY")
                .unwrap_or_else(|_| defaults::DEV_S3_ACCESS_KEY.to_string()),
            secret_key: SecretString::from(
                env::var("S3_SECRET_KEY")
                    .unwrap_or_else(|_| defaults::DEV_S3_SECRET_KEY.to_string()),
            ),
        };

        let config = Config {
            environment,
            host,
            port,
            workers,
            backend,
            local_root,
            storage,
            bridge: BridgeSettings {
                response_buffer_size,
                channel_capacity,
            },
        };

        // Validate production configuration
        if environment.is_production() {
            config.validate_production()?;
        }

        Ok(config)
    }

    /// Validate that production configuration does not use development defaults.
    fn validate_production(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        match self.backend {
            BackendKind::Local => {
                if self.local_root.is_none() {
                    errors.push(
                        "BRIDGE_LOCAL_ROOT must be set when BRIDGE_BACKEND is 'local'.".to_string(),
                    );
                }
            }
            BackendKind::S3 => {
                // Check if using dev S3 credentials in production
                if self.storage.access_key == defaults::DEV_S3_ACCESS_KEY
                    || self.storage.secret_key.expose_secret() == defaults::DEV_S3_SECRET_KEY
                {
                    errors.push(
                        "S3_ACCESS_KEY/S3_SECRET_KEY are using development defaults. Set production S3 credentials."
                            .to_string(),
                    );
                }
            }
        }

        if !errors.is_empty() {
            return Err(ConfigError::ProductionValidation(errors));
        }

        Ok(())
    }

    /// Get the server bind address.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Check if running in development mode.
    pub fn is_development(&self) -> bool {
        self.environment.is_development()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(&'static str),

    #[error("Production configuration validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    ProductionValidation(Vec<String>),
}
