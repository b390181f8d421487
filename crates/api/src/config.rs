//! # API Configuration Module
//!
//! Loads the server configuration from environment variables, with defaults
//! for everything except the database URL.
//!
//! ## Environment Variables
//!
//! - `API_HOST`: The host address to bind the server to (default: "0.0.0.0")
//! - `API_PORT`: The port to listen on (default: 3000)
//! - `DATABASE_URL`: PostgreSQL connection string (required)
//! - `DATABASE_MAX_CONNECTIONS`: Pool size (default: 5)
//! - `LOG_LEVEL`: Logging level (default: "info")
//! - `API_CORS_ORIGINS`: Comma-separated list of allowed CORS origins
//! - `API_REQUEST_TIMEOUT_SECONDS`: Request timeout (default: 30)
//! - `SCHEDULE_TIMEZONE`: IANA zone that defines "today" for schedule
//!   generation (default: "Asia/Jakarta")
//! - `UPLOAD_DIR`: Directory field images are written to (default: "./uploads")
//! - `UPLOAD_BASE_URL`: Public URL prefix of `UPLOAD_DIR`
//!   (default: "http://<host>:<port>/uploads")

use std::env;
use std::path::PathBuf;

use chrono_tz::Tz;
use eyre::{Result, WrapErr, eyre};
use tracing::Level;

/// Configuration for the Fieldbook API server
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host address for the API server (e.g., "127.0.0.1", "0.0.0.0")
    pub host: String,

    /// Port for the API server to listen on
    pub port: u16,

    /// PostgreSQL database connection string
    pub database_url: String,

    pub database_max_connections: u32,

    /// Log level for the application
    pub log_level: Level,

    /// CORS allowed origins (optional)
    pub cors_origins: Option<Vec<String>>,

    /// Request timeout in seconds
    pub request_timeout: u64,

    /// Zone whose calendar date counts as "today" when generating schedules
    pub schedule_timezone: Tz,

    pub upload_dir: PathBuf,

    pub upload_base_url: String,
}

fn parse_log_level(value: &str) -> Level {
    match value {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

impl ApiConfig {
    /// Creates a new ApiConfig from environment variables
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The DATABASE_URL environment variable is not set
    /// - API_PORT or DATABASE_MAX_CONNECTIONS are not numbers
    /// - SCHEDULE_TIMEZONE is not a known IANA zone
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key/value source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        // Network settings
        let host = var("API_HOST", "0.0.0.0");
        let port = var("API_PORT", "3000")
            .parse()
            .wrap_err("Invalid API_PORT value")?;

        // Database settings
        let database_url = lookup("DATABASE_URL")
            .ok_or_else(|| eyre!("DATABASE_URL environment variable must be set"))?;
        let database_max_connections = var("DATABASE_MAX_CONNECTIONS", "5")
            .parse()
            .wrap_err("Invalid DATABASE_MAX_CONNECTIONS value")?;

        let log_level = parse_log_level(&var("LOG_LEVEL", "info"));

        // CORS settings
        let cors_origins = lookup("API_CORS_ORIGINS").map(|origins| {
            origins
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        });

        let request_timeout = var("API_REQUEST_TIMEOUT_SECONDS", "30")
            .parse()
            .unwrap_or(30);

        // Scheduling settings
        let timezone_name = var("SCHEDULE_TIMEZONE", "Asia/Jakarta");
        let schedule_timezone = timezone_name
            .parse::<Tz>()
            .map_err(|e| eyre!("Invalid SCHEDULE_TIMEZONE value '{}': {}", timezone_name, e))?;

        // Upload settings
        let upload_dir = PathBuf::from(var("UPLOAD_DIR", "./uploads"));
        let upload_base_url = lookup("UPLOAD_BASE_URL")
            .unwrap_or_else(|| format!("http://{host}:{port}/uploads"));

        Ok(Self {
            host,
            port,
            database_url,
            database_max_connections,
            log_level,
            cors_origins,
            request_timeout,
            schedule_timezone,
            upload_dir,
            upload_base_url,
        })
    }

    /// Returns the server address as a string
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
