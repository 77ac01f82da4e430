// src/config/env.rs
// DOCUMENTATION: Environment variable management
// PURPOSE: Load and validate configuration from .env files

use crate::services::DEFAULT_RADIUS_M;
use dotenv::dotenv;
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Application configuration loaded from environment variables
/// DOCUMENTATION: Centralizes all configuration in one struct
/// Load with Config::from_env() at application startup
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address (e.g., "0.0.0.0")
    pub server_address: String,

    /// Server listen port (default 5001)
    pub server_port: u16,

    /// Environment: development, staging, production
    pub environment: String,

    /// Log level: debug, info, warn, error
    pub log_level: String,

    /// Log file path; empty means stderr
    pub log_file: String,

    /// Size in bytes at which the log file is rotated
    pub log_max_bytes: u64,

    /// Number of rotated log files to keep
    pub log_backup_count: usize,

    /// Number of HTTP worker threads
    pub workers: usize,

    /// Timeout for inbound requests and outbound provider calls, in seconds
    pub request_timeout_secs: u64,

    /// Base URL of the Nominatim place-search API
    pub nominatim_url: String,

    /// Translation endpoint URL
    pub translate_url: String,

    /// Client identification sent to providers (required by Nominatim's usage policy)
    pub user_agent: String,

    /// Radius in meters within which an emergency service counts as nearby
    pub search_radius_m: u32,

    /// Attempts made by the retry wrapper before giving up
    pub retry_max_attempts: u32,

    /// Fixed delay between retry attempts, in milliseconds
    pub retry_delay_ms: u64,

    /// Directory holding index.html
    pub templates_dir: String,
}

impl Config {
    /// Load configuration from environment variables
    /// DOCUMENTATION: Reads from .env or process environment
    /// Called once at application startup
    pub fn from_env() -> Self {
        // Load .env file if it exists
        dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let string = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Config {
            server_address: string("SERVER_ADDRESS", "0.0.0.0"),
            server_port: parse_or(&lookup, "PORT", 5001),
            environment: string("ENVIRONMENT", "development"),
            log_level: string("LOG_LEVEL", "info"),
            log_file: string("LOG_FILE", "app.log"),
            log_max_bytes: parse_or(&lookup, "LOG_MAX_BYTES", 100_000),
            log_backup_count: parse_or(&lookup, "LOG_BACKUP_COUNT", 3),
            workers: parse_or(&lookup, "WORKERS", default_workers()),
            request_timeout_secs: parse_or(&lookup, "REQUEST_TIMEOUT_SECS", 30),
            nominatim_url: string("NOMINATIM_URL", "https://nominatim.openstreetmap.org"),
            translate_url: string(
                "TRANSLATE_URL",
                "https://translate.googleapis.com/translate_a/single",
            ),
            user_agent: string("USER_AGENT", "EmergencyServicesApp/1.0"),
            search_radius_m: parse_or(&lookup, "SEARCH_RADIUS_M", DEFAULT_RADIUS_M),
            retry_max_attempts: parse_or(&lookup, "RETRY_MAX_ATTEMPTS", 3),
            retry_delay_ms: parse_or(&lookup, "RETRY_DELAY_MS", 1000),
            templates_dir: string("TEMPLATES_DIR", "templates"),
        }
    }

    /// Validate critical configuration
    /// DOCUMENTATION: Ensures application can start safely
    pub fn validate(&self) -> Result<(), String> {
        if self.server_port == 0 {
            return Err("PORT must be a non-zero port number".to_string());
        }

        if self.user_agent.trim().is_empty() {
            return Err("USER_AGENT is required by the place-search provider".to_string());
        }

        if self.search_radius_m == 0 {
            return Err("SEARCH_RADIUS_M must be positive".to_string());
        }

        if self.workers == 0 {
            return Err("WORKERS must be at least 1".to_string());
        }

        if self.request_timeout_secs == 0 {
            return Err("REQUEST_TIMEOUT_SECS must be positive".to_string());
        }

        if self.retry_max_attempts == 0 {
            log::warn!("RETRY_MAX_ATTEMPTS is 0 - provider calls will be attempted once");
        }

        if self.environment == "production" && self.log_file.is_empty() {
            log::warn!("LOG_FILE not configured - logging to stderr in production");
        }

        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server_address, self.server_port)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    lookup(key)
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}

/// Two workers per core plus one, the usual sizing for I/O-bound services
fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
        * 2
        + 1
}
