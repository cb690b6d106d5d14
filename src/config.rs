//! Environment-driven configuration
//!
//! All settings come from environment variables (optionally via a `.env`
//! file loaded in `main`) with sensible defaults; malformed values fall
//! back to the default rather than aborting startup.

use std::env;
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub server_host: String,
    pub server_port: u16,
    /// Prefix for generated short URLs, without a trailing slash.
    pub base_url: String,
    /// Length of generated short codes.
    pub code_length: usize,
    pub click_flush_interval: Duration,
    /// Buffered clicks that trigger an early flush.
    pub click_flush_threshold: usize,
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug)]
pub struct LoggingConfig {
    pub level: String,
    /// Append to this file instead of stdout when set and non-empty.
    pub file: Option<String>,
    /// "text" or "json".
    pub format: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_host: "127.0.0.1".to_string(),
            server_port: 3000,
            base_url: "http://localhost:3000".to_string(),
            code_length: 6,
            click_flush_interval: Duration::from_millis(500),
            click_flush_threshold: 1000,
            logging: LoggingConfig {
                level: "info".to_string(),
                file: None,
                format: "text".to_string(),
            },
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            server_host: env::var("SERVER_HOST").unwrap_or(defaults.server_host),
            server_port: env_parsed("SERVER_PORT", defaults.server_port),
            base_url: env::var("BASE_URL").unwrap_or(defaults.base_url),
            code_length: env_parsed("RANDOM_CODE_LENGTH", defaults.code_length),
            click_flush_interval: Duration::from_millis(env_parsed(
                "CLICK_FLUSH_INTERVAL_MS",
                defaults.click_flush_interval.as_millis() as u64,
            )),
            click_flush_threshold: env_parsed(
                "CLICK_FLUSH_THRESHOLD",
                defaults.click_flush_threshold,
            ),
            logging: LoggingConfig {
                level: env::var("RUST_LOG").unwrap_or(defaults.logging.level),
                file: env::var("LOG_FILE").ok(),
                format: env::var("LOG_FORMAT").unwrap_or(defaults.logging.format),
            },
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn env_parsed<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
