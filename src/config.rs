//! Console configuration
//!
//! Everything is read from environment variables with sensible defaults, so
//! the binary runs against a local backend with no setup.

use std::env;

/// Default backend address when `STUDENT_API_BASE_URL` is unset
pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000";

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Backend API configuration
    pub api: ApiConfig,
    /// Native window configuration
    pub window: WindowConfig,
}

/// Backend API configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL every endpoint path is appended to, without a trailing slash
    pub base_url: String,
}

/// Native window configuration
#[derive(Debug, Clone)]
pub struct WindowConfig {
    /// Initial window width in points
    pub width: f32,
    /// Initial window height in points
    pub height: f32,
}

impl Config {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        let base_url = env::var("STUDENT_API_BASE_URL")
            .ok()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

        Self {
            api: ApiConfig::new(&base_url),
            window: WindowConfig {
                width: env::var("STUDENT_CONSOLE_WIDTH")
                    .ok()
                    .and_then(|w| w.parse().ok())
                    .unwrap_or(1000.0),
                height: env::var("STUDENT_CONSOLE_HEIGHT")
                    .ok()
                    .and_then(|h| h.parse().ok())
                    .unwrap_or(700.0),
            },
        }
    }
}

impl ApiConfig {
    /// Build an API config, normalising away trailing slashes
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim().trim_end_matches('/').to_string(),
        }
    }
}
