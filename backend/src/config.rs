// src/config.rs

use std::env;
use dotenvy::dotenv;

/// Storage key holding the serialized exam collection (JSON array).
pub const EXAMS_KEY: &str = "exams";

/// Storage key holding the bearer token of the current session.
pub const ACCESS_TOKEN_KEY: &str = "accessToken";

/// Number of most recent exams compared against the window before them
/// when computing per-lesson trends.
pub const DEFAULT_TREND_WINDOW: usize = 3;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: String,
    pub rust_log: String,
    pub log_dir: String,
    /// Whether the mock identity API sleeps like a remote call would.
    pub mock_latency: bool,
    pub trend_window: usize,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://exam_tracker.db?mode=rwc".to_string());

        let bind_addr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        let rust_log = env::var("RUST_LOG")
            .unwrap_or_else(|_| "info".to_string());

        let log_dir = env::var("LOG_DIR")
            .unwrap_or_else(|_| "logs".to_string());

        let mock_latency = env::var("MOCK_LATENCY")
            .map(|v| !matches!(v.to_ascii_lowercase().as_str(), "0" | "false" | "off"))
            .unwrap_or(true);

        let trend_window = env::var("TREND_WINDOW")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .filter(|w| *w > 0)
            .unwrap_or(DEFAULT_TREND_WINDOW);

        Self {
            database_url,
            bind_addr,
            rust_log,
            log_dir,
            mock_latency,
            trend_window,
        }
    }

    /// Configuration used by tests: in-memory database, no artificial latency.
    pub fn for_tests() -> Self {
        Self {
            database_url: "sqlite::memory:".to_string(),
            bind_addr: "127.0.0.1:0".to_string(),
            rust_log: "error".to_string(),
            log_dir: "logs".to_string(),
            mock_latency: false,
            trend_window: DEFAULT_TREND_WINDOW,
        }
    }
}
