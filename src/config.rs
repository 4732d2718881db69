//! Centralized configuration for bucketview.
//!
//! One place for the tunables instead of scattered env lookups:
//! - `BrowserConfig::default()` gives the built-in defaults;
//! - `BrowserConfig::from_env()` overlays BV_* environment variables;
//! - fluent `with_*` setters let the CLI override single fields.

use std::fmt;
use std::time::Duration;

use crate::display::DisplayMode;

#[derive(Clone, Debug)]
pub struct BrowserConfig {
    /// How long `Store::open` waits for the engine's exclusive file lock.
    /// Env: BV_OPEN_TIMEOUT_MS (default 1000)
    pub open_timeout_ms: u64,

    /// Create the database file when it does not exist.
    /// Env: BV_CREATE_IF_MISSING (default true; "0|false|off|no" => false)
    pub create_if_missing: bool,

    /// HTTP bind address for `serve`.
    /// Env: BV_HTTP_ADDR (default 127.0.0.1:8080)
    pub http_addr: String,

    /// Number of threads pulling requests off the listener.
    /// Env: BV_HTTP_WORKERS (default 4, minimum 1)
    pub http_workers: usize,

    /// Request bodies above this size are rejected with 413.
    /// Env: BV_HTTP_MAX_BODY (default 1 MiB)
    pub max_body_bytes: usize,

    /// Registry name of the database given on the command line.
    /// Env: BV_DEFAULT_DB (default "default")
    pub default_db_name: String,

    /// Initial value display mode in the terminal UI.
    /// Env: BV_DISPLAY_MODE = string|base64|base58|hex (default string)
    pub display_mode: DisplayMode,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            open_timeout_ms: 1000,
            create_if_missing: true,
            http_addr: "127.0.0.1:8080".to_string(),
            http_workers: 4,
            max_body_bytes: 1024 * 1024,
            default_db_name: "default".to_string(),
            display_mode: DisplayMode::Raw,
        }
    }
}

fn parse_flag(v: &str) -> Option<bool> {
    match v.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}

impl BrowserConfig {
    /// Defaults overlaid with BV_* environment variables. Unparsable values are ignored.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Ok(v) = std::env::var("BV_OPEN_TIMEOUT_MS") {
            if let Ok(n) = v.trim().parse::<u64>() {
                cfg.open_timeout_ms = n;
            }
        }

        if let Ok(v) = std::env::var("BV_CREATE_IF_MISSING") {
            if let Some(on) = parse_flag(&v) {
                cfg.create_if_missing = on;
            }
        }

        if let Ok(v) = std::env::var("BV_HTTP_ADDR") {
            let s = v.trim();
            if !s.is_empty() {
                cfg.http_addr = s.to_string();
            }
        }

        if let Ok(v) = std::env::var("BV_HTTP_WORKERS") {
            if let Ok(n) = v.trim().parse::<usize>() {
                cfg.http_workers = n.max(1);
            }
        }

        if let Ok(v) = std::env::var("BV_HTTP_MAX_BODY") {
            if let Ok(n) = v.trim().parse::<usize>() {
                cfg.max_body_bytes = n;
            }
        }

        if let Ok(v) = std::env::var("BV_DEFAULT_DB") {
            let s = v.trim();
            if !s.is_empty() {
                cfg.default_db_name = s.to_string();
            }
        }

        if let Ok(v) = std::env::var("BV_DISPLAY_MODE") {
            if let Ok(m) = v.parse::<DisplayMode>() {
                cfg.display_mode = m;
            }
        }

        cfg
    }

    pub fn open_timeout(&self) -> Duration {
        Duration::from_millis(self.open_timeout_ms)
    }

    pub fn with_open_timeout_ms(mut self, ms: u64) -> Self {
        self.open_timeout_ms = ms;
        self
    }

    pub fn with_create_if_missing(mut self, on: bool) -> Self {
        self.create_if_missing = on;
        self
    }

    pub fn with_http_addr<S: Into<String>>(mut self, addr: S) -> Self {
        self.http_addr = addr.into();
        self
    }

    pub fn with_http_workers(mut self, n: usize) -> Self {
        self.http_workers = n.max(1);
        self
    }

    pub fn with_max_body_bytes(mut self, n: usize) -> Self {
        self.max_body_bytes = n;
        self
    }

    pub fn with_default_db_name<S: Into<String>>(mut self, name: S) -> Self {
        self.default_db_name = name.into();
        self
    }

    pub fn with_display_mode(mut self, mode: DisplayMode) -> Self {
        self.display_mode = mode;
        self
    }
}

impl fmt::Display for BrowserConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "BrowserConfig {{ \
             open_timeout_ms: {}, \
             create_if_missing: {}, \
             http_addr: {}, \
             http_workers: {}, \
             max_body_bytes: {}, \
             default_db_name: {}, \
             display_mode: {} \
             }}",
            self.open_timeout_ms,
            self.create_if_missing,
            self.http_addr,
            self.http_workers,
            self.max_body_bytes,
            self.default_db_name,
            self.display_mode,
        )
    }
}
