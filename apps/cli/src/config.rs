use std::time::Duration;

use gapscan_core::constants::DEFAULT_HISTORY_DAYS;

const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;
const DEFAULT_LOG_FILTER: &str = "warn";

/// Process settings read from the environment (and `.env`, when present).
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub log_format: LogFormat,
    pub log_filter: String,
    /// `None` disables the per-call timeout
    pub request_timeout: Option<Duration>,
    pub history_days: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source. Unparseable values fall back
    /// to their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let log_format = match lookup("GAPSCAN_LOG_FORMAT") {
            Some(format) if format.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Text,
        };
        let log_filter = lookup("RUST_LOG")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());
        let timeout_ms: u64 = lookup("GAPSCAN_REQUEST_TIMEOUT_MS")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_MS);
        let history_days: u32 = lookup("GAPSCAN_HISTORY_DAYS")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(DEFAULT_HISTORY_DAYS);

        Self {
            log_format,
            log_filter,
            request_timeout: (timeout_ms > 0).then(|| Duration::from_millis(timeout_ms)),
            history_days: history_days.max(DEFAULT_HISTORY_DAYS),
        }
    }
}
