//! Configuration module for the explorer backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use crate::errors::AppError;
use crate::fetch::{AccessStrategy, DEFAULT_ENDPOINT, DEFAULT_RELAYS};

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Catalog endpoint queried directly or through a relay
    pub endpoint: String,
    /// Access strategies in the order they are tried
    pub strategies: Vec<AccessStrategy>,
    /// Per-attempt request timeout
    pub request_timeout: Duration,
    /// Serve the sample catalog instead of fetching
    pub mock_mode: bool,
    /// Fetch once at startup
    pub initial_load: bool,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let endpoint = lookup("FTG_ENDPOINT")
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string())
            .trim()
            .to_string();
        if endpoint.is_empty() {
            return Err(AppError::Config("FTG_ENDPOINT must not be empty".to_string()));
        }

        let direct = parse_bool(&lookup, "FTG_DIRECT", true)?;
        let relays = match lookup("FTG_RELAYS") {
            Some(list) => parse_relays(&list),
            None => DEFAULT_RELAYS
                .iter()
                .map(|r| AccessStrategy::relay(*r))
                .collect(),
        };
        let strategies: Vec<AccessStrategy> = direct
            .then_some(AccessStrategy::Direct)
            .into_iter()
            .chain(relays)
            .collect();
        if strategies.is_empty() {
            return Err(AppError::Config(
                "No access strategy configured (FTG_DIRECT=false and FTG_RELAYS empty)"
                    .to_string(),
            ));
        }

        let request_timeout = match lookup("FTG_REQUEST_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .ok_or_else(|| {
                    AppError::Config(format!("Invalid FTG_REQUEST_TIMEOUT_SECS: {}", raw))
                })?,
            None => Duration::from_secs(10),
        };

        let mock_mode = parse_bool(&lookup, "FTG_MOCK_MODE", false)?;
        let initial_load = parse_bool(&lookup, "FTG_INITIAL_LOAD", true)?;

        let raw_addr = lookup("FTG_BIND_ADDR").unwrap_or_else(|| "127.0.0.1:8080".to_string());
        let bind_addr: SocketAddr = raw_addr
            .parse()
            .map_err(|_| AppError::Config(format!("Invalid FTG_BIND_ADDR format: {}", raw_addr)))?;

        let log_level = lookup("FTG_LOG_LEVEL").unwrap_or_else(|| "info".to_string());

        Ok(Self {
            endpoint,
            strategies,
            request_timeout,
            mock_mode,
            initial_load,
            bind_addr,
            log_level,
        })
    }
}

/// Parse a comma-separated relay list.
fn parse_relays(list: &str) -> Vec<AccessStrategy> {
    list.split(',').filter_map(AccessStrategy::parse_relay).collect()
}

fn parse_bool(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: bool,
) -> Result<bool, AppError> {
    let Some(raw) = lookup(key) else {
        return Ok(default);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(AppError::Config(format!("Invalid {}: {}", key, raw))),
    }
}
