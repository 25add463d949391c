//! Server configuration from the environment.

use crate::session::SessionLimits;
use std::net::{AddrParseError, SocketAddr};
use std::num::ParseIntError;
use std::time::Duration;
use thiserror::Error;

/// Environment variable holding the listen address.
pub const ADDR_VAR: &str = "DOANDONG_ADDR";
/// Seconds a session may sit unused before it is evicted.
pub const IDLE_SECS_VAR: &str = "DOANDONG_SESSION_IDLE_SECS";
/// Upper bound on live sessions.
pub const MAX_SESSIONS_VAR: &str = "DOANDONG_MAX_SESSIONS";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid {var} {value:?}: {source}")]
    InvalidAddr {
        var: &'static str,
        value: String,
        source: AddrParseError,
    },
    #[error("Invalid {var} {value:?}: {source}")]
    InvalidNumber {
        var: &'static str,
        value: String,
        source: ParseIntError,
    },
    #[error("{var} must be greater than zero")]
    Zero { var: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    pub sessions: SessionLimits,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([0, 0, 0, 0], 3030)),
            sessions: SessionLimits::default(),
        }
    }
}

impl ServerConfig {
    /// Read configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(value) = non_blank(lookup(ADDR_VAR)) {
            config.addr = value.parse().map_err(|source| ConfigError::InvalidAddr {
                var: ADDR_VAR,
                value,
                source,
            })?;
        }
        if let Some(secs) = positive(IDLE_SECS_VAR, lookup(IDLE_SECS_VAR))? {
            config.sessions.idle_timeout = Duration::from_secs(secs);
        }
        if let Some(max) = positive(MAX_SESSIONS_VAR, lookup(MAX_SESSIONS_VAR))? {
            config.sessions.max_sessions = usize::try_from(max).unwrap_or(usize::MAX);
        }
        Ok(config)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn positive(var: &'static str, value: Option<String>) -> Result<Option<u64>, ConfigError> {
    let Some(value) = non_blank(value) else {
        return Ok(None);
    };
    let parsed: u64 = value
        .parse()
        .map_err(|source| ConfigError::InvalidNumber { var, value, source })?;
    if parsed == 0 {
        return Err(ConfigError::Zero { var });
    }
    Ok(Some(parsed))
}
