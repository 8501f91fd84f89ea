//! Canvas configuration from environment variables.

use crate::domain::value_objects::Address;
use shared_bus::DEFAULT_CHANNEL_CAPACITY;
use std::env;
use std::str::FromStr;
use thiserror::Error;
use tracing::warn;

/// Default per-transaction log line budget.
pub const DEFAULT_MAX_LOG_LINES: usize = 64;

/// Invalid configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Program id may not be the zero address.
    #[error("program id must not be zero")]
    ZeroProgramId,

    /// Event bus needs room for at least one event.
    #[error("event capacity must be at least 1")]
    ZeroEventCapacity,

    /// Logs need room for at least the invoke line.
    #[error("max log lines must be at least 1")]
    ZeroLogLines,
}

/// Configuration for the canvas service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanvasConfig {
    /// Program id that owns and derives pixel records.
    pub program_id: Address,

    /// Event bus buffer; slower subscribers skip the oldest events.
    pub event_capacity: usize,

    /// Program log lines kept per transaction.
    pub max_log_lines: usize,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            program_id: crate::default_program_id(),
            event_capacity: DEFAULT_CHANNEL_CAPACITY,
            max_log_lines: DEFAULT_MAX_LOG_LINES,
        }
    }
}

impl CanvasConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `PC_PROGRAM_ID`: 64 hex chars, optional `0x` (default: hash of `pc-01-pixel-canvas`)
    /// - `PC_EVENT_CAPACITY`: Event bus buffer (default: 1000)
    /// - `PC_MAX_LOG_LINES`: Log lines per transaction (default: 64)
    ///
    /// Unparseable values are logged and replaced by the default.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env), reading from any key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            program_id: parse_or(&lookup, "PC_PROGRAM_ID", defaults.program_id),
            event_capacity: parse_or(&lookup, "PC_EVENT_CAPACITY", defaults.event_capacity),
            max_log_lines: parse_or(&lookup, "PC_MAX_LOG_LINES", defaults.max_log_lines),
        }
    }

    /// Check the configuration is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.program_id.is_zero() {
            return Err(ConfigError::ZeroProgramId);
        }
        if self.event_capacity == 0 {
            return Err(ConfigError::ZeroEventCapacity);
        }
        if self.max_log_lines == 0 {
            return Err(ConfigError::ZeroLogLines);
        }
        Ok(())
    }
}

fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> T
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|e| {
            warn!(key, value = %raw, error = %e, "Invalid config value, using default");
            default
        }),
    }
}
