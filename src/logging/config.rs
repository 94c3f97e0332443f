//! Logging settings, read from the environment alongside the app config.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

use crate::config::Environment;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "trace"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            other => Err(format!("unknown log level: {}", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LogConfig {
    pub environment: Environment,
    /// Level for this crate's own targets; RUST_LOG overrides the whole filter.
    pub level: LogLevel,
    pub dir: PathBuf,
}

impl LogConfig {
    pub fn for_environment(environment: Environment) -> Self {
        let level = if environment.is_production() {
            LogLevel::Info
        } else {
            LogLevel::Debug
        };
        Self {
            environment,
            level,
            dir: PathBuf::from("logs"),
        }
    }

    pub fn from_env(environment: Environment) -> Self {
        let mut config = Self::for_environment(environment);
        if let Some(level) = std::env::var("LOG_LEVEL").ok().and_then(|l| l.parse().ok()) {
            config.level = level;
        }
        if let Ok(dir) = std::env::var("LOG_DIR") {
            if !dir.is_empty() {
                config.dir = PathBuf::from(dir);
            }
        }
        config
    }

    /// Filter used when RUST_LOG is not set.
    pub fn default_filter(&self) -> String {
        format!(
            "portfolio_cms={},tower_http=debug,axum=debug",
            self.level
        )
    }
}
