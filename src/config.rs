//! Runtime configuration for the server binary, read from environment
//! variables.
//!
//! | Variable            | Default          |
//! |---------------------|------------------|
//! | `PROFIT_BIND_ADDR`  | `127.0.0.1:3000` |
//! | `PROFIT_RATE_TABLE` | built-in table   |
//! | `PROFIT_LOG_LEVEL`  | `info`           |
//! | `PROFIT_LOG_JSON`   | `false`          |

use crate::error::{EngineError, Result};
use crate::rates::{load_rate_table, RateTable};
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    /// JSON rate table to load instead of the built-in schedule.
    pub rate_table: Option<PathBuf>,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub log_level: String,
    pub json_output: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            rate_table: None,
            logging: LoggingConfig {
                log_level: "info".into(),
                json_output: false,
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();
        if let Some(addr) = lookup("PROFIT_BIND_ADDR") {
            config.bind_addr = addr
                .parse()
                .map_err(|e| EngineError::Config(format!("PROFIT_BIND_ADDR={addr}: {e}")))?;
        }
        config.rate_table = lookup("PROFIT_RATE_TABLE")
            .filter(|p| !p.is_empty())
            .map(PathBuf::from);
        if let Some(level) = lookup("PROFIT_LOG_LEVEL") {
            config.logging.log_level = level;
        }
        if let Some(flag) = lookup("PROFIT_LOG_JSON") {
            config.logging.json_output = parse_flag(&flag)?;
        }
        Ok(config)
    }

    /// The configured rate table, or the built-in one when no file is set.
    pub fn load_rates(&self) -> Result<RateTable> {
        match &self.rate_table {
            Some(path) => load_rate_table(path),
            None => {
                info!("using built-in rate table");
                Ok(RateTable::default())
            }
        }
    }
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(EngineError::Config(format!("not a boolean: {other}"))),
    }
}
