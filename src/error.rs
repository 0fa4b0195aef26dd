//! Unified error type for the profit engine.
//!
//! The calculators themselves never fail: bad numeric input is coerced
//! and division hazards surface as sentinels.  The only fallible paths
//! are loading a rate table and reading runtime configuration.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid rate for {key}: {value} (expected a fraction in [0, 1))")]
    InvalidRate { key: String, value: f64 },

    #[error("invalid amount for {key}: {value} (expected a finite, non-negative number)")]
    InvalidAmount { key: String, value: f64 },

    #[error("rate table is missing a `default` entry")]
    MissingDefault,

    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
