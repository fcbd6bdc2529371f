//! Error types for starfall.
//!
//! The simulation core is infallible; everything that can fail lives at the
//! edges: loading configuration from disk and validating the values an
//! operator typed in.

use thiserror::Error;

/// Errors produced while loading or validating a [`SimulationConfig`](crate::config::SimulationConfig).
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk.
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// The file was read but is not valid JSON for this schema.
    #[error("Failed to parse config: {0}")]
    Json(#[from] serde_json::Error),

    /// A field holds a value outside its accepted set.
    #[error("Invalid configuration value for `{field}`: '{value}'")]
    InvalidValue { field: &'static str, value: String },

    /// A `(min, max)` pair is reversed or out of range.
    #[error("Invalid range for `{field}`: {min}..={max}")]
    InvalidRange {
        field: &'static str,
        min: f64,
        max: f64,
    },

    /// Screen bounds must have a positive, finite area.
    #[error("Invalid bounds {width}x{height}: both sides must be positive")]
    InvalidBounds { width: f64, height: f64 },
}
