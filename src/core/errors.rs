/*!
 * Error Types
 * Centralized error handling with thiserror, miette, and serde support
 *
 * Scheduler lookups never fail: an unknown PID is reported as `None`/`false`
 * rather than an error. The types here cover the fallible edges of the engine:
 * configuration, asset loading and the frame driver.
 */

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors with serialization support
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?}")]
    #[diagnostic(
        code(config::invalid_value),
        help("Environment overrides must be positive integers.")
    )]
    InvalidValue { key: String, value: String },

    #[error("{0} must be greater than zero")]
    #[diagnostic(
        code(config::zero_rate),
        help("Tick rate, frame rate and catch-up cap all need a non-zero value.")
    )]
    MustBePositive(String),

    #[error("{key} is {value}, above the maximum of {max}")]
    #[diagnostic(
        code(config::rate_too_high),
        help("Rates above the maximum would give a tick or frame period too short to schedule.")
    )]
    TooHigh { key: String, value: u32, max: u32 },

    #[error("Malformed configuration document: {0}")]
    #[diagnostic(
        code(config::parse_failed),
        help("Check the JSON document against EngineConfig's field names.")
    )]
    Parse(String),

    #[error("Cannot open log file {path}: {reason}")]
    #[diagnostic(
        code(config::log_file),
        help("Check that the directory exists and is writable.")
    )]
    LogFile { path: String, reason: String },
}

/// Asset loading errors with serialization support
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum AssetError {
    #[error("No loader registered for asset type {0}")]
    #[diagnostic(
        code(asset::no_loader),
        help("Register a loader with AssetManager::register before loading this type.")
    )]
    NoLoader(String),

    #[error("Asset {key} not found")]
    #[diagnostic(code(asset::not_found), help("Check the asset root directory."))]
    NotFound { key: String },

    #[error("Failed to read asset {key}: {reason}")]
    #[diagnostic(code(asset::io_error))]
    Io { key: String, reason: String },

    #[error("Malformed asset {key}: {reason}")]
    #[diagnostic(
        code(asset::malformed),
        help("Glyph sheets need at least one row and every row the same width.")
    )]
    Malformed { key: String, reason: String },
}

/// Unified engine error type with miette diagnostics
#[derive(Error, Debug, Diagnostic)]
pub enum EngineError {
    #[error("Configuration error: {0}")]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error("Asset error: {0}")]
    #[diagnostic(transparent)]
    Asset(#[from] AssetError),

    #[error("Engine already shut down")]
    #[diagnostic(
        code(engine::shut_down),
        help("Create a new Engine; a shut down engine cannot be restarted.")
    )]
    ShutDown,
}

pub type EngineResult<T> = Result<T, EngineError>;
