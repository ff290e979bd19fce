//! Error handling for the clientgen library.
//!
//! This module defines the main error type `Error` used throughout the library,
//! along with a convenient `Result` type alias. It uses `thiserror` for easy
//! error handling and implements conversions from common error types.
//!
//! # Examples
//!
//! ```
//! use clientgen_core::error::{Error, Result};
//!
//! fn might_fail() -> Result<()> {
//!     Err(Error::MissingRequiredInput)
//! }
//!
//! assert!(might_fail().is_err());
//! ```

use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

/// Result type for clientgen operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for clientgen operations
#[derive(Debug, Error)]
pub enum Error {
    /// A `${NAME}` placeholder referenced a variable that is unset or empty
    #[error("Environment variable {name} is not defined")]
    EnvVarMissing { name: String },

    /// `--config` was combined with `--input` or `--output`
    #[error("--config cannot be used together with --input or --output")]
    ConflictingOptions,

    /// Neither a config file nor inline options were given
    #[error("Either --config or both --input and --output must be provided")]
    MissingRequiredInput,

    /// The config file does not exist
    #[error("Config file not found: {}", .0.display())]
    ConfigFileNotFound(PathBuf),

    /// A client is missing its input or output location
    #[error("Client '{client}' requires both an input and an output")]
    MissingInputOrOutput { client: String },

    /// The external generator exited unsuccessfully
    #[error("Generator command '{command}' failed with {status}")]
    GeneratorFailed { command: String, status: ExitStatus },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON encoding error
    #[error("JSON encoding error: {0}")]
    Json(#[from] serde_json::Error),

    /// Template engine error
    #[error("Template engine error: {0}")]
    Tera(#[from] tera::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new missing input/output error for the named client
    pub fn missing_input_or_output<S: Into<String>>(client: S) -> Self {
        Self::MissingInputOrOutput {
            client: client.into(),
        }
    }
}
