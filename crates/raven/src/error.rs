//! # Error Types
//!
//! Terrain generation, streaming and rendering are total; only the outer
//! surfaces (configuration files, command-line arguments) can fail.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or validating configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Io {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration is not valid TOML or has the wrong shape.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// The configuration could not be serialized.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// A field holds a value outside its allowed range.
    #[error("invalid value for `{field}`: {reason}")]
    Invalid {
        /// Dotted path of the offending field.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },
}

/// Top-level error for the game crate.
#[derive(Error, Debug)]
pub enum RavenError {
    /// Configuration problem.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Bad command-line argument.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result type for game operations.
pub type RavenResult<T> = Result<T, RavenError>;
