//! Error handling for the plugin.
//! Defines the error types raised during construction, attachment and the
//! emission phases.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by the plugin.
///
/// Configuration errors halt the current emission pass; deferred write
/// failures are recorded on the compilation instead and never abort a build.
#[derive(Error, Debug)]
pub enum Error {
    /// Represents errors that occur during file system operations
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Represents errors reported by the templating engine
    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    /// Represents invalid plugin configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// A deferred file write failed during the emit phase
    #[error("Failed to write asset '{path}': {source}")]
    WriteAsset {
        /// Destination the write was addressed to
        path: PathBuf,
        /// Underlying filesystem error
        source: io::Error,
    },
}

/// Convenience type alias for Results with [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;
