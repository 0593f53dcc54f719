//! Error types for shiptrack.
//!
//! This module defines all error types used throughout the shiptrack crate.
//! Every store operation returns one of these so the presentation layer can
//! match on the kind and render a notification instead of crashing.

use std::path::PathBuf;
use thiserror::Error;

use crate::shipment::TrackingId;

/// The main error type for shiptrack operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Storage Errors ===
    /// The data file exists but could not be read or parsed.
    #[error("failed to read shipment data from {path}: {message}")]
    StorageRead {
        /// Path to the data file.
        path: PathBuf,
        /// Description of what went wrong.
        message: String,
    },

    /// The data file could not be written.
    #[error("failed to write shipment data to {path}: {source}")]
    StorageWrite {
        /// Path to the data file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Record Errors ===
    /// Insert input was rejected before touching the store.
    #[error("invalid shipment: {0}")]
    Validation(#[from] ValidationError),

    /// A record with this tracking identifier already exists.
    #[error("tracking ID {0} already exists")]
    DuplicateKey(TrackingId),

    /// No record with this tracking identifier exists.
    #[error("tracking ID {0} not found")]
    NotFound(TrackingId),

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Reasons a shipment form is rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field was blank.
    #[error("missing field: {0}")]
    MissingField(&'static str),

    /// Cost was not a non-negative number.
    #[error("invalid cost: {0:?}")]
    InvalidCost(String),
}

/// A specialized Result type for shiptrack operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a storage read error.
    #[must_use]
    pub fn storage_read(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::StorageRead {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a storage write error.
    #[must_use]
    pub fn storage_write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::StorageWrite {
            path: path.into(),
            source,
        }
    }

    /// Check if this error means the tracking ID is unknown.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Check if this error means the tracking ID is taken.
    #[must_use]
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::DuplicateKey(_))
    }

    /// Check if this error came from input validation.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this error came from reading or writing the data file.
    #[must_use]
    pub fn is_storage(&self) -> bool {
        matches!(self, Self::StorageRead { .. } | Self::StorageWrite { .. })
    }

    /// Process exit code for this error when surfaced by the CLI.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NotFound(_) => 2,
            Self::Validation(_) | Self::DuplicateKey(_) => 3,
            Self::StorageRead { .. } | Self::StorageWrite { .. } => 4,
            Self::ConfigLoad(_) | Self::ConfigValidation { .. } => 5,
            Self::Json(_) => 1,
        }
    }
}
