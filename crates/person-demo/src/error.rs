//! Error types for the demo caller.

use person_ffi::PersonStatus;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for demo operations.
pub type DemoResult<T> = Result<T, DemoError>;

/// Errors that stop the demo sequence.
#[derive(Debug, Error)]
pub enum DemoError {
    /// Config file could not be read.
    #[error("Failed to read config file {path}: {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Config file is not valid TOML for [`DemoConfig`](crate::DemoConfig).
    #[error("Failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Config could not be written back.
    #[error("Failed to serialize config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    /// A configured name cannot be passed to C.
    #[error("Configured {field} contains a NUL byte")]
    InteriorNul { field: &'static str },

    /// The provider returned a failure status.
    #[error("{step} failed: {status}")]
    StepFailed {
        step: &'static str,
        status: PersonStatus,
    },

    /// The provider returned a null or non UTF-8 string.
    #[error("{step} returned an unreadable string")]
    UnreadableString { step: &'static str },
}

impl DemoError {
    /// Creates a step failure error.
    pub fn step_failed(step: &'static str, status: PersonStatus) -> Self {
        Self::StepFailed { step, status }
    }

    /// Returns the provider status if the error came from a provider call.
    pub fn status(&self) -> Option<PersonStatus> {
        match self {
            DemoError::StepFailed { status, .. } => Some(*status),
            _ => None,
        }
    }
}
