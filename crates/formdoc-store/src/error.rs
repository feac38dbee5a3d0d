//! Storage error types.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to {operation} {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize {what}")]
    Serialize {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("form '{id}' not found")]
    FormNotFound { id: String },

    #[error("invalid identifier '{id}': use letters, digits, '-' and '_'")]
    InvalidId { id: String },

    #[error("failed to replace {target_path}")]
    AtomicWriteFailed {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StoreError {
    /// A hint for resolving the error, when there is an obvious one.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::FormNotFound { .. } => Some("run `formdoc list` to see stored forms"),
            Self::InvalidId { .. } => Some("identifiers double as file names; avoid spaces and '/'"),
            Self::Parse { .. } => Some("the file was edited by hand or written by a newer version"),
            Self::Io { .. } | Self::AtomicWriteFailed { .. } => {
                Some("check the store directory exists and is writable")
            }
            Self::Serialize { .. } => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
