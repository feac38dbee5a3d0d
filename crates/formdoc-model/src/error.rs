use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("invalid revision '{value}': expected MAJOR.MINOR")]
    InvalidRevision { value: String },
    #[error("invalid block path '{value}': {message}")]
    InvalidPath { value: String, message: String },
    #[error("unknown role: {value}")]
    UnknownRole { value: String },
    #[error("unknown field kind: {value}")]
    UnknownFieldKind { value: String },
}

pub type Result<T> = std::result::Result<T, ModelError>;
