use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("xml error: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("document has no pages")]
    NoPages,
    #[error("failed to write {path}: {source}")]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("unknown output format '{value}' (expected pdf or svg)")]
    UnknownFormat { value: String },
}

pub type Result<T> = std::result::Result<T, RenderError>;
