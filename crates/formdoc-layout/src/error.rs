use thiserror::Error;

use formdoc_core::StructureError;

/// Errors that abort a layout.
///
/// Missing optional data (company settings, logo, answers) never does;
/// it degrades to blank chrome and a [`crate::LayoutWarning`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("form structure is invalid: {0}")]
    InvalidStructure(#[from] StructureError),
    #[error("page of {width_mm} x {height_mm} mm leaves no room for content with {margin_mm} mm margins")]
    PageTooSmall {
        width_mm: f64,
        height_mm: f64,
        margin_mm: f64,
    },
}

pub type Result<T> = std::result::Result<T, LayoutError>;
