use thiserror::Error;

use formdoc_model::BlockPath;

/// Errors raised by editing operations that the author must see.
///
/// Edits addressed at a path that does not resolve are not errors: they
/// leave the tree unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("a form must have at least one section")]
    LastRootSection,
    #[error("section {parent} is at level {level}; sections nest at most {max} levels deep")]
    MaxDepth {
        parent: BlockPath,
        level: u8,
        max: u8,
    },
    #[error("block {path} is not a section")]
    NotASection { path: BlockPath },
}

/// Violations of the block tree invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructureError {
    #[error("form has no root section")]
    NoRootSection,
    #[error("field '{id}' sits at the root; fields must belong to a section")]
    FieldAtRoot { id: String },
    #[error("block '{id}' at {path} has level {actual}, expected {expected}")]
    LevelMismatch {
        id: String,
        path: BlockPath,
        expected: u8,
        actual: u8,
    },
    #[error("block '{id}' at {path} is nested deeper than level {max}")]
    TooDeep { id: String, path: BlockPath, max: u8 },
    #[error("block at {path} has an empty identifier")]
    MissingId { path: BlockPath },
    #[error("identifier '{id}' is used more than once")]
    DuplicateId { id: String },
}
