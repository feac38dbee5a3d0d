//! Authoring operations built on the tree primitives.
//!
//! These add the rules an editor enforces on top of [`crate::tree`]: new
//! blocks get a fresh identifier and the level of their parent plus one,
//! sections nest at most [`MAX_LEVEL`] deep, and fields only live inside
//! sections.

use tracing::debug;
use uuid::Uuid;

use formdoc_model::{Block, BlockPath, Field, FieldKind, MAX_LEVEL, Section};

use crate::error::TreeError;
use crate::tree::{self, Direction, Position};

/// Title given to sections created without one.
pub const DEFAULT_SECTION_TITLE: &str = "New Section";

/// Title given to fields created without one.
pub const DEFAULT_FIELD_TITLE: &str = "New Field";

/// Generate an identifier for a new block.
pub fn new_block_id() -> String {
    Uuid::new_v4().to_string()
}

/// Content for a section about to be added.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionDraft {
    pub title: String,
    pub description: Option<String>,
}

impl Default for SectionDraft {
    fn default() -> Self {
        Self {
            title: DEFAULT_SECTION_TITLE.to_string(),
            description: None,
        }
    }
}

/// Content for a field about to be added.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDraft {
    pub title: String,
    pub kind: FieldKind,
    pub required: bool,
    pub description: Option<String>,
    pub choices: Vec<String>,
}

impl Default for FieldDraft {
    fn default() -> Self {
        Self {
            title: DEFAULT_FIELD_TITLE.to_string(),
            kind: FieldKind::ShortText,
            required: false,
            description: None,
            choices: Vec::new(),
        }
    }
}

/// Level a new child of `parent` gets, checking the parent is a section.
///
/// `Ok(None)` when `parent` does not resolve.
fn child_level(blocks: &[Block], parent: &BlockPath) -> Result<Option<u8>, TreeError> {
    if parent.is_root() {
        return Ok(Some(1));
    }
    match tree::resolve(blocks, parent) {
        Some(Block::Section(section)) => Ok(Some(section.level + 1)),
        Some(Block::Field(_)) => Err(TreeError::NotASection {
            path: parent.clone(),
        }),
        None => Ok(None),
    }
}

/// Appends a new section to `parent` (the root when empty).
///
/// # Errors
///
/// [`TreeError::MaxDepth`] when the parent is already at the deepest level,
/// [`TreeError::NotASection`] when `parent` names a field.
pub fn add_section(
    blocks: &[Block],
    parent: &BlockPath,
    draft: SectionDraft,
) -> Result<Vec<Block>, TreeError> {
    let Some(level) = child_level(blocks, parent)? else {
        debug!(path = %parent, "add section: parent does not resolve; tree unchanged");
        return Ok(blocks.to_vec());
    };
    if level > MAX_LEVEL {
        return Err(TreeError::MaxDepth {
            parent: parent.clone(),
            level: level - 1,
            max: MAX_LEVEL,
        });
    }
    let mut section = Section::new(new_block_id(), draft.title, level);
    section.description = draft.description;
    debug!(path = %parent, id = %section.id, level, "add section");
    Ok(tree::insert(blocks, parent, section.into(), Position::Append))
}

/// Appends a new field to the section at `parent`.
///
/// # Errors
///
/// [`TreeError::NotASection`] when `parent` is the root or names a field.
pub fn add_field(blocks: &[Block], parent: &BlockPath, draft: FieldDraft) -> Result<Vec<Block>, TreeError> {
    if parent.is_root() {
        return Err(TreeError::NotASection {
            path: parent.clone(),
        });
    }
    let Some(level) = child_level(blocks, parent)? else {
        debug!(path = %parent, "add field: parent does not resolve; tree unchanged");
        return Ok(blocks.to_vec());
    };
    let mut field = Field::new(new_block_id(), draft.title, draft.kind, level);
    field.required = draft.required;
    field.description = draft.description;
    field.choices = draft.choices;
    debug!(path = %parent, id = %field.id, level, "add field");
    Ok(tree::insert(blocks, parent, field.into(), Position::Append))
}

/// Applies `change` to a copy of the block at `path` and stores it back.
///
/// The copy carries the block's children, so non-structural edits (title,
/// description, required flag, choices) keep the subtree intact.
pub fn edit_block<F>(blocks: &[Block], path: &BlockPath, change: F) -> Vec<Block>
where
    F: FnOnce(&mut Block),
{
    let Some(current) = tree::resolve(blocks, path) else {
        debug!(path = %path, "edit: block does not resolve; tree unchanged");
        return blocks.to_vec();
    };
    let mut edited = current.clone();
    let id = edited.id().to_string();
    let level = edited.level();
    change(&mut edited);
    // Identity and level are structural; edits cannot change them.
    match &mut edited {
        Block::Section(section) => {
            section.id = id;
            section.level = level;
        }
        Block::Field(field) => {
            field.id = id;
            field.level = level;
        }
    }
    tree::update(blocks, path, edited)
}

/// Deletes the block at `path` and everything below it.
///
/// # Errors
///
/// [`TreeError::LastRootSection`] when `path` names the only root section.
pub fn delete(blocks: &[Block], path: &BlockPath) -> Result<Vec<Block>, TreeError> {
    tree::remove(blocks, path)
}

pub fn move_up(blocks: &[Block], path: &BlockPath) -> Vec<Block> {
    tree::move_block(blocks, path, Direction::Up)
}

pub fn move_down(blocks: &[Block], path: &BlockPath) -> Vec<Block> {
    tree::move_block(blocks, path, Direction::Down)
}
