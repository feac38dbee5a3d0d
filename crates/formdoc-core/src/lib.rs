//! Form block tree operations.
//!
//! - [`tree`]: pure, path-addressed insert/update/remove/move
//! - [`numbering`]: dotted section and field numbers derived from position
//! - [`editor`]: authoring rules (fresh ids, levels, depth limit)
//! - [`structure`]: tree invariant checks
//! - [`lifecycle`]: draft creation and publishing
//! - [`sample`]: placeholder answers for previews

pub mod editor;
pub mod error;
pub mod lifecycle;
pub mod numbering;
pub mod sample;
pub mod structure;
pub mod tree;

pub use editor::{
    FieldDraft, SectionDraft, add_field, add_section, delete, edit_block, move_down, move_up,
    new_block_id,
};
pub use error::{StructureError, TreeError};
pub use lifecycle::{new_draft, publish};
pub use numbering::{compute_path, find_field, numbered_blocks, numbered_title, outline, path_label};
pub use sample::{sample_answers, sample_value};
pub use structure::check_structure;
pub use tree::{Direction, Position, insert, move_block, remove, resolve, siblings, update};
