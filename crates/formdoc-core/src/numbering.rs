//! Section and field numbering.
//!
//! Numbers are the dotted positional paths of blocks in the current tree.
//! They are derived on demand and never stored, so reordering sections
//! renumbers everything below them.

use formdoc_model::{Block, BlockPath, Field};

/// All blocks in document order (pre-order), each with its path.
pub fn numbered_blocks(blocks: &[Block]) -> Vec<(BlockPath, &Block)> {
    let mut out = Vec::new();
    collect(blocks, &BlockPath::root(), &mut out);
    out
}

fn collect<'a>(blocks: &'a [Block], parent: &BlockPath, out: &mut Vec<(BlockPath, &'a Block)>) {
    for (index, block) in blocks.iter().enumerate() {
        let path = parent.nth_child(index);
        out.push((path.clone(), block));
        collect(block.children(), &path, out);
    }
}

/// Current path of the block with identifier `id`.
pub fn compute_path(blocks: &[Block], id: &str) -> Option<BlockPath> {
    find_by_id(blocks, id, &BlockPath::root()).map(|(path, _)| path)
}

/// Dotted number of the block with identifier `id`, e.g. `"2.1.3"`.
pub fn path_label(blocks: &[Block], id: &str) -> Option<String> {
    compute_path(blocks, id).map(|path| path.to_string())
}

/// The field with identifier `id` and its current path.
pub fn find_field<'a>(blocks: &'a [Block], id: &str) -> Option<(BlockPath, &'a Field)> {
    let (path, block) = find_by_id(blocks, id, &BlockPath::root())?;
    block.as_field().map(|field| (path, field))
}

fn find_by_id<'a>(blocks: &'a [Block], id: &str, parent: &BlockPath) -> Option<(BlockPath, &'a Block)> {
    for (index, block) in blocks.iter().enumerate() {
        let path = parent.nth_child(index);
        if block.id() == id {
            return Some((path, block));
        }
        if let Some(found) = find_by_id(block.children(), id, &path) {
            return Some(found);
        }
    }
    None
}

/// `"<number> <title>"`, the label used for sections and fields alike.
pub fn numbered_title(path: &BlockPath, title: &str) -> String {
    if title.is_empty() {
        path.to_string()
    } else {
        format!("{path} {title}")
    }
}

/// One line per block, `"<number> <title>"`, in document order.
pub fn outline(blocks: &[Block]) -> String {
    numbered_blocks(blocks)
        .iter()
        .map(|(path, block)| numbered_title(path, block.title()))
        .collect::<Vec<_>>()
        .join("\n")
}
