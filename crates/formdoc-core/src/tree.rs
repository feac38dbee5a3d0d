//! Path-addressed operations on the block tree.
//!
//! Every operation takes the current root sequence and returns a new one;
//! the input is never modified. Paths are positional, so a path computed
//! against an older tree may address a different block after an edit.
//! Callers re-derive paths from the latest tree before issuing the next
//! edit.
//!
//! A path that does not resolve makes the operation a no-op: the returned
//! tree equals the input. Only [`remove`] can fail, when asked to delete
//! the last root section.

use tracing::debug;

use formdoc_model::{Block, BlockPath};

use crate::error::TreeError;

/// Where [`insert`] places a new block among its siblings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Position {
    /// After the last sibling.
    #[default]
    Append,
    /// At a 1-based sibling index; indices past the end append.
    At(usize),
}

/// Direction of a sibling swap for [`move_block`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    pub fn offset(self) -> isize {
        match self {
            Direction::Up => -1,
            Direction::Down => 1,
        }
    }
}

/// Returns the block at `path`, or `None` if any index is out of range.
pub fn resolve<'a>(blocks: &'a [Block], path: &BlockPath) -> Option<&'a Block> {
    resolve_indices(blocks, path.indices())
}

fn resolve_indices<'a>(blocks: &'a [Block], indices: &[usize]) -> Option<&'a Block> {
    let (first, rest) = indices.split_first()?;
    let block = blocks.get(first.checked_sub(1)?)?;
    if rest.is_empty() {
        Some(block)
    } else {
        resolve_indices(block.children(), rest)
    }
}

/// Returns the sibling sequence that contains the block at `path`.
pub fn siblings<'a>(blocks: &'a [Block], path: &BlockPath) -> Option<&'a [Block]> {
    let parent = path.parent()?;
    if parent.is_root() {
        return Some(blocks);
    }
    match resolve(blocks, &parent)? {
        Block::Section(section) => Some(&section.children),
        Block::Field(_) => None,
    }
}

/// Children vector of the section at `parent`; the root sequence for the
/// empty path. `None` when the path does not resolve or names a field.
fn children_mut<'a>(blocks: &'a mut Vec<Block>, parent: &[usize]) -> Option<&'a mut Vec<Block>> {
    let Some((first, rest)) = parent.split_first() else {
        return Some(blocks);
    };
    match blocks.get_mut(first.checked_sub(1)?)? {
        Block::Section(section) => children_mut(&mut section.children, rest),
        Block::Field(_) => None,
    }
}

/// Inserts `block` into the children of the section at `parent` (the root
/// sequence when `parent` is empty).
pub fn insert(blocks: &[Block], parent: &BlockPath, block: Block, position: Position) -> Vec<Block> {
    let mut tree = blocks.to_vec();
    match children_mut(&mut tree, parent.indices()) {
        Some(children) => match position {
            Position::Append => children.push(block),
            Position::At(index) => {
                let at = index.saturating_sub(1).min(children.len());
                children.insert(at, block);
            }
        },
        None => debug!(path = %parent, "insert target does not resolve to a section; tree unchanged"),
    }
    tree
}

/// Replaces the block at `path` with `block`.
///
/// Children are taken from `block` as given: callers replacing a section's
/// title or description carry the existing children over themselves.
pub fn update(blocks: &[Block], path: &BlockPath, block: Block) -> Vec<Block> {
    let mut tree = blocks.to_vec();
    match slot_mut(&mut tree, path) {
        Some(slot) => *slot = block,
        None => debug!(path = %path, "update target does not resolve; tree unchanged"),
    }
    tree
}

fn slot_mut<'a>(tree: &'a mut Vec<Block>, path: &BlockPath) -> Option<&'a mut Block> {
    let parent = path.parent()?;
    let index = path.last()?.checked_sub(1)?;
    children_mut(tree, parent.indices())?.get_mut(index)
}

/// Removes the block at `path` together with its subtree.
///
/// # Errors
///
/// Returns [`TreeError::LastRootSection`] when `path` names the only root
/// section; the form must keep at least one.
pub fn remove(blocks: &[Block], path: &BlockPath) -> Result<Vec<Block>, TreeError> {
    let Some(target) = resolve(blocks, path) else {
        debug!(path = %path, "remove target does not resolve; tree unchanged");
        return Ok(blocks.to_vec());
    };
    if path.depth() == 1 && target.is_section() {
        let root_sections = blocks.iter().filter(|block| block.is_section()).count();
        if root_sections <= 1 {
            return Err(TreeError::LastRootSection);
        }
    }

    let mut tree = blocks.to_vec();
    let parent = path.parent().unwrap_or_default();
    if let (Some(children), Some(index)) = (
        children_mut(&mut tree, parent.indices()),
        path.last().and_then(|last| last.checked_sub(1)),
    ) {
        children.remove(index);
    }
    Ok(tree)
}

/// Swaps the block at `path` with its neighbour in `direction`.
///
/// Moving the first sibling up or the last sibling down leaves the tree
/// unchanged.
pub fn move_block(blocks: &[Block], path: &BlockPath, direction: Direction) -> Vec<Block> {
    let mut tree = blocks.to_vec();
    let (Some(parent), Some(last)) = (path.parent(), path.last()) else {
        return tree;
    };
    let Some(children) = children_mut(&mut tree, parent.indices()) else {
        debug!(path = %path, "move target does not resolve; tree unchanged");
        return tree;
    };
    let Some(index) = last.checked_sub(1) else {
        return tree;
    };
    let Some(target) = index.checked_add_signed(direction.offset()) else {
        return tree;
    };
    if index >= children.len() || target >= children.len() {
        return tree;
    }
    children.swap(index, target);
    tree
}

#[cfg(test)]
mod tests {
    use super::*;
    use formdoc_model::{Field, FieldKind, Section};

    fn path(value: &str) -> BlockPath {
        value.parse().unwrap()
    }

    fn field(id: &str, level: u8) -> Block {
        Field::new(id, id.to_uppercase(), FieldKind::ShortText, level).into()
    }

    fn sample_tree() -> Vec<Block> {
        vec![
            Section::new("a", "Section A", 1)
                .with_children(vec![
                    field("x", 2),
                    Section::new("a1", "Sub A1", 2)
                        .with_children(vec![field("z", 3)])
                        .into(),
                ])
                .into(),
            Section::new("b", "Section B", 1)
                .with_children(vec![field("y", 2)])
                .into(),
        ]
    }

    #[test]
    fn resolve_walks_levels() {
        let tree = sample_tree();
        assert_eq!(resolve(&tree, &path("1.2.1")).map(Block::id), Some("z"));
        assert_eq!(resolve(&tree, &path("2.1")).map(Block::id), Some("y"));
        assert!(resolve(&tree, &path("3")).is_none());
        assert!(resolve(&tree, &path("1.1.1")).is_none());
        assert!(resolve(&tree, &BlockPath::root()).is_none());
    }

    #[test]
    fn insert_appends_at_root_and_into_sections() {
        let tree = sample_tree();
        let added = insert(
            &tree,
            &BlockPath::root(),
            Section::new("c", "Section C", 1).into(),
            Position::Append,
        );
        assert_eq!(added.len(), 3);
        assert_eq!(added[2].id(), "c");

        let added = insert(&tree, &path("1.2"), field("w", 3), Position::Append);
        assert_eq!(resolve(&added, &path("1.2.2")).map(Block::id), Some("w"));

        let added = insert(&tree, &path("2"), field("v", 2), Position::At(1));
        assert_eq!(resolve(&added, &path("2.1")).map(Block::id), Some("v"));
        assert_eq!(resolve(&added, &path("2.2")).map(Block::id), Some("y"));
    }

    #[test]
    fn insert_into_missing_or_field_parent_is_noop() {
        let tree = sample_tree();
        assert_eq!(insert(&tree, &path("9"), field("w", 2), Position::Append), tree);
        assert_eq!(insert(&tree, &path("1.1"), field("w", 3), Position::Append), tree);
    }

    #[test]
    fn update_replaces_exactly() {
        let tree = sample_tree();
        let replacement = field("q", 3);
        let updated = update(&tree, &path("1.2.1"), replacement.clone());
        assert_eq!(resolve(&updated, &path("1.2.1")), Some(&replacement));
        assert_eq!(update(&tree, &path("4.1"), replacement), tree);
    }

    #[test]
    fn update_drops_children_not_carried_over() {
        let tree = sample_tree();
        let updated = update(&tree, &path("1.2"), Section::new("a1", "Renamed", 2).into());
        assert!(resolve(&updated, &path("1.2")).unwrap().children().is_empty());
    }

    #[test]
    fn remove_deletes_subtree() {
        let tree = sample_tree();
        let removed = remove(&tree, &path("1.2")).unwrap();
        assert_eq!(resolve(&removed, &path("1")).unwrap().children().len(), 1);
        assert!(resolve(&removed, &path("1.2")).is_none());
    }

    #[test]
    fn remove_refuses_last_root_section() {
        let tree = vec![Section::new("a", "Only", 1).into()];
        assert_eq!(remove(&tree, &path("1")), Err(TreeError::LastRootSection));

        let removed = remove(&sample_tree(), &path("2")).unwrap();
        assert_eq!(removed.len(), 1);
        assert_eq!(remove(&removed, &path("1")), Err(TreeError::LastRootSection));
    }

    #[test]
    fn remove_missing_path_is_noop() {
        let tree = sample_tree();
        assert_eq!(remove(&tree, &path("1.7")).unwrap(), tree);
    }

    #[test]
    fn move_swaps_within_parent() {
        let tree = sample_tree();
        let moved = move_block(&tree, &path("2"), Direction::Up);
        assert_eq!(moved[0].id(), "b");
        assert_eq!(moved[1].id(), "a");

        let moved = move_block(&tree, &path("1.1"), Direction::Down);
        assert_eq!(resolve(&moved, &path("1.1")).map(Block::id), Some("a1"));
        assert_eq!(resolve(&moved, &path("1.2")).map(Block::id), Some("x"));
    }

    #[test]
    fn move_at_boundary_is_noop() {
        let tree = sample_tree();
        assert_eq!(move_block(&tree, &path("1"), Direction::Up), tree);
        assert_eq!(move_block(&tree, &path("2"), Direction::Down), tree);
        assert_eq!(move_block(&tree, &path("2.1"), Direction::Down), tree);
        assert_eq!(move_block(&tree, &path("5"), Direction::Up), tree);
    }

    #[test]
    fn move_of_root_or_built_paths_never_underflows() {
        let tree = sample_tree();
        assert_eq!(move_block(&tree, &BlockPath::root(), Direction::Up), tree);
        let first = BlockPath::root().nth_child(0);
        assert_eq!(move_block(&tree, &first, Direction::Up), tree);
        assert!(BlockPath::root().child(0).is_err());
        let nested = first.child(1).unwrap();
        assert_eq!(move_block(&tree, &nested, Direction::Up), tree);
    }

    #[test]
    fn siblings_of_nested_block() {
        let tree = sample_tree();
        let group = siblings(&tree, &path("1.2")).unwrap();
        assert_eq!(group.len(), 2);
        assert_eq!(siblings(&tree, &path("2")).unwrap().len(), 2);
    }
}
