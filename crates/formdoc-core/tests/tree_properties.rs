//! Algebraic properties of the path-addressed tree operations.

use std::cell::Cell;

use proptest::prelude::*;

use formdoc_core::tree::{self, Direction, Position};
use formdoc_core::{TreeError, check_structure, numbered_blocks};
use formdoc_model::{Block, BlockPath, Field, FieldKind, Section};

/// Tree shape without identifiers; ids are assigned when the shape is built.
#[derive(Debug, Clone)]
enum Shape {
    Field,
    Section(Vec<Shape>),
}

fn shape(depth: u32) -> BoxedStrategy<Shape> {
    let leaf = Just(Shape::Field).boxed();
    if depth == 0 {
        return leaf;
    }
    prop_oneof![
        2 => leaf,
        1 => prop::collection::vec(shape(depth - 1), 0..4).prop_map(Shape::Section),
    ]
    .boxed()
}

fn build(shapes: &[Shape], level: u8, next: &Cell<usize>) -> Vec<Block> {
    shapes
        .iter()
        .map(|shape| {
            let id = format!("b{}", next.get());
            next.set(next.get() + 1);
            match shape {
                Shape::Field => Field::new(id.clone(), id, FieldKind::ShortText, level).into(),
                Shape::Section(children) => Section::new(id.clone(), id, level)
                    .with_children(build(children, level + 1, next))
                    .into(),
            }
        })
        .collect()
}

/// Root sections, each holding a random subtree at most three section levels deep.
fn tree_strategy() -> impl Strategy<Value = Vec<Block>> {
    prop::collection::vec(prop::collection::vec(shape(2), 0..4), 1..4).prop_map(|roots| {
        let next = Cell::new(0);
        roots
            .iter()
            .map(|children| {
                let id = format!("r{}", next.get());
                next.set(next.get() + 1);
                Section::new(id.clone(), id, 1)
                    .with_children(build(children, 2, &next))
                    .into()
            })
            .collect()
    })
}

/// A tree together with one of its existing paths.
fn tree_and_path() -> impl Strategy<Value = (Vec<Block>, BlockPath)> {
    tree_strategy().prop_flat_map(|tree| {
        let paths: Vec<BlockPath> = numbered_blocks(&tree)
            .into_iter()
            .map(|(path, _)| path)
            .collect();
        (Just(tree), prop::sample::select(paths))
    })
}

fn section_paths(tree: &[Block]) -> Vec<BlockPath> {
    numbered_blocks(tree)
        .into_iter()
        .filter(|(_, block)| block.is_section())
        .map(|(path, _)| path)
        .collect()
}

proptest! {
    #[test]
    fn generated_trees_are_well_formed(tree in tree_strategy()) {
        prop_assert_eq!(check_structure(&tree), Ok(()));
    }

    #[test]
    fn update_then_resolve_returns_replacement((tree, path) in tree_and_path()) {
        let level = tree::resolve(&tree, &path).map(Block::level).unwrap_or(1);
        let replacement: Block = Field::new("replacement", "Replacement", FieldKind::Number, level).into();
        let updated = tree::update(&tree, &path, replacement.clone());
        prop_assert_eq!(tree::resolve(&updated, &path), Some(&replacement));
    }

    #[test]
    fn insert_then_remove_restores_siblings(
        tree in tree_strategy(),
        pick in any::<prop::sample::Index>(),
    ) {
        let sections = section_paths(&tree);
        let parent = pick.get(&sections).clone();
        let level = tree::resolve(&tree, &parent).map(Block::level).unwrap_or(1);
        let before = tree::resolve(&tree, &parent).map(|block| block.children().len()).unwrap_or(0);

        let inserted = tree::insert(
            &tree,
            &parent,
            Field::new("fresh", "Fresh", FieldKind::Date, level + 1).into(),
            Position::Append,
        );
        let added = parent.nth_child(before);
        prop_assert_eq!(tree::resolve(&inserted, &added).map(Block::id), Some("fresh"));

        let removed = tree::remove(&inserted, &added).expect("field removal never fails");
        let after = tree::resolve(&removed, &parent).map(|block| block.children().len()).unwrap_or(0);
        prop_assert_eq!(before, after);
        prop_assert_eq!(removed, tree);
    }

    #[test]
    fn move_down_then_up_restores_order((tree, path) in tree_and_path()) {
        let moved = tree::move_block(&tree, &path, Direction::Down);
        if moved == tree {
            // last sibling: boundary no-op
            prop_assert!(path.sibling(1).and_then(|next| tree::resolve(&tree, &next)).is_none());
        } else {
            let next = path.sibling(1).expect("moved block has a next sibling");
            prop_assert_eq!(tree::resolve(&moved, &next), tree::resolve(&tree, &path));
            let restored = tree::move_block(&moved, &next, Direction::Up);
            prop_assert_eq!(restored, tree);
        }
    }

    #[test]
    fn root_section_deletion_respects_last_section(tree in tree_strategy(), pick in any::<prop::sample::Index>()) {
        let roots = tree.len();
        let index = pick.index(roots) + 1;
        let path = BlockPath::new(vec![index]).expect("1-based index");
        match tree::remove(&tree, &path) {
            Ok(removed) => {
                prop_assert!(roots >= 2);
                prop_assert_eq!(removed.len(), roots - 1);
            }
            Err(err) => {
                prop_assert_eq!(roots, 1);
                prop_assert_eq!(err, TreeError::LastRootSection);
            }
        }
    }
}

#[test]
fn deleting_only_root_section_leaves_tree_unchanged() {
    let tree: Vec<Block> = vec![
        Section::new("only", "Only", 1)
            .with_children(vec![Field::new("f", "F", FieldKind::ShortText, 2).into()])
            .into(),
    ];
    let path = BlockPath::new(vec![1]).unwrap();
    assert_eq!(tree::remove(&tree, &path), Err(TreeError::LastRootSection));
    assert_eq!(tree.len(), 1);
    assert_eq!(tree[0].children().len(), 1);
}
