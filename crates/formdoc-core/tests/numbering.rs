//! Numbering follows position after structural edits.

use formdoc_core::{Direction, compute_path, move_block, outline};
use formdoc_model::{Block, BlockPath, Field, FieldKind, Section};

fn two_sections() -> Vec<Block> {
    vec![
        Section::new("section-a", "Section A", 1)
            .with_children(vec![Field::new("field-x", "Field X", FieldKind::ShortText, 2).into()])
            .into(),
        Section::new("section-b", "Section B", 1)
            .with_children(vec![Field::new("field-y", "Field Y", FieldKind::ShortText, 2).into()])
            .into(),
    ]
}

fn label(blocks: &[Block], id: &str) -> String {
    compute_path(blocks, id).map(|path| path.to_string()).unwrap_or_default()
}

#[test]
fn paths_before_and_after_moving_second_section_up() {
    let blocks = two_sections();
    assert_eq!(label(&blocks, "section-a"), "1");
    assert_eq!(label(&blocks, "field-x"), "1.1");
    assert_eq!(label(&blocks, "section-b"), "2");
    assert_eq!(label(&blocks, "field-y"), "2.1");

    let path: BlockPath = "2".parse().unwrap();
    let moved = move_block(&blocks, &path, Direction::Up);
    assert_eq!(label(&moved, "section-b"), "1");
    assert_eq!(label(&moved, "field-y"), "1.1");
    assert_eq!(label(&moved, "section-a"), "2");
    assert_eq!(label(&moved, "field-x"), "2.1");
}

#[test]
fn outline_renumbers_after_move() {
    let blocks = two_sections();
    let path: BlockPath = "2".parse().unwrap();
    let moved = move_block(&blocks, &path, Direction::Up);
    insta::assert_snapshot!(outline(&moved), @r"
    1 Section B
    1.1 Field Y
    2 Section A
    2.1 Field X
    ");
}
