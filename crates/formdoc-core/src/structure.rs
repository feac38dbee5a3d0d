//! Tree invariant checks.

use std::collections::BTreeSet;

use formdoc_model::{Block, BlockPath, MAX_LEVEL};

use crate::error::StructureError;

/// Checks the invariants every stored block tree must satisfy:
///
/// - at least one root block, all root blocks are sections
/// - every child is exactly one level below its parent (root = 1)
/// - sections are at most [`MAX_LEVEL`] deep
/// - identifiers are non-empty and unique across the tree
///
/// Returns the first violation found in document order.
pub fn check_structure(blocks: &[Block]) -> Result<(), StructureError> {
    if !blocks.iter().any(Block::is_section) {
        return Err(StructureError::NoRootSection);
    }
    if let Some(field) = blocks.iter().find_map(Block::as_field) {
        return Err(StructureError::FieldAtRoot {
            id: field.id.clone(),
        });
    }
    let mut seen = BTreeSet::new();
    check_level(blocks, &BlockPath::root(), 1, &mut seen)
}

fn check_level<'a>(
    blocks: &'a [Block],
    parent: &BlockPath,
    expected: u8,
    seen: &mut BTreeSet<&'a str>,
) -> Result<(), StructureError> {
    for (index, block) in blocks.iter().enumerate() {
        let path = parent.nth_child(index);
        let id = block.id();
        if id.trim().is_empty() {
            return Err(StructureError::MissingId { path });
        }
        if !seen.insert(id) {
            return Err(StructureError::DuplicateId { id: id.to_string() });
        }
        if block.level() != expected {
            return Err(StructureError::LevelMismatch {
                id: id.to_string(),
                path,
                expected,
                actual: block.level(),
            });
        }
        if let Block::Section(section) = block {
            if section.level > MAX_LEVEL {
                return Err(StructureError::TooDeep {
                    id: id.to_string(),
                    path,
                    max: MAX_LEVEL,
                });
            }
            check_level(&section.children, &path, expected + 1, seen)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use formdoc_model::{Field, FieldKind, Section};

    fn field(id: &str, level: u8) -> Block {
        Field::new(id, id, FieldKind::ShortText, level).into()
    }

    #[test]
    fn accepts_valid_tree() {
        let blocks = vec![
            Section::new("a", "A", 1)
                .with_children(vec![
                    field("x", 2),
                    Section::new("a1", "A1", 2)
                        .with_children(vec![
                            Section::new("a11", "A11", 3)
                                .with_children(vec![field("deep", 4)])
                                .into(),
                        ])
                        .into(),
                ])
                .into(),
        ];
        assert_eq!(check_structure(&blocks), Ok(()));
    }

    #[test]
    fn rejects_empty_and_root_fields() {
        assert_eq!(check_structure(&[]), Err(StructureError::NoRootSection));
        let blocks = vec![Section::new("a", "A", 1).into(), field("x", 1)];
        assert_eq!(
            check_structure(&blocks),
            Err(StructureError::FieldAtRoot {
                id: "x".to_string()
            })
        );
    }

    #[test]
    fn rejects_level_mismatch() {
        let blocks = vec![Section::new("a", "A", 1).with_children(vec![field("x", 3)]).into()];
        assert!(matches!(
            check_structure(&blocks),
            Err(StructureError::LevelMismatch {
                expected: 2,
                actual: 3,
                ..
            })
        ));
    }

    #[test]
    fn rejects_sections_below_max_level() {
        let blocks = vec![
            Section::new("a", "A", 1)
                .with_children(vec![
                    Section::new("b", "B", 2)
                        .with_children(vec![
                            Section::new("c", "C", 3)
                                .with_children(vec![Section::new("d", "D", 4).into()])
                                .into(),
                        ])
                        .into(),
                ])
                .into(),
        ];
        assert!(matches!(
            check_structure(&blocks),
            Err(StructureError::TooDeep { .. })
        ));
    }

    #[test]
    fn rejects_duplicate_and_blank_ids() {
        let blocks = vec![
            Section::new("a", "A", 1).with_children(vec![field("x", 2)]).into(),
            Section::new("b", "B", 1).with_children(vec![field("x", 2)]).into(),
        ];
        assert_eq!(
            check_structure(&blocks),
            Err(StructureError::DuplicateId {
                id: "x".to_string()
            })
        );
        let blocks = vec![Section::new(" ", "A", 1).into()];
        assert!(matches!(
            check_structure(&blocks),
            Err(StructureError::MissingId { .. })
        ));
    }
}
