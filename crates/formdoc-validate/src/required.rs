use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use thiserror::Error;

use formdoc_model::{AnswerMap, AnswerValue, Block, Section};

/// Problem with a single field's answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[serde(rename_all = "snake_case")]
pub enum FieldError {
    #[error("this field is required")]
    Required,
}

/// Errors keyed by field identifier.
pub type ValidationErrors = BTreeMap<String, FieldError>;

/// Identifiers of every required field anywhere below `blocks`.
pub fn find_required_field_ids(blocks: &[Block]) -> BTreeSet<String> {
    let mut ids = BTreeSet::new();
    for field in fields(blocks) {
        if field.required {
            ids.insert(field.id.clone());
        }
    }
    ids
}

/// True for a missing answer, `null`, an empty string or an empty list.
pub fn is_empty(value: Option<&AnswerValue>) -> bool {
    value.is_none_or(AnswerValue::is_empty)
}

/// Required-field errors for the subtree rooted at `section`.
pub fn validate_section(section: &Section, answers: &AnswerMap) -> ValidationErrors {
    validate_blocks(&section.children, answers)
}

/// Required-field errors for the whole form.
pub fn validate_all(blocks: &[Block], answers: &AnswerMap) -> ValidationErrors {
    validate_blocks(blocks, answers)
}

fn validate_blocks(blocks: &[Block], answers: &AnswerMap) -> ValidationErrors {
    find_required_field_ids(blocks)
        .into_iter()
        .filter(|id| is_empty(answers.get(id)))
        .map(|id| (id, FieldError::Required))
        .collect()
}

/// Every field below `blocks`, in document order.
pub(crate) fn fields(blocks: &[Block]) -> Vec<&formdoc_model::Field> {
    let mut out = Vec::new();
    let mut stack: Vec<&Block> = blocks.iter().rev().collect();
    while let Some(block) = stack.pop() {
        match block {
            Block::Field(field) => out.push(field),
            Block::Section(section) => stack.extend(section.children.iter().rev()),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use formdoc_model::{Field, FieldKind};

    fn section() -> Section {
        Section::new("s", "Checks", 1).with_children(vec![
            Field::new("a", "Registration", FieldKind::ShortText, 2).required().into(),
            Field::new("b", "Remarks", FieldKind::LongText, 2).into(),
            Section::new("s1", "Sub", 2)
                .with_children(vec![
                    Field::new("c", "Signed", FieldKind::Signature, 3).required().into(),
                ])
                .into(),
        ])
    }

    #[test]
    fn collects_nested_required_fields() {
        let ids = find_required_field_ids(std::slice::from_ref(&Block::from(section())));
        assert_eq!(ids.into_iter().collect::<Vec<_>>(), vec!["a", "c"]);
    }

    #[test]
    fn emptiness_rules() {
        assert!(is_empty(None));
        assert!(is_empty(Some(&AnswerValue::Null)));
        assert!(is_empty(Some(&AnswerValue::text(""))));
        assert!(is_empty(Some(&AnswerValue::List(Vec::new()))));
        assert!(!is_empty(Some(&AnswerValue::Bool(false))));
        assert!(!is_empty(Some(&AnswerValue::text("0"))));
    }

    #[test]
    fn section_errors_only_for_missing_required() {
        let mut answers = AnswerMap::new();
        answers.insert("a".to_string(), AnswerValue::text("OY-ABC"));
        answers.insert("c".to_string(), AnswerValue::text(""));
        let errors = validate_section(&section(), &answers);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("c"), Some(&FieldError::Required));
    }

    #[test]
    fn fields_in_document_order() {
        let blocks = vec![Block::from(section())];
        let ids: Vec<_> = fields(&blocks).iter().map(|field| field.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }
}
