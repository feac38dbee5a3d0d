//! Placeholder answers for previewing a form before anyone has filled it in.

use sha2::{Digest, Sha256};

use formdoc_model::{AnswerMap, AnswerValue, Block, Field, FieldKind};

pub const SAMPLE_SHORT_TEXT: &str = "Sample text";
pub const SAMPLE_LONG_TEXT: &str = "This is a longer sample answer. It runs over several words so the \
     preview shows how multi-line responses wrap inside the value column.";
pub const SAMPLE_NUMBER: &str = "42";
pub const SAMPLE_DATE: &str = "2024-01-15";
pub const SAMPLE_SIGNER: &str = "John Doe";
pub const SAMPLE_OTHER: &str = "Sample value";

/// One plausible answer for `field`.
///
/// Multi-choice fields get a non-empty subset of their choices picked from a
/// hash of the field identifier, so the same form always previews the same
/// way.
pub fn sample_value(field: &Field) -> AnswerValue {
    match &field.kind {
        FieldKind::ShortText => AnswerValue::text(SAMPLE_SHORT_TEXT),
        FieldKind::LongText => AnswerValue::text(SAMPLE_LONG_TEXT),
        FieldKind::Number => AnswerValue::text(SAMPLE_NUMBER),
        FieldKind::Date => AnswerValue::text(SAMPLE_DATE),
        FieldKind::Boolean => AnswerValue::Bool(true),
        FieldKind::SingleChoice | FieldKind::Dropdown => {
            AnswerValue::text(field.choices.first().cloned().unwrap_or_default())
        }
        FieldKind::MultiChoice => AnswerValue::List(sample_subset(&field.id, &field.choices)),
        FieldKind::Signature => AnswerValue::text(SAMPLE_SIGNER),
        FieldKind::Other(_) => AnswerValue::text(SAMPLE_OTHER),
    }
}

fn sample_subset(seed: &str, choices: &[String]) -> Vec<String> {
    if choices.is_empty() {
        return Vec::new();
    }
    let digest = Sha256::digest(seed.as_bytes());
    let bit = |index: usize| {
        let byte = digest[(index / 8) % digest.len()];
        byte & (1 << (index % 8)) != 0
    };
    let mut picked: Vec<String> = choices
        .iter()
        .enumerate()
        .filter(|(index, _)| bit(*index))
        .map(|(_, choice)| choice.clone())
        .collect();
    if picked.is_empty() {
        picked.push(choices[usize::from(digest[0]) % choices.len()].clone());
    }
    picked
}

/// Sample answers for every field in the tree.
pub fn sample_answers(blocks: &[Block]) -> AnswerMap {
    let mut answers = AnswerMap::new();
    collect(blocks, &mut answers);
    answers
}

fn collect(blocks: &[Block], answers: &mut AnswerMap) {
    for block in blocks {
        match block {
            Block::Field(field) => {
                answers.insert(field.id.clone(), sample_value(field));
            }
            Block::Section(section) => collect(&section.children, answers),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formdoc_model::Section;

    #[test]
    fn multi_choice_sample_is_non_empty_subset() {
        for seed in 0..200 {
            let field = Field::new(format!("field-{seed}"), "Pick", FieldKind::MultiChoice, 2)
                .with_choices(["A", "B"]);
            let value = sample_value(&field);
            let picked = value.as_list().unwrap();
            assert!(!picked.is_empty());
            assert!(picked.iter().all(|choice| choice == "A" || choice == "B"));
        }
    }

    #[test]
    fn multi_choice_sample_is_stable() {
        let field = Field::new("f1", "Pick", FieldKind::MultiChoice, 2).with_choices(["A", "B", "C"]);
        assert_eq!(sample_value(&field), sample_value(&field));
    }

    #[test]
    fn choice_kinds_take_first_choice() {
        let field = Field::new("f1", "Condition", FieldKind::SingleChoice, 2)
            .with_choices(["Excellent", "Good"]);
        assert_eq!(sample_value(&field), AnswerValue::text("Excellent"));
        let field = Field::new("f2", "Empty", FieldKind::Dropdown, 2);
        assert!(sample_value(&field).is_empty());
    }

    #[test]
    fn every_field_gets_a_value() {
        let blocks = vec![
            Section::new("s", "S", 1)
                .with_children(vec![
                    Field::new("a", "A", FieldKind::Boolean, 2).into(),
                    Field::new("b", "B", FieldKind::Signature, 2).into(),
                    Field::new("c", "C", FieldKind::Other("slider".into()), 2).into(),
                ])
                .into(),
        ];
        let answers = sample_answers(&blocks);
        assert_eq!(answers.len(), 3);
        assert_eq!(answers["a"], AnswerValue::Bool(true));
        assert_eq!(answers["b"], AnswerValue::text(SAMPLE_SIGNER));
        assert_eq!(answers["c"], AnswerValue::text(SAMPLE_OTHER));
    }
}
