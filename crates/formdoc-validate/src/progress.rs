use serde::Serialize;

use formdoc_model::{AnswerMap, Block, Section};

use crate::required::{ValidationErrors, fields, is_empty, validate_section};

/// Completion state of one section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionProgress {
    /// No required field in the subtree is empty.
    pub is_valid: bool,
    /// At least one field in the subtree has an answer.
    pub has_any_data: bool,
    /// Valid, has data, and the section holds at least one field.
    pub is_complete: bool,
    #[serde(skip_serializing_if = "ValidationErrors::is_empty")]
    pub errors: ValidationErrors,
}

pub fn section_progress(section: &Section, answers: &AnswerMap) -> SectionProgress {
    let errors = validate_section(section, answers);
    let section_fields = fields(&section.children);
    let has_any_data = section_fields
        .iter()
        .any(|field| !is_empty(answers.get(&field.id)));
    let is_valid = errors.is_empty();
    SectionProgress {
        is_valid,
        has_any_data,
        is_complete: is_valid && has_any_data && !section_fields.is_empty(),
        errors,
    }
}

/// Completion across root sections.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormProgress {
    pub sections: Vec<SectionProgress>,
    pub complete: usize,
    pub total: usize,
}

impl FormProgress {
    /// Percentage of complete root sections, 0 for a form without sections.
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.complete as f64 / self.total as f64 * 100.0
        }
    }
}

pub fn form_progress(blocks: &[Block], answers: &AnswerMap) -> FormProgress {
    let sections: Vec<SectionProgress> = blocks
        .iter()
        .filter_map(Block::as_section)
        .map(|section| section_progress(section, answers))
        .collect();
    let complete = sections.iter().filter(|progress| progress.is_complete).count();
    FormProgress {
        total: sections.len(),
        complete,
        sections,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formdoc_model::{AnswerValue, Field, FieldKind};

    #[test]
    fn empty_section_is_never_complete() {
        let section = Section::new("s", "Empty", 1);
        let progress = section_progress(&section, &AnswerMap::new());
        assert!(progress.is_valid);
        assert!(!progress.has_any_data);
        assert!(!progress.is_complete);
    }

    #[test]
    fn optional_only_section_completes_with_any_answer() {
        let section = Section::new("s", "Notes", 1)
            .with_children(vec![Field::new("n", "Notes", FieldKind::LongText, 2).into()]);
        let mut answers = AnswerMap::new();
        assert!(!section_progress(&section, &answers).is_complete);
        answers.insert("n".to_string(), AnswerValue::text("All good"));
        assert!(section_progress(&section, &answers).is_complete);
    }

    #[test]
    fn percentage_of_empty_form_is_zero() {
        assert_eq!(form_progress(&[], &AnswerMap::new()).percentage(), 0.0);
    }
}
