//! Field kinds.
//!
//! The stored tags (`text`, `textarea`, `multiCheckbox`, ...) are the ones
//! persisted by existing form documents. Parsing additionally accepts the
//! descriptive names (`short-text`, `multi-choice`, ...). Tags that match
//! neither are preserved as [`FieldKind::Other`] so old or foreign documents
//! still load and render.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// The input kind of a form field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldKind {
    /// Single-line free text.
    ShortText,
    /// Multi-line free text.
    LongText,
    /// Numeric input, kept as text.
    Number,
    /// Calendar date, kept as text (usually `YYYY-MM-DD`).
    Date,
    /// Yes/No checkbox.
    Boolean,
    /// Exactly one of the field's choices (radio group).
    SingleChoice,
    /// Any subset of the field's choices (checkbox group).
    MultiChoice,
    /// Exactly one of the field's choices (select menu).
    Dropdown,
    /// Typed signer name.
    Signature,
    /// A tag this version does not know about.
    Other(String),
}

impl FieldKind {
    /// Every kind this version knows how to edit, in menu order.
    pub const KNOWN: [FieldKind; 9] = [
        FieldKind::ShortText,
        FieldKind::LongText,
        FieldKind::Number,
        FieldKind::Date,
        FieldKind::Boolean,
        FieldKind::SingleChoice,
        FieldKind::MultiChoice,
        FieldKind::Dropdown,
        FieldKind::Signature,
    ];

    /// Returns the tag used in stored documents.
    pub fn as_str(&self) -> &str {
        match self {
            FieldKind::ShortText => "text",
            FieldKind::LongText => "textarea",
            FieldKind::Number => "number",
            FieldKind::Date => "date",
            FieldKind::Boolean => "checkbox",
            FieldKind::SingleChoice => "radio",
            FieldKind::MultiChoice => "multiCheckbox",
            FieldKind::Dropdown => "dropdown",
            FieldKind::Signature => "signature",
            FieldKind::Other(tag) => tag,
        }
    }

    /// Returns the human-readable name shown in editors.
    pub fn label(&self) -> &str {
        match self {
            FieldKind::ShortText => "Short Text Field",
            FieldKind::LongText => "Long Text Area",
            FieldKind::Number => "Number Field",
            FieldKind::Date => "Date Picker",
            FieldKind::Boolean => "Checkbox (Yes/No)",
            FieldKind::SingleChoice => "Single Choice (Radio)",
            FieldKind::MultiChoice => "Multiple Choice (Checkboxes)",
            FieldKind::Dropdown => "Dropdown Menu",
            FieldKind::Signature => "Signature Field",
            FieldKind::Other(tag) => tag,
        }
    }

    /// Returns true for kinds that pick from a list of choice labels.
    pub fn has_choices(&self) -> bool {
        matches!(
            self,
            FieldKind::SingleChoice | FieldKind::MultiChoice | FieldKind::Dropdown
        )
    }

    /// Returns true if this kind was not recognised when parsing.
    pub fn is_unknown(&self) -> bool {
        matches!(self, FieldKind::Other(_))
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldKind {
    type Err = ModelError;

    /// Parse a stored tag or a descriptive name (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['_', ' '], "-");

        match normalized.as_str() {
            "text" | "short-text" => Ok(FieldKind::ShortText),
            "textarea" | "long-text" => Ok(FieldKind::LongText),
            "number" => Ok(FieldKind::Number),
            "date" => Ok(FieldKind::Date),
            "checkbox" | "boolean" => Ok(FieldKind::Boolean),
            "radio" | "single-choice" => Ok(FieldKind::SingleChoice),
            "multicheckbox" | "multi-choice" => Ok(FieldKind::MultiChoice),
            "dropdown" => Ok(FieldKind::Dropdown),
            "signature" => Ok(FieldKind::Signature),
            _ => Err(ModelError::UnknownFieldKind {
                value: s.to_string(),
            }),
        }
    }
}

impl From<String> for FieldKind {
    fn from(value: String) -> Self {
        value.parse().unwrap_or(FieldKind::Other(value))
    }
}

impl From<FieldKind> for String {
    fn from(kind: FieldKind) -> Self {
        match kind {
            FieldKind::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_kind_from_str() {
        assert_eq!("text".parse::<FieldKind>().unwrap(), FieldKind::ShortText);
        assert_eq!(
            "Multi Choice".parse::<FieldKind>().unwrap(),
            FieldKind::MultiChoice
        );
        assert_eq!(
            "multiCheckbox".parse::<FieldKind>().unwrap(),
            FieldKind::MultiChoice
        );
        assert_eq!("boolean".parse::<FieldKind>().unwrap(), FieldKind::Boolean);
        assert!("slider".parse::<FieldKind>().is_err());
    }

    #[test]
    fn test_unknown_tag_is_preserved() {
        let kind = FieldKind::from("slider".to_string());
        assert_eq!(kind, FieldKind::Other("slider".to_string()));
        assert!(kind.is_unknown());
        assert_eq!(String::from(kind), "slider");
    }

    #[test]
    fn test_tags_round_trip_through_parse() {
        for kind in FieldKind::KNOWN {
            assert_eq!(kind.as_str().parse::<FieldKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_choice_kinds() {
        assert!(FieldKind::Dropdown.has_choices());
        assert!(FieldKind::MultiChoice.has_choices());
        assert!(!FieldKind::Signature.has_choices());
    }
}
