use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Answers keyed by field identifier.
pub type AnswerMap = BTreeMap<String, AnswerValue>;

/// A stored answer. The shape follows the field kind: booleans for
/// checkboxes, label lists for multi-choice, text for everything else
/// (numbers and dates stay text so no locale formatting is lost).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Null,
    Bool(bool),
    List(Vec<String>),
    Text(String),
    /// Numbers written by older clients; read back as text.
    Number(f64),
}

impl AnswerValue {
    pub fn text(value: impl Into<String>) -> Self {
        AnswerValue::Text(value.into())
    }

    pub fn list<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        AnswerValue::List(values.into_iter().map(Into::into).collect())
    }

    /// True for null, the empty string and the empty list.
    pub fn is_empty(&self) -> bool {
        match self {
            AnswerValue::Null => true,
            AnswerValue::Text(text) => text.is_empty(),
            AnswerValue::List(items) => items.is_empty(),
            AnswerValue::Bool(_) | AnswerValue::Number(_) => false,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AnswerValue::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            AnswerValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Plain-text rendering independent of the field kind.
    pub fn to_plain_text(&self) -> String {
        match self {
            AnswerValue::Null => String::new(),
            AnswerValue::Bool(value) => value.to_string(),
            AnswerValue::List(items) => items.join(", "),
            AnswerValue::Text(text) => text.clone(),
            AnswerValue::Number(number) => number.to_string(),
        }
    }
}

impl From<bool> for AnswerValue {
    fn from(value: bool) -> Self {
        AnswerValue::Bool(value)
    }
}

impl From<&str> for AnswerValue {
    fn from(value: &str) -> Self {
        AnswerValue::Text(value.to_string())
    }
}

impl From<String> for AnswerValue {
    fn from(value: String) -> Self {
        AnswerValue::Text(value)
    }
}

impl From<Vec<String>> for AnswerValue {
    fn from(values: Vec<String>) -> Self {
        AnswerValue::List(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emptiness() {
        assert!(AnswerValue::Null.is_empty());
        assert!(AnswerValue::text("").is_empty());
        assert!(AnswerValue::List(vec![]).is_empty());
        assert!(!AnswerValue::Bool(false).is_empty());
        assert!(!AnswerValue::text(" ").is_empty());
        assert!(!AnswerValue::list(["A"]).is_empty());
    }

    #[test]
    fn plain_text() {
        assert_eq!(AnswerValue::list(["A", "B"]).to_plain_text(), "A, B");
        assert_eq!(AnswerValue::Number(1250.0).to_plain_text(), "1250");
        assert_eq!(AnswerValue::Null.to_plain_text(), "");
    }
}
