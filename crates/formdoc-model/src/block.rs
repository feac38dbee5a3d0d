use serde::{Deserialize, Serialize};

use crate::field_kind::FieldKind;

/// Deepest allowed nesting level. Root sections are level 1.
pub const MAX_LEVEL: u8 = 3;

/// A node of the form tree.
///
/// Stored documents tag blocks with `"type": "section"` or `"type": "field"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Block {
    Section(Section),
    Field(Field),
}

/// A titled group of blocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub level: u8,
    #[serde(default)]
    pub children: Vec<Block>,
}

/// A single input. Fields never have children; a stored field carrying a
/// `children` key is rejected when the document is read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Field {
    pub id: String,
    pub title: String,
    #[serde(rename = "fieldType")]
    pub kind: FieldKind,
    #[serde(default)]
    pub required: bool,
    pub level: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<String>,
}

impl Section {
    pub fn new(id: impl Into<String>, title: impl Into<String>, level: u8) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            level,
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_children(mut self, children: Vec<Block>) -> Self {
        self.children = children;
        self
    }

    /// The description when it has visible content.
    pub fn visible_description(&self) -> Option<&str> {
        self.description
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
    }

    /// Returns true if any field exists anywhere below this section.
    pub fn has_fields(&self) -> bool {
        self.children.iter().any(|child| match child {
            Block::Field(_) => true,
            Block::Section(section) => section.has_fields(),
        })
    }
}

impl Field {
    pub fn new(id: impl Into<String>, title: impl Into<String>, kind: FieldKind, level: u8) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            kind,
            required: false,
            level,
            description: None,
            choices: Vec::new(),
        }
    }

    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    #[must_use]
    pub fn with_choices<I, S>(mut self, choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.choices = choices.into_iter().map(Into::into).collect();
        self
    }
}

impl Block {
    pub fn id(&self) -> &str {
        match self {
            Block::Section(section) => &section.id,
            Block::Field(field) => &field.id,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Block::Section(section) => &section.title,
            Block::Field(field) => &field.title,
        }
    }

    pub fn level(&self) -> u8 {
        match self {
            Block::Section(section) => section.level,
            Block::Field(field) => field.level,
        }
    }

    /// Child blocks; always empty for fields.
    pub fn children(&self) -> &[Block] {
        match self {
            Block::Section(section) => &section.children,
            Block::Field(_) => &[],
        }
    }

    pub fn is_section(&self) -> bool {
        matches!(self, Block::Section(_))
    }

    pub fn as_section(&self) -> Option<&Section> {
        match self {
            Block::Section(section) => Some(section),
            Block::Field(_) => None,
        }
    }

    pub fn as_field(&self) -> Option<&Field> {
        match self {
            Block::Field(field) => Some(field),
            Block::Section(_) => None,
        }
    }

    /// Short name of the variant, as stored in the `type` tag.
    pub fn type_name(&self) -> &'static str {
        match self {
            Block::Section(_) => "section",
            Block::Field(_) => "field",
        }
    }
}

impl From<Section> for Block {
    fn from(section: Section) -> Self {
        Block::Section(section)
    }
}

impl From<Field> for Block {
    fn from(field: Field) -> Self {
        Block::Field(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_description_is_not_visible() {
        let section = Section::new("s1", "General", 1).with_description("   ");
        assert_eq!(section.visible_description(), None);
        let section = section.with_description("Fill in before flight");
        assert_eq!(section.visible_description(), Some("Fill in before flight"));
    }

    #[test]
    fn has_fields_looks_through_subsections() {
        let nested = Section::new("s2", "Engine", 2).with_children(vec![
            Field::new("f1", "Model", FieldKind::ShortText, 3).into(),
        ]);
        let section = Section::new("s1", "Aircraft", 1).with_children(vec![nested.into()]);
        assert!(section.has_fields());
        assert!(!Section::new("s3", "Empty", 1).has_fields());
    }
}
