use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::block::Block;
use crate::error::ModelError;

/// Form revision in `MAJOR.MINOR` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Revision {
    pub major: u32,
    pub minor: u32,
}

/// Which part of the revision a publish increments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RevisionBump {
    /// `MAJOR.(MINOR+1)`
    #[default]
    Minor,
    /// `(MAJOR+1).0`
    Major,
}

impl Revision {
    pub const INITIAL: Revision = Revision { major: 1, minor: 0 };

    pub fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }

    #[must_use]
    pub fn bumped(self, bump: RevisionBump) -> Self {
        match bump {
            RevisionBump::Minor => Self::new(self.major, self.minor.saturating_add(1)),
            RevisionBump::Major => Self::new(self.major.saturating_add(1), 0),
        }
    }
}

impl Default for Revision {
    fn default() -> Self {
        Self::INITIAL
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

impl FromStr for Revision {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ModelError::InvalidRevision {
            value: s.to_string(),
        };
        let (major, minor) = s.trim().split_once('.').ok_or_else(invalid)?;
        let all_digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
        if !all_digits(major) || !all_digits(minor) {
            return Err(invalid());
        }
        Ok(Self {
            major: major.parse().map_err(|_| invalid())?,
            minor: minor.parse().map_err(|_| invalid())?,
        })
    }
}

impl TryFrom<String> for Revision {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Revision> for String {
    fn from(revision: Revision) -> Self {
        revision.to_string()
    }
}

/// A form definition: metadata plus the root block sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormDocument {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default)]
    pub revision: Revision,
    #[serde(default)]
    pub published: bool,
    #[serde(default)]
    pub header_on_all_pages: bool,
    #[serde(default)]
    pub blocks: Vec<Block>,
}

impl FormDocument {
    /// Root-level blocks that are sections.
    pub fn root_sections(&self) -> impl Iterator<Item = &crate::block::Section> {
        self.blocks.iter().filter_map(Block::as_section)
    }

    /// The department when it has visible content.
    pub fn visible_department(&self) -> Option<&str> {
        self.department
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
    }

    /// The description when it has visible content.
    pub fn visible_description(&self) -> Option<&str> {
        self.description
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn revision_parse_and_display() {
        let revision: Revision = "2.13".parse().unwrap();
        assert_eq!(revision, Revision::new(2, 13));
        assert_eq!(revision.to_string(), "2.13");
    }

    #[test]
    fn revision_rejects_malformed() {
        for value in ["", "1", "1.", ".1", "1.2.3", "a.b", "-1.0", "1.+2"] {
            assert!(value.parse::<Revision>().is_err(), "{value}");
        }
    }

    #[test]
    fn revision_bumps() {
        let revision = Revision::new(1, 4);
        assert_eq!(revision.bumped(RevisionBump::Minor), Revision::new(1, 5));
        assert_eq!(revision.bumped(RevisionBump::Major), Revision::new(2, 0));
    }
}
