//! Positional block addresses.
//!
//! A [`BlockPath`] is the sequence of 1-based sibling indices from the root
//! sequence down to a block, printed as `2.1.3`. Paths describe where a block
//! currently sits and change whenever the tree is edited; block identifiers
//! are the stable handle.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// Positional address of a block: 1-based sibling indices from the root.
///
/// The empty path addresses the root sequence itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BlockPath(Vec<usize>);

impl BlockPath {
    /// The root sequence.
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Build a path from 1-based indices.
    pub fn new(indices: Vec<usize>) -> Result<Self, ModelError> {
        if indices.contains(&0) {
            return Err(ModelError::InvalidPath {
                value: join_indices(&indices),
                message: "indices are 1-based".to_string(),
            });
        }
        Ok(Self(indices))
    }

    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Nesting depth; root-level blocks have depth 1.
    pub fn depth(&self) -> usize {
        self.0.len()
    }

    /// Index of the addressed block among its siblings.
    pub fn last(&self) -> Option<usize> {
        self.0.last().copied()
    }

    /// Path of the containing section (root for root-level blocks).
    pub fn parent(&self) -> Option<BlockPath> {
        if self.0.is_empty() {
            return None;
        }
        Some(Self(self.0[..self.0.len() - 1].to_vec()))
    }

    /// Path of the `index`-th (1-based) child of this path.
    pub fn child(&self, index: usize) -> Result<BlockPath, ModelError> {
        if index == 0 {
            return Err(ModelError::InvalidPath {
                value: format!("{self}.0").trim_start_matches('.').to_string(),
                message: "indices are 1-based".to_string(),
            });
        }
        Ok(self.nth_child(index - 1))
    }

    /// Path of the child at 0-based `position`, as produced by iterating a
    /// section's children.
    #[must_use]
    pub fn nth_child(&self, position: usize) -> BlockPath {
        let mut indices = self.0.clone();
        indices.push(position + 1);
        Self(indices)
    }

    /// Path of the sibling `offset` positions away, if it would stay 1-based.
    pub fn sibling(&self, offset: isize) -> Option<BlockPath> {
        let last = self.last()?;
        let target = last.checked_add_signed(offset).filter(|index| *index >= 1)?;
        let mut indices = self.0.clone();
        if let Some(slot) = indices.last_mut() {
            *slot = target;
        }
        Some(Self(indices))
    }

    /// Splits into the first (root-level) index and the remaining path.
    pub fn split_first(&self) -> Option<(usize, BlockPath)> {
        let (first, rest) = self.0.split_first()?;
        Some((*first, Self(rest.to_vec())))
    }
}

fn join_indices(indices: &[usize]) -> String {
    indices
        .iter()
        .map(usize::to_string)
        .collect::<Vec<_>>()
        .join(".")
}

impl fmt::Display for BlockPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&join_indices(&self.0))
    }
}

impl FromStr for BlockPath {
    type Err = ModelError;

    /// Parse a dotted path such as `2.1.3`. The empty string is the root.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Ok(Self::root());
        }
        let mut indices = Vec::new();
        for part in trimmed.split('.') {
            let index = part
                .trim()
                .parse::<usize>()
                .map_err(|_| ModelError::InvalidPath {
                    value: s.to_string(),
                    message: format!("'{part}' is not a positive integer"),
                })?;
            indices.push(index);
        }
        Self::new(indices).map_err(|_| ModelError::InvalidPath {
            value: s.to_string(),
            message: "indices are 1-based".to_string(),
        })
    }
}

impl TryFrom<String> for BlockPath {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<BlockPath> for String {
    fn from(path: BlockPath) -> Self {
        path.to_string()
    }
}

impl From<&[usize]> for BlockPath {
    /// Zero indices are dropped; callers holding 0-based positions should
    /// use [`BlockPath::child`] from an existing path instead.
    fn from(indices: &[usize]) -> Self {
        Self(indices.iter().copied().filter(|index| *index > 0).collect())
    }
}
