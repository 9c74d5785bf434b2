//! Difference output types.
//!
//! All types implement `Debug, Clone, Serialize, Deserialize, PartialEq`.
//! Empty fields are skipped when serializing.

use crate::path::{Path, PathElem};
use serde::{Deserialize, Serialize};
use std::ops::Deref;

/// One detected mismatch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Difference {
    /// Location of the mismatch, empty at the root
    #[serde(default, skip_serializing_if = "Path::is_empty")]
    pub path: Path,
    /// Message from the fixed catalog
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub message: String,
    /// Textual form of the first value (strings are quoted)
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub v1: String,
    /// Textual form of the second value
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub v2: String,
}

impl Difference {
    /// A difference at the root path.
    pub fn new(message: impl Into<String>, v1: impl Into<String>, v2: impl Into<String>) -> Self {
        Self {
            path: Path::new(),
            message: message.into(),
            v1: v1.into(),
            v2: v2.into(),
        }
    }

    pub fn with_path(mut self, path: Path) -> Self {
        self.path = path;
        self
    }
}

/// Ordered list of differences; empty means the values are deeply equal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Diff {
    differences: Vec<Difference>,
}

impl Diff {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(difference: Difference) -> Self {
        Self {
            differences: vec![difference],
        }
    }

    pub fn push(&mut self, difference: Difference) {
        self.differences.push(difference);
    }

    /// Moves every difference of `other` to the end of `self`.
    pub fn append(&mut self, other: Diff) {
        self.differences.extend(other.differences);
    }

    /// Prepends `elem` to the path of every difference.
    pub fn with_prefix(mut self, elem: PathElem) -> Self {
        if let Some((last, rest)) = self.differences.split_last_mut() {
            for difference in rest {
                difference.path.push_front(elem.clone());
            }
            last.path.push_front(elem);
        }
        self
    }

    pub fn into_vec(self) -> Vec<Difference> {
        self.differences
    }
}

impl Deref for Diff {
    type Target = [Difference];

    fn deref(&self) -> &Self::Target {
        &self.differences
    }
}

impl From<Vec<Difference>> for Diff {
    fn from(differences: Vec<Difference>) -> Self {
        Self { differences }
    }
}

impl FromIterator<Difference> for Diff {
    fn from_iter<I: IntoIterator<Item = Difference>>(iter: I) -> Self {
        Self {
            differences: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Diff {
    type Item = Difference;
    type IntoIter = std::vec::IntoIter<Difference>;

    fn into_iter(self) -> Self::IntoIter {
        self.differences.into_iter()
    }
}

impl<'a> IntoIterator for &'a Diff {
    type Item = &'a Difference;
    type IntoIter = std::slice::Iter<'a, Difference>;

    fn into_iter(self) -> Self::IntoIter {
        self.differences.iter()
    }
}
