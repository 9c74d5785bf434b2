//! Location of a difference inside the compared values.
//!
//! A [`Path`] is built bottom-up while the recursion unwinds: each parent
//! prepends its own element to the paths of its children. Elements are stored
//! deepest-first so that prepending is a push.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One navigation step from a parent value to a child.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathElem {
    /// Named struct field, rendered `.Name`.
    #[serde(rename = "struct")]
    Field(String),
    /// Map key in its textual form, rendered `[key]`.
    Map(String),
    /// Sequence index, rendered `[n]`.
    Index(usize),
}

impl fmt::Display for PathElem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathElem::Field(name) => write!(f, ".{name}"),
            PathElem::Map(key) => write!(f, "[{key}]"),
            PathElem::Index(index) => write!(f, "[{index}]"),
        }
    }
}

/// Sequence of [`PathElem`]s from the root to a difference.
///
/// Serialized as a list of elements from the root down.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<PathElem>", into = "Vec<PathElem>")]
pub struct Path {
    // Deepest element first.
    elems: Vec<PathElem>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepends `elem`, making it the new outermost step.
    pub fn push_front(&mut self, elem: PathElem) {
        self.elems.push(elem);
    }

    pub fn is_empty(&self) -> bool {
        self.elems.is_empty()
    }

    pub fn len(&self) -> usize {
        self.elems.len()
    }

    /// Elements from the root down.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &PathElem> + '_ {
        self.elems.iter().rev()
    }
}

/// Collects elements given from the root down.
impl FromIterator<PathElem> for Path {
    fn from_iter<I: IntoIterator<Item = PathElem>>(iter: I) -> Self {
        let mut elems: Vec<PathElem> = iter.into_iter().collect();
        elems.reverse();
        Self { elems }
    }
}

impl From<Vec<PathElem>> for Path {
    fn from(elems: Vec<PathElem>) -> Self {
        elems.into_iter().collect()
    }
}

impl From<Path> for Vec<PathElem> {
    fn from(path: Path) -> Self {
        let mut elems = path.elems;
        elems.reverse();
        elems
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str(".");
        }
        for elem in self.iter() {
            write!(f, "{elem}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_path_renders_dot() {
        assert_eq!(Path::new().to_string(), ".");
    }

    #[test]
    fn test_push_front_builds_outward() {
        let mut path = Path::new();
        path.push_front(PathElem::Index(2));
        path.push_front(PathElem::Map("a".into()));
        path.push_front(PathElem::Field("Map".into()));
        assert_eq!(path.to_string(), ".Map[a][2]");
        assert_eq!(path.len(), 3);
    }

    #[test]
    fn test_from_iter_is_root_first() {
        let path: Path = [PathElem::Field("Slice".into()), PathElem::Index(0)]
            .into_iter()
            .collect();
        assert_eq!(path.to_string(), ".Slice[0]");
        assert_eq!(path.iter().next(), Some(&PathElem::Field("Slice".into())));
    }

    #[test]
    fn test_path_elem_serde_names() {
        let json = serde_json::to_string(&PathElem::Field("A".into())).unwrap();
        assert_eq!(json, r#"{"struct":"A"}"#);
        let json = serde_json::to_string(&PathElem::Index(3)).unwrap();
        assert_eq!(json, r#"{"index":3}"#);
        let back: PathElem = serde_json::from_str(r#"{"map":"k"}"#).unwrap();
        assert_eq!(back, PathElem::Map("k".into()));
    }

    #[test]
    fn test_path_serializes_root_first() {
        let mut path = Path::new();
        path.push_front(PathElem::Index(1));
        path.push_front(PathElem::Field("Tags".into()));
        let json = serde_json::to_string(&path).unwrap();
        assert_eq!(json, r#"[{"struct":"Tags"},{"index":1}]"#);
        let back: Path = serde_json::from_str(&json).unwrap();
        assert_eq!(back, path);
    }
}
