//! Field-path trail used to locate a validation failure inside a payload

use std::fmt;

use serde::{Serialize, Serializer};

/// One step in a field path: an object key or a list index
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

/// Location of a value relative to the payload root.
///
/// Renders as `data_source.info_list.notion_info_list[0].workspace_id`.
/// The empty path renders as `(root)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldPath(Vec<PathSegment>);

impl FieldPath {
    /// The payload root
    pub fn root() -> Self {
        Self::default()
    }

    /// Child path for an object key
    pub fn key(&self, name: impl Into<String>) -> Self {
        let mut segments = self.0.clone();
        segments.push(PathSegment::Key(name.into()));
        Self(segments)
    }

    /// Child path for a list element
    pub fn index(&self, index: usize) -> Self {
        let mut segments = self.0.clone();
        segments.push(PathSegment::Index(index));
        Self(segments)
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "(root)");
        }

        for (position, segment) in self.0.iter().enumerate() {
            match segment {
                PathSegment::Key(name) if position == 0 => write!(f, "{}", name)?,
                PathSegment::Key(name) => write!(f, ".{}", name)?,
                PathSegment::Index(index) => write!(f, "[{}]", index)?,
            }
        }

        Ok(())
    }
}

impl Serialize for FieldPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
