use std::collections::VecDeque;
use std::fmt;

/// One step from a wire node into one of its children.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// A field of a record.
    Field(String),
    /// An element of a list.
    Index(usize),
    /// An entry of a key-unique mapping.
    Key(String),
}

/// The location of a value inside a wire tree, rendered as `$.fileSplit.path`,
/// `$.partitionKeys[1].value` or `$.customSplitInfo["key"]`.
///
/// Decoding fails at the innermost value and the path is built while the error
/// propagates outwards, so segments are prepended rather than appended.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct WirePath {
    segments: VecDeque<PathSegment>,
}

impl WirePath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn from_segment(segment: PathSegment) -> Self {
        Self {
            segments: VecDeque::from([segment]),
        }
    }

    pub fn prepend(&mut self, segment: PathSegment) {
        self.segments.push_front(segment);
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> impl Iterator<Item = &PathSegment> {
        self.segments.iter()
    }
}

impl fmt::Display for WirePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "$")?;
        for segment in &self.segments {
            match segment {
                PathSegment::Field(name) => write!(f, ".{name}")?,
                PathSegment::Index(index) => write!(f, "[{index}]")?,
                PathSegment::Key(key) => write!(f, "[{key:?}]")?,
            }
        }
        Ok(())
    }
}
