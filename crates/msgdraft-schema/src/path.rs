//! Typed field paths for addressing slots within a message instance
//!
//! Provides [`FieldPath`] for dot-delimited addressing of nested fields,
//! with optional array indices per segment.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// One step of a [`FieldPath`]: a field name with an optional array index
///
/// # Examples
/// - `pins` → `PathSegment { name: "pins", index: None }`
/// - `pins[2]` → `PathSegment { name: "pins", index: Some(2) }`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PathSegment {
    name: String,
    index: Option<usize>,
}

impl PathSegment {
    /// Create a plain segment
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            index: None,
        }
    }

    /// Create an array-indexed segment
    #[inline]
    #[must_use]
    pub fn indexed(name: impl Into<String>, index: usize) -> Self {
        Self {
            name: name.into(),
            index: Some(index),
        }
    }

    /// Field name addressed by this segment
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Array index, if the segment addresses an element
    #[inline]
    #[must_use]
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    /// Copy of this segment with the index dropped
    #[inline]
    #[must_use]
    pub fn unindexed(&self) -> Self {
        Self::new(self.name.clone())
    }
}

impl Display for PathSegment {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.index {
            Some(i) => write!(f, "{}[{}]", self.name, i),
            None => write!(f, "{}", self.name),
        }
    }
}

impl FromStr for PathSegment {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(PathError::EmptySegment);
        }

        let (name, index) = match s.find('[') {
            None => (s, None),
            Some(open) => {
                let (name, rest) = s.split_at(open);
                let digits = rest
                    .strip_prefix('[')
                    .and_then(|r| r.strip_suffix(']'))
                    .ok_or_else(|| PathError::InvalidIndex(s.to_string()))?;
                let index: usize = digits
                    .parse()
                    .map_err(|_| PathError::InvalidIndex(s.to_string()))?;
                (name, Some(index))
            }
        };

        if name.is_empty() {
            return Err(PathError::EmptySegment);
        }
        if name.contains(|c: char| !c.is_alphanumeric() && c != '_') {
            return Err(PathError::InvalidSegment(name.to_string()));
        }

        Ok(Self {
            name: name.to_string(),
            index,
        })
    }
}

/// Path to a field slot within a message instance
///
/// A dot-delimited sequence of [`PathSegment`]s. The empty path denotes the
/// instance root. Segments may carry an array index (`pins[0].mode`), which
/// addresses an element at the value level; the schema-level identity of a
/// path ignores indices (see [`FieldPath::canonical`]).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FieldPath(Vec<PathSegment>);

impl FieldPath {
    /// Create new path from segments
    #[inline]
    #[must_use]
    pub fn new(segments: Vec<PathSegment>) -> Self {
        Self(segments)
    }

    /// Empty path (instance root)
    #[inline]
    #[must_use]
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Path with a single plain segment
    #[inline]
    #[must_use]
    pub fn single(name: impl Into<String>) -> Self {
        Self(vec![PathSegment::new(name)])
    }

    /// Get path segments
    #[inline]
    #[must_use]
    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    /// Get number of segments
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if path is the instance root
    #[inline]
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Check if path has no segments (same as [`FieldPath::is_root`])
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get parent path (if not root)
    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        if self.0.is_empty() {
            None
        } else {
            Some(Self(self.0[..self.0.len() - 1].to_vec()))
        }
    }

    /// Get last segment (if not root)
    #[inline]
    #[must_use]
    pub fn last(&self) -> Option<&PathSegment> {
        self.0.last()
    }

    /// Get the field name of the last segment (if not root)
    #[inline]
    #[must_use]
    pub fn last_name(&self) -> Option<&str> {
        self.0.last().map(PathSegment::name)
    }

    /// Append a plain segment, returning new path
    #[inline]
    #[must_use]
    pub fn child(&self, name: impl Into<String>) -> Self {
        let mut new = self.clone();
        new.0.push(PathSegment::new(name));
        new
    }

    /// Append an indexed segment, returning new path
    #[inline]
    #[must_use]
    pub fn child_indexed(&self, name: impl Into<String>, index: usize) -> Self {
        let mut new = self.clone();
        new.0.push(PathSegment::indexed(name, index));
        new
    }

    /// Copy of this path with the last segment given an array index
    ///
    /// The root path is returned unchanged.
    #[inline]
    #[must_use]
    pub fn with_last_index(&self, index: usize) -> Self {
        let mut new = self.clone();
        if let Some(last) = new.0.last_mut() {
            *last = PathSegment::indexed(last.name().to_string(), index);
        }
        new
    }

    /// First `depth` segments as a new path
    ///
    /// `depth` greater than the length yields the whole path.
    #[inline]
    #[must_use]
    pub fn prefix(&self, depth: usize) -> Self {
        Self(self.0[..depth.min(self.0.len())].to_vec())
    }

    /// Check if this path is a prefix of another
    ///
    /// # Examples
    /// - `pin.mode` is prefix of `pin.mode.level`
    /// - `pin.mode` is NOT prefix of `pin.other`
    #[inline]
    #[must_use]
    pub fn is_prefix_of(&self, other: &Self) -> bool {
        if self.0.len() > other.0.len() {
            return false;
        }
        self.0 == other.0[..self.0.len()]
    }

    /// Schema-level identity of this path: every array index stripped
    ///
    /// Two value paths addressing different elements of the same repeated
    /// field canonicalize to the same path.
    #[must_use]
    pub fn canonical(&self) -> Self {
        if self.0.iter().all(|seg| seg.index().is_none()) {
            return self.clone();
        }
        Self(self.0.iter().map(PathSegment::unindexed).collect())
    }

    /// Iterator over segments from root to leaf
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &PathSegment> {
        self.0.iter()
    }
}

impl Display for FieldPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for seg in &self.0 {
            if !first {
                write!(f, ".")?;
            }
            write!(f, "{seg}")?;
            first = false;
        }
        Ok(())
    }
}

impl FromStr for FieldPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Ok(Self::root());
        }

        let segments: Vec<PathSegment> = s
            .split('.')
            .map(PathSegment::from_str)
            .collect::<Result<_, _>>()?;

        Ok(Self(segments))
    }
}

impl From<Vec<PathSegment>> for FieldPath {
    fn from(segments: Vec<PathSegment>) -> Self {
        Self(segments)
    }
}

impl Default for FieldPath {
    fn default() -> Self {
        Self::root()
    }
}

/// Errors related to field paths
#[derive(Debug, thiserror::Error)]
pub enum PathError {
    /// Empty segment in path
    #[error("path contains empty segment")]
    EmptySegment,

    /// Invalid segment characters
    #[error("invalid segment: {0} (must be alphanumeric or underscore)")]
    InvalidSegment(String),

    /// Malformed array index notation
    #[error("invalid array index in segment: {0}")]
    InvalidIndex(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_new_and_segments() {
        let path = FieldPath::new(vec![PathSegment::new("a"), PathSegment::new("b")]);
        assert_eq!(path.len(), 2);
        assert_eq!(path.segments()[0].name(), "a");
        assert_eq!(path.segments()[1].name(), "b");
    }

    #[test]
    fn path_root() {
        let path = FieldPath::root();
        assert!(path.is_root());
        assert_eq!(path.len(), 0);
    }

    #[test]
    fn path_single() {
        let path = FieldPath::single("only");
        assert_eq!(path.to_string(), "only");
    }

    #[test]
    fn path_parent() {
        let path: FieldPath = "a.b.c".parse().unwrap();
        let parent = path.parent().unwrap();
        assert_eq!(parent.to_string(), "a.b");
    }

    #[test]
    fn path_root_parent_is_none() {
        assert!(FieldPath::root().parent().is_none());
    }

    #[test]
    fn path_last() {
        let path: FieldPath = "first.middle.last".parse().unwrap();
        assert_eq!(path.last_name(), Some("last"));
        assert_eq!(path.last().unwrap().index(), None);
    }

    #[test]
    fn path_child() {
        let parent = FieldPath::single("parent");
        let child = parent.child("child");
        assert_eq!(child.to_string(), "parent.child");
    }

    #[test]
    fn path_child_indexed() {
        let path = FieldPath::single("pins").child_indexed("levels", 3);
        assert_eq!(path.to_string(), "pins.levels[3]");
    }

    #[test]
    fn path_with_last_index() {
        let path: FieldPath = "a.pins".parse().unwrap();
        assert_eq!(path.with_last_index(0).to_string(), "a.pins[0]");
        assert!(FieldPath::root().with_last_index(1).is_root());
    }

    #[test]
    fn path_prefix() {
        let path: FieldPath = "a.b.c".parse().unwrap();
        assert_eq!(path.prefix(2).to_string(), "a.b");
        assert_eq!(path.prefix(0), FieldPath::root());
        assert_eq!(path.prefix(9), path);
    }

    #[test]
    fn path_is_prefix_of() {
        let a: FieldPath = "a.b".parse().unwrap();
        let b: FieldPath = "a.b.c".parse().unwrap();
        let c: FieldPath = "a.x".parse().unwrap();
        assert!(a.is_prefix_of(&b));
        assert!(a.is_prefix_of(&a));
        assert!(!b.is_prefix_of(&a));
        assert!(!a.is_prefix_of(&c));
    }

    #[test]
    fn path_canonical_strips_indices() {
        let path: FieldPath = "pins[0].config.levels[3]".parse().unwrap();
        assert_eq!(path.canonical().to_string(), "pins.config.levels");
    }

    #[test]
    fn path_canonical_is_identity_without_indices() {
        let path: FieldPath = "a.b.c".parse().unwrap();
        assert_eq!(path.canonical(), path);
    }

    #[test]
    fn path_display_roundtrip() {
        let path: FieldPath = "a[1].b.c[0]".parse().unwrap();
        assert_eq!(path.to_string(), "a[1].b.c[0]");
    }

    #[test]
    fn path_from_str_empty_is_root() {
        let path: FieldPath = "".parse().unwrap();
        assert!(path.is_root());
    }

    #[test]
    fn path_from_str_empty_segment() {
        let result: Result<FieldPath, _> = "a..b".parse();
        assert!(matches!(result, Err(PathError::EmptySegment)));
    }

    #[test]
    fn path_from_str_invalid_chars() {
        let result: Result<FieldPath, _> = "a.b-c".parse();
        assert!(matches!(result, Err(PathError::InvalidSegment(_))));
    }

    #[test]
    fn segment_parses_index() {
        let seg: PathSegment = "pins[12]".parse().unwrap();
        assert_eq!(seg.name(), "pins");
        assert_eq!(seg.index(), Some(12));
    }

    #[test]
    fn segment_rejects_malformed_index() {
        assert!(matches!(
            "pins[".parse::<PathSegment>(),
            Err(PathError::InvalidIndex(_))
        ));
        assert!(matches!(
            "pins[x]".parse::<PathSegment>(),
            Err(PathError::InvalidIndex(_))
        ));
        assert!(matches!(
            "pins[1]x".parse::<PathSegment>(),
            Err(PathError::InvalidIndex(_))
        ));
    }

    #[test]
    fn segment_rejects_bare_index() {
        assert!(matches!(
            "[0]".parse::<PathSegment>(),
            Err(PathError::EmptySegment)
        ));
    }

    #[test]
    fn path_iter() {
        let path: FieldPath = "a.b".parse().unwrap();
        let names: Vec<_> = path.iter().map(PathSegment::name).collect();
        assert_eq!(names, vec!["a", "b"]);
    }
}
