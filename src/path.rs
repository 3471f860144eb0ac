//! Path type: an ordered sequence of `/`-separated segments.

use std::fmt;
use std::str::FromStr;

use crate::error::PathError;
use crate::normalise::Normalise;
use crate::scheme::Scheme;
use crate::segment::Segment;

/// A validated path, absolute (leading `/`) or relative.
///
/// The root path `/` is the absolute path of one empty segment; the empty
/// path is the relative path of no segments. Normalization applies
/// percent-encoding normalization per segment and then removes dot-segments
/// per RFC 3986 §5.2.4.
///
/// # Examples
///
/// ```
/// use uriref::{Normalise, Path};
///
/// let path = Path::parse("/foo/bar/../ton").unwrap();
/// assert_eq!(path.normalise().to_string(), "/foo/ton");
///
/// let relative = Path::parse("mid/content=5/../6").unwrap();
/// assert_eq!(relative.normalise().to_string(), "mid/6");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Path {
    absolute: bool,
    segments: Vec<Segment>,
}

impl Path {
    /// Parses a path from a string.
    ///
    /// # Errors
    ///
    /// Returns `PathError` naming the segment and index at which a raw `?`
    /// or `#` appeared.
    pub fn parse(input: &str) -> Result<Self, PathError> {
        if input.is_empty() {
            return Ok(Self::empty());
        }
        let (absolute, body) = match input.strip_prefix('/') {
            Some(rest) => (true, rest),
            None => (false, input),
        };
        let mut segments = Vec::new();
        for (index, raw) in body.split('/').enumerate() {
            let segment = Segment::parse(raw).map_err(|reason| PathError::InvalidSegment {
                segment: raw.to_string(),
                index,
                reason,
            })?;
            segments.push(segment);
        }
        Ok(Self { absolute, segments })
    }

    /// Creates an absolute path from segments. No segments means the root
    /// path `/`.
    #[must_use]
    pub fn absolute(segments: Vec<Segment>) -> Self {
        if segments.is_empty() {
            return Self::root();
        }
        Self {
            absolute: true,
            segments,
        }
    }

    /// Creates a relative path from segments.
    #[must_use]
    pub fn relative(segments: Vec<Segment>) -> Self {
        Self {
            absolute: false,
            segments,
        }
    }

    /// Returns the empty path.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            absolute: false,
            segments: Vec::new(),
        }
    }

    /// Returns the root path `/`.
    #[must_use]
    pub fn root() -> Self {
        Self {
            absolute: true,
            segments: vec![Segment::empty()],
        }
    }

    /// Returns the segments in order.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Returns true for a path with a leading `/`.
    #[must_use]
    pub const fn is_absolute(&self) -> bool {
        self.absolute
    }

    /// Returns true for the empty path.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.absolute && self.segments.is_empty()
    }

    /// Merges a reference path onto this base path per RFC 3986 §5.3 and
    /// removes dot-segments from the result.
    ///
    /// An empty reference path leaves the base unchanged; an absolute
    /// reference path replaces it outright; otherwise the reference is
    /// appended to the base with its last segment dropped.
    #[must_use]
    pub fn merge(&self, reference: &Self) -> Self {
        if reference.is_empty() {
            return self.clone();
        }
        if reference.absolute {
            return reference.clone().remove_dot_segments();
        }
        let mut segments: Vec<Segment> = self
            .segments
            .iter()
            .take(self.segments.len().saturating_sub(1))
            .cloned()
            .collect();
        segments.extend(reference.segments.iter().cloned());
        Self {
            absolute: self.absolute,
            segments,
        }
        .remove_dot_segments()
    }

    /// Removes `.` and `..` segments per RFC 3986 §5.2.4.
    ///
    /// `..` never pops past an absolute root; unmatched leading dot-segments
    /// of a relative path are dropped. A trailing dot-segment leaves the
    /// path ending in `/`.
    pub(crate) fn remove_dot_segments(self) -> Self {
        if !self.segments.iter().any(|s| s.is_dot() || s.is_dot_dot()) {
            return self;
        }
        let last = self.segments.len() - 1;
        let mut out: Vec<Segment> = Vec::with_capacity(self.segments.len());
        for (i, segment) in self.segments.iter().enumerate() {
            if segment.is_dot() {
                if i == last && !out.is_empty() {
                    out.push(Segment::empty());
                }
            } else if segment.is_dot_dot() {
                out.pop();
                if i == last && !out.is_empty() {
                    out.push(Segment::empty());
                }
            } else {
                out.push(segment.clone());
            }
        }
        if self.absolute {
            Self::absolute(out)
        } else {
            Self::relative(out)
        }
    }

    /// True for a leading empty segment followed by more segments, which
    /// renders as a surplus `/` and misleads re-parsing.
    pub(crate) fn has_leading_empty_segment(&self) -> bool {
        self.segments.len() > 1 && self.segments[0].as_str().is_empty()
    }

    /// True when rendering this path would begin with `//`, which a
    /// scheme-less, authority-less reference cannot carry unambiguously.
    pub(crate) fn starts_with_double_slash(&self) -> bool {
        self.absolute && self.has_leading_empty_segment()
    }

    /// Returns the first segment when its text up to a `:` would read back
    /// as a scheme, making a relative rendering ambiguous.
    pub(crate) fn colon_ambiguous_segment(&self) -> Option<&Segment> {
        if self.absolute {
            return None;
        }
        let first = self.segments.first()?;
        let prefix = &first.as_str()[..first.as_str().find(':')?];
        Scheme::parse(prefix).is_ok().then_some(first)
    }

    /// Percent-encodes the first `:` of the first segment when it would
    /// read back as a scheme delimiter. Decode-preserving, so relative
    /// references stay unambiguous after normalization.
    pub(crate) fn escape_colon_in_first_segment(self) -> Self {
        if self.colon_ambiguous_segment().is_none() {
            return self;
        }
        let mut segments = self.segments;
        if let Some(first) = segments.first_mut() {
            *first = Segment::raw(first.as_str().replacen(':', "%3A", 1));
        }
        Self {
            absolute: self.absolute,
            segments,
        }
    }

    /// Drops the leading empty segments that resolution or normalization
    /// can produce on an authority-less reference, anchoring the result at
    /// the root so the rendering never begins with `//` or a phantom `/`.
    pub(crate) fn collapse_leading_empty_segments(self) -> Self {
        if !self.has_leading_empty_segment() {
            return self;
        }
        let trailing: Vec<Segment> = self
            .segments
            .into_iter()
            .skip_while(|s| s.as_str().is_empty())
            .collect();
        Self::absolute(trailing)
    }
}

impl Normalise for Path {
    fn is_normal_form(&self) -> bool {
        self.segments
            .iter()
            .all(|s| s.is_normal_form() && !s.is_dot() && !s.is_dot_dot())
    }

    fn normalise(self) -> Self {
        if self.is_normal_form() {
            return self;
        }
        let segments = self.segments.into_iter().map(Segment::normalise).collect();
        Self {
            absolute: self.absolute,
            segments,
        }
        .remove_dot_segments()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.absolute {
            write!(f, "/")?;
        }
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                write!(f, "/")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

impl FromStr for Path {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for Path {
    type Error = PathError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Path {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Path {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalised(input: &str) -> String {
        Path::parse(input).unwrap().normalise().to_string()
    }

    #[test]
    fn parse_round_trips() {
        for input in ["", "/", "/a/b", "a/b", "/a//b/", "a/", "d;p=1"] {
            assert_eq!(Path::parse(input).unwrap().to_string(), input);
        }
    }

    #[test]
    fn parse_reports_segment_index() {
        let result = Path::parse("/a/b?c");
        assert!(matches!(
            result,
            Err(PathError::InvalidSegment { segment, index: 1, .. }) if segment == "b?c"
        ));
    }

    #[test]
    fn empty_and_root_are_distinct() {
        let empty = Path::parse("").unwrap();
        let root = Path::parse("/").unwrap();
        assert!(empty.is_empty());
        assert!(root.is_absolute());
        assert_ne!(empty, root);
        assert_eq!(root, Path::root());
    }

    #[test]
    fn dot_segment_fixtures() {
        assert_eq!(normalised(""), "");
        assert_eq!(normalised("."), "");
        assert_eq!(normalised(".."), "");
        assert_eq!(normalised("/.."), "/");
        assert_eq!(normalised("/."), "/");
        assert_eq!(normalised("/foo/bar/../ton"), "/foo/ton");
        assert_eq!(normalised("mid/content=5/../6"), "mid/6");
        assert_eq!(normalised("/../../../../"), "/");
    }

    #[test]
    fn trailing_dot_segment_leaves_trailing_slash() {
        assert_eq!(normalised("/a/b/.."), "/a/");
        assert_eq!(normalised("/a/."), "/a/");
        assert_eq!(normalised("a/b/.."), "a/");
    }

    #[test]
    fn dot_dot_never_pops_past_absolute_root() {
        assert_eq!(normalised("/../a"), "/a");
        assert_eq!(normalised("/a/../../b"), "/b");
    }

    #[test]
    fn unmatched_leading_dots_of_relative_path_are_dropped() {
        assert_eq!(normalised("../a"), "a");
        assert_eq!(normalised("./a"), "a");
    }

    #[test]
    fn normalise_keeps_empty_segments() {
        assert_eq!(normalised("/a//b"), "/a//b");
    }

    #[test]
    fn normalise_applies_segment_encoding() {
        assert_eq!(normalised("/%61/%2E%2E/b"), "/b");
    }

    #[test]
    fn normal_form_detection() {
        assert!(Path::parse("/a/b").unwrap().is_normal_form());
        assert!(!Path::parse("/a/./b").unwrap().is_normal_form());
        assert!(!Path::parse("/%61").unwrap().is_normal_form());
    }

    #[test]
    fn merge_empty_reference_keeps_base() {
        let base = Path::parse("/b/c/d;p").unwrap();
        assert_eq!(base.merge(&Path::empty()), base);
    }

    #[test]
    fn merge_absolute_reference_replaces_base() {
        let base = Path::parse("/b/c/d;p").unwrap();
        let reference = Path::parse("/g/../h").unwrap();
        assert_eq!(base.merge(&reference).to_string(), "/h");
    }

    #[test]
    fn merge_relative_reference_drops_last_base_segment() {
        let base = Path::parse("/b/c/d;p").unwrap();
        assert_eq!(base.merge(&Path::parse("g").unwrap()).to_string(), "/b/c/g");
        assert_eq!(base.merge(&Path::parse("..").unwrap()).to_string(), "/b/");
        assert_eq!(
            base.merge(&Path::parse("../../../g").unwrap()).to_string(),
            "/g"
        );
    }

    #[test]
    fn double_slash_detection() {
        assert!(Path::parse("//a").unwrap().starts_with_double_slash());
        assert!(!Path::parse("/a").unwrap().starts_with_double_slash());
        assert!(!Path::parse("/").unwrap().starts_with_double_slash());
    }

    #[test]
    fn collapse_leading_empty_segments_disambiguates() {
        let path = Path::parse("//a/b").unwrap().collapse_leading_empty_segments();
        assert_eq!(path.to_string(), "/a/b");
        let all_empty = Path::parse("//").unwrap().collapse_leading_empty_segments();
        assert_eq!(all_empty.to_string(), "/");
    }

    #[test]
    fn escape_colon_keeps_decoding() {
        let path = Path::parse("a:b/c").unwrap().escape_colon_in_first_segment();
        assert_eq!(path.to_string(), "a%3Ab/c");
        assert!(path.colon_ambiguous_segment().is_none());
        assert_eq!(path.segments()[0].decode(), "a:b");
    }

    #[test]
    fn colon_ambiguity_only_for_scheme_like_prefixes() {
        assert!(Path::parse("a:b").unwrap().colon_ambiguous_segment().is_some());
        assert!(Path::parse("1a:b").unwrap().colon_ambiguous_segment().is_none());
        assert!(Path::parse("/a:b").unwrap().colon_ambiguous_segment().is_none());
        assert!(Path::parse("a/b:c").unwrap().colon_ambiguous_segment().is_none());
    }
}
