//! Path segment type.

use std::fmt;
use std::str::FromStr;

use crate::encoding;
use crate::error::SegmentError;
use crate::normalise::Normalise;

/// A single path segment.
///
/// `/` is the path separator and is illegal raw inside a lone segment, as
/// are `?` and `#`. Empty segments are legal; `a//b` is three segments.
///
/// # Examples
///
/// ```
/// use uriref::Segment;
///
/// let segment = Segment::parse("item%201").unwrap();
/// assert_eq!(segment.decode(), "item 1");
/// assert!(Segment::parse("a/b").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Segment(String);

impl Segment {
    /// Parses a segment from a string.
    ///
    /// # Errors
    ///
    /// Returns `SegmentError` if the segment contains a raw `/`, `?`, or
    /// `#`.
    pub fn parse(input: &str) -> Result<Self, SegmentError> {
        for (i, c) in input.chars().enumerate() {
            if matches!(c, '/' | '?' | '#') {
                return Err(SegmentError::InvalidChar { char: c, position: i });
            }
        }
        Ok(Self(input.to_string()))
    }

    /// Creates a segment from already-decoded text, percent-encoding
    /// whatever the grammar requires.
    #[must_use]
    pub fn encode(decoded: &str) -> Self {
        Self(encoding::percent_encode(decoded, encoding::is_pchar))
    }

    /// Returns the empty segment.
    #[must_use]
    pub fn empty() -> Self {
        Self(String::new())
    }

    /// Wraps text already known to satisfy the segment grammar.
    pub(crate) fn raw(text: String) -> Self {
        Self(text)
    }

    /// Returns the fully percent-decoded segment.
    #[must_use]
    pub fn decode(&self) -> String {
        encoding::percent_decode(&self.0)
    }

    /// Returns the segment as it was parsed.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true for the `.` dot-segment.
    #[must_use]
    pub fn is_dot(&self) -> bool {
        self.0 == "."
    }

    /// Returns true for the `..` dot-segment.
    #[must_use]
    pub fn is_dot_dot(&self) -> bool {
        self.0 == ".."
    }
}

impl Normalise for Segment {
    fn is_normal_form(&self) -> bool {
        encoding::is_normal(&self.0)
    }

    fn normalise(self) -> Self {
        if self.is_normal_form() {
            return self;
        }
        Self(encoding::normalize(&self.0).into_owned())
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Segment {
    type Err = SegmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Segment {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for Segment {
    type Error = SegmentError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_plain_segment() {
        assert_eq!(Segment::parse("users").unwrap().as_str(), "users");
    }

    #[test]
    fn parse_allows_colon_and_at() {
        assert!(Segment::parse("d;p=1").is_ok());
        assert!(Segment::parse("v1:2@x").is_ok());
    }

    #[test]
    fn parse_empty_segment() {
        assert_eq!(Segment::parse("").unwrap(), Segment::empty());
    }

    #[test]
    fn parse_slash_fails() {
        assert!(matches!(
            Segment::parse("a/b"),
            Err(SegmentError::InvalidChar { char: '/', position: 1 })
        ));
    }

    #[test]
    fn parse_query_and_fragment_delimiters_fail() {
        assert!(Segment::parse("a?b").is_err());
        assert!(Segment::parse("a#b").is_err());
    }

    #[test]
    fn dot_segments_are_recognised() {
        assert!(Segment::parse(".").unwrap().is_dot());
        assert!(Segment::parse("..").unwrap().is_dot_dot());
        assert!(!Segment::parse("...").unwrap().is_dot_dot());
    }

    #[test]
    fn encoded_dot_is_not_a_dot_until_normalised() {
        let segment = Segment::parse("%2E").unwrap();
        assert!(!segment.is_dot());
        assert!(segment.normalise().is_dot());
    }

    #[test]
    fn encode_escapes_slash() {
        let segment = Segment::encode("a/b");
        assert_eq!(segment.as_str(), "a%2Fb");
        assert_eq!(segment.decode(), "a/b");
    }
}
