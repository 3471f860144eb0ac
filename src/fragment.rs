//! Fragment type.

use std::fmt;
use std::str::FromStr;

use crate::encoding;
use crate::error::FragmentError;
use crate::normalise::Normalise;

/// A validated fragment, stored without its leading `#`.
///
/// The most permissive component: only ASCII control characters are
/// rejected, so raw `{ } < > | ^ \` and `"` all pass through, and malformed
/// percent escapes are tolerated. The reference parser splits at the first
/// `#`, so a fragment may itself contain `#`.
///
/// # Examples
///
/// ```
/// use uriref::Fragment;
///
/// let fragment = Fragment::parse("row{3}|col").unwrap();
/// assert_eq!(fragment.as_str(), "row{3}|col");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fragment(String);

impl Fragment {
    /// Parses a fragment from a string (without the leading `#`).
    ///
    /// # Errors
    ///
    /// Returns `FragmentError` if the fragment contains an ASCII control
    /// character.
    pub fn parse(input: &str) -> Result<Self, FragmentError> {
        for (i, c) in input.chars().enumerate() {
            if c.is_ascii_control() {
                return Err(FragmentError::InvalidChar { char: c, position: i });
            }
        }
        Ok(Self(input.to_string()))
    }

    /// Creates a fragment from already-decoded text, percent-encoding
    /// whatever RFC 3986 requires.
    #[must_use]
    pub fn encode(decoded: &str) -> Self {
        Self(encoding::percent_encode(decoded, |b| {
            encoding::is_pchar(b) || matches!(b, b'/' | b'?')
        }))
    }

    /// Returns the fully percent-decoded fragment.
    #[must_use]
    pub fn decode(&self) -> String {
        encoding::percent_decode(&self.0)
    }

    /// Returns the fragment as it was parsed.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Normalise for Fragment {
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

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Fragment {
    type Err = FragmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Fragment {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for Fragment {
    type Error = FragmentError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Fragment {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Fragment {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
