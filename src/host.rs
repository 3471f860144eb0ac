//! Host type: registered names and bracketed IP literals.

use std::fmt;
use std::str::FromStr;

use crate::encoding;
use crate::error::HostError;
use crate::normalise::Normalise;

/// A validated host.
///
/// Two syntactic forms exist: a percent-encoded registered name, and a
/// bracketed IP literal whose content between `[` and `]` is accepted
/// verbatim without address validation. Equality is exact-string and
/// case-sensitive; lowercasing is a normalization, not an equality rule.
///
/// # Examples
///
/// ```
/// use uriref::{Host, Normalise};
///
/// let host = Host::parse("Example.COM").unwrap();
/// assert_eq!(host.as_str(), "Example.COM");
/// assert_eq!(host.normalise().as_str(), "example.com");
///
/// let literal = Host::parse("[::1]").unwrap();
/// assert!(literal.is_ip_literal());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Host {
    /// A registered name, possibly percent-encoded, possibly empty
    RegisteredName(String),
    /// A bracketed IP literal, stored with its brackets
    IpLiteral(String),
}

impl Host {
    /// Parses a host from a string.
    ///
    /// Input beginning with `[` is an IP literal: the closing `]` must be
    /// the final character and the content must be non-empty with no nested
    /// bracket. Anything else is a registered name.
    ///
    /// # Errors
    ///
    /// Returns `HostError` for malformed brackets, or for a raw character a
    /// registered name requires to be percent-encoded.
    pub fn parse(input: &str) -> Result<Self, HostError> {
        if input.starts_with('[') {
            return Self::parse_ip_literal(input);
        }
        for (i, c) in input.chars().enumerate() {
            if !Self::is_valid_char(c) {
                return Err(HostError::InvalidChar { char: c, position: i });
            }
        }
        Ok(Self::RegisteredName(input.to_string()))
    }

    /// Creates a registered name from already-decoded text, percent-encoding
    /// whatever the grammar requires.
    ///
    /// # Examples
    ///
    /// ```
    /// use uriref::Host;
    ///
    /// let host = Host::encode("caf\u{e9}.example");
    /// assert_eq!(host.as_str(), "caf%C3%A9.example");
    /// ```
    #[must_use]
    pub fn encode(decoded: &str) -> Self {
        Self::RegisteredName(encoding::percent_encode(decoded, keep_in_host))
    }

    /// Returns the fully percent-decoded host, permissive on malformed
    /// escapes. IP literals decode to themselves.
    #[must_use]
    pub fn decode(&self) -> String {
        match self {
            Self::RegisteredName(raw) => encoding::percent_decode(raw),
            Self::IpLiteral(raw) => raw.clone(),
        }
    }

    /// Returns true for the bracketed IP literal form.
    #[must_use]
    pub const fn is_ip_literal(&self) -> bool {
        matches!(self, Self::IpLiteral(_))
    }

    /// Returns the host as it was parsed.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::RegisteredName(raw) | Self::IpLiteral(raw) => raw,
        }
    }

    /// Returns true if the character may appear raw in a registered name.
    #[must_use]
    pub fn is_valid_char(c: char) -> bool {
        !c.is_control() && !matches!(c, ' ' | '@' | ':' | '/' | '?' | '#' | '[' | ']')
    }

    fn parse_ip_literal(input: &str) -> Result<Self, HostError> {
        let Some(close) = input.find(']') else {
            return Err(HostError::UnterminatedBracket {
                host: input.to_string(),
            });
        };
        if close != input.len() - 1 {
            return Err(HostError::TrailingAfterBracket {
                host: input.to_string(),
            });
        }
        let content = &input[1..close];
        if content.is_empty() {
            return Err(HostError::EmptyBracket);
        }
        if content.contains('[') {
            return Err(HostError::NestedBracket {
                host: input.to_string(),
            });
        }
        Ok(Self::IpLiteral(input.to_string()))
    }
}

impl Normalise for Host {
    fn is_normal_form(&self) -> bool {
        match self {
            Self::RegisteredName(raw) => encoding::is_normal_case_insensitive(raw),
            Self::IpLiteral(raw) => !raw.bytes().any(|b| b.is_ascii_uppercase()),
        }
    }

    fn normalise(self) -> Self {
        if self.is_normal_form() {
            return self;
        }
        match self {
            Self::RegisteredName(raw) => {
                Self::RegisteredName(encoding::normalize_case_insensitive(&raw).into_owned())
            }
            Self::IpLiteral(raw) => Self::IpLiteral(raw.to_ascii_lowercase()),
        }
    }
}

fn keep_in_host(byte: u8) -> bool {
    encoding::is_unreserved(byte) || encoding::is_sub_delim(byte)
}

impl fmt::Display for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Host {
    type Err = HostError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Host {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl TryFrom<&str> for Host {
    type Error = HostError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Host {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Host {
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

    #[test]
    fn parse_registered_name() {
        let host = Host::parse("example.com").unwrap();
        assert_eq!(host, Host::RegisteredName("example.com".to_string()));
    }

    #[test]
    fn parse_empty_registered_name() {
        // RFC 3986 allows a zero-length reg-name, e.g. in file:/// URIs.
        let host = Host::parse("").unwrap();
        assert_eq!(host.as_str(), "");
    }

    #[test]
    fn parse_percent_encoded_name() {
        let host = Host::parse("caf%C3%A9.example").unwrap();
        assert_eq!(host.decode(), "caf\u{e9}.example");
    }

    #[test]
    fn parse_ip_literal() {
        let host = Host::parse("[2001:db8::1]").unwrap();
        assert!(host.is_ip_literal());
        assert_eq!(host.as_str(), "[2001:db8::1]");
    }

    #[test]
    fn ip_literal_content_is_not_validated() {
        assert!(Host::parse("[not-an-address]").is_ok());
    }

    #[test]
    fn unterminated_bracket_fails() {
        assert!(matches!(
            Host::parse("[::1"),
            Err(HostError::UnterminatedBracket { .. })
        ));
    }

    #[test]
    fn empty_bracket_fails() {
        assert!(matches!(Host::parse("[]"), Err(HostError::EmptyBracket)));
    }

    #[test]
    fn nested_bracket_fails() {
        assert!(matches!(
            Host::parse("[[::1]"),
            Err(HostError::NestedBracket { .. })
        ));
    }

    #[test]
    fn trailing_after_bracket_fails() {
        assert!(matches!(
            Host::parse("[::1]x"),
            Err(HostError::TrailingAfterBracket { .. })
        ));
    }

    #[test]
    fn raw_colon_fails() {
        assert!(matches!(
            Host::parse("host:80"),
            Err(HostError::InvalidChar { char: ':', position: 4 })
        ));
    }

    #[test]
    fn raw_space_and_control_fail() {
        assert!(Host::parse("a b").is_err());
        assert!(Host::parse("a\tb").is_err());
    }

    #[test]
    fn equality_is_case_sensitive() {
        assert_ne!(Host::parse("EXAMPLE.com").unwrap(), Host::parse("example.com").unwrap());
    }

    #[test]
    fn normalise_lowercases_registered_name() {
        let host = Host::parse("Example.COM").unwrap().normalise();
        assert_eq!(host.as_str(), "example.com");
        assert!(host.is_normal_form());
    }

    #[test]
    fn normalise_collapses_unreserved_escapes() {
        let host = Host::parse("ex%41mple.com").unwrap().normalise();
        assert_eq!(host.as_str(), "example.com");
    }

    #[test]
    fn normalise_lowercases_ip_literal() {
        let host = Host::parse("[2001:DB8::1]").unwrap().normalise();
        assert_eq!(host.as_str(), "[2001:db8::1]");
    }

    #[test]
    fn encode_round_trips_through_decode() {
        let host = Host::encode("host with space");
        assert_eq!(host.as_str(), "host%20with%20space");
        assert_eq!(host.decode(), "host with space");
        assert!(Host::parse(host.as_str()).is_ok());
    }
}
