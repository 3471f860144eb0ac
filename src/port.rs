//! Port type.

use std::fmt;
use std::str::FromStr;

use crate::error::PortError;
use crate::normalise::Normalise;

/// A validated port in the range 1-65535.
///
/// The spelling is preserved, so `0080` round-trips as written and compares
/// unequal to `80` until normalised.
///
/// # Examples
///
/// ```
/// use uriref::{Normalise, Port};
///
/// let port = Port::parse("0080").unwrap();
/// assert_eq!(port.number(), 80);
/// assert_eq!(port.to_string(), "0080");
/// assert_eq!(port.normalise().to_string(), "80");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Port {
    number: u16,
    raw: String,
}

impl Port {
    /// Parses a port from a string.
    ///
    /// Leading zeros are accepted and preserved. A leading `+` is a plain
    /// invalid character, not sign syntax.
    ///
    /// # Errors
    ///
    /// Returns `PortError` if the input is empty, contains a non-digit, or
    /// denotes a value outside 1-65535; the offending literal is preserved
    /// in the error.
    pub fn parse(input: &str) -> Result<Self, PortError> {
        if input.is_empty() {
            return Err(PortError::Empty);
        }
        for (i, c) in input.chars().enumerate() {
            if !c.is_ascii_digit() {
                return Err(PortError::InvalidChar { char: c, position: i });
            }
        }
        let significant = input.trim_start_matches('0');
        if significant.len() > 5 {
            return Err(PortError::OutOfRange {
                value: input.to_string(),
            });
        }
        let value: u32 = significant.parse().unwrap_or(0);
        let number = u16::try_from(value).unwrap_or(0);
        if number == 0 {
            return Err(PortError::OutOfRange {
                value: input.to_string(),
            });
        }
        Ok(Self {
            number,
            raw: input.to_string(),
        })
    }

    /// Creates a port from a number.
    ///
    /// # Errors
    ///
    /// Returns `PortError::OutOfRange` for 0.
    pub fn of(number: u16) -> Result<Self, PortError> {
        if number == 0 {
            return Err(PortError::OutOfRange {
                value: number.to_string(),
            });
        }
        Ok(Self {
            number,
            raw: number.to_string(),
        })
    }

    /// Returns the numeric value.
    #[must_use]
    pub const fn number(&self) -> u16 {
        self.number
    }

    /// Returns the port as it was parsed.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl Normalise for Port {
    fn is_normal_form(&self) -> bool {
        !self.raw.starts_with('0')
    }

    fn normalise(self) -> Self {
        if self.is_normal_form() {
            return self;
        }
        Self {
            raw: self.number.to_string(),
            number: self.number,
        }
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

impl FromStr for Port {
    type Err = PortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Port {
    fn as_ref(&self) -> &str {
        &self.raw
    }
}

impl TryFrom<&str> for Port {
    type Error = PortError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl TryFrom<u16> for Port {
    type Error = PortError;

    fn try_from(number: u16) -> Result<Self, Self::Error> {
        Self::of(number)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Port {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.raw)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Port {
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
    fn parse_simple_port() {
        let port = Port::parse("8080").unwrap();
        assert_eq!(port.number(), 8080);
        assert_eq!(port.to_string(), "8080");
    }

    #[test]
    fn parse_preserves_leading_zeros() {
        let port = Port::parse("0080").unwrap();
        assert_eq!(port.number(), 80);
        assert_eq!(port.to_string(), "0080");
        assert_ne!(port, Port::parse("80").unwrap());
    }

    #[test]
    fn parse_empty_fails() {
        assert!(matches!(Port::parse(""), Err(PortError::Empty)));
    }

    #[test]
    fn parse_leading_plus_fails() {
        assert!(matches!(
            Port::parse("+80"),
            Err(PortError::InvalidChar { char: '+', position: 0 })
        ));
    }

    #[test]
    fn parse_non_numeric_fails() {
        assert!(matches!(
            Port::parse("80a"),
            Err(PortError::InvalidChar { char: 'a', position: 2 })
        ));
    }

    #[test]
    fn parse_zero_fails_with_literal() {
        assert!(matches!(
            Port::parse("0"),
            Err(PortError::OutOfRange { value }) if value == "0"
        ));
    }

    #[test]
    fn parse_out_of_range_fails_with_literal() {
        assert!(matches!(
            Port::parse("65536"),
            Err(PortError::OutOfRange { value }) if value == "65536"
        ));
        assert!(matches!(
            Port::parse("000000000099999999"),
            Err(PortError::OutOfRange { .. })
        ));
    }

    #[test]
    fn of_rejects_zero() {
        assert!(matches!(Port::of(0), Err(PortError::OutOfRange { .. })));
        assert_eq!(Port::of(443).unwrap().number(), 443);
    }

    #[test]
    fn normalise_strips_leading_zeros() {
        let port = Port::parse("000443").unwrap().normalise();
        assert_eq!(port.to_string(), "443");
        assert!(port.is_normal_form());
        assert_eq!(port, Port::of(443).unwrap());
    }
}
