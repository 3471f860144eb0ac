//! Scheme type and the process-wide scheme registry.
//!
//! The registry is the one piece of shared state in the crate: an
//! append-only table mapping canonical (lowercase) scheme names to their
//! default ports, pre-seeded with `http`, `https`, `ftp`, and `ssh`. It is
//! reachable only through [`Scheme::register`], [`Scheme::registered`], and
//! [`Scheme::default_port`].

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use crate::error::SchemeError;
use crate::normalise::Normalise;

struct Registration {
    canonical: Arc<str>,
    default_port: Option<u16>,
}

fn registry() -> &'static RwLock<HashMap<String, Registration>> {
    static REGISTRY: OnceLock<RwLock<HashMap<String, Registration>>> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        let mut map = HashMap::new();
        for (name, port) in [("http", 80), ("https", 443), ("ftp", 21), ("ssh", 22)] {
            map.insert(
                name.to_string(),
                Registration {
                    canonical: Arc::from(name),
                    default_port: Some(port),
                },
            );
        }
        RwLock::new(map)
    })
}

/// A validated URI scheme.
///
/// Parsing preserves case; equality is over the parsed text, so `HTTP` and
/// `http` are distinct values until normalised. The canonical form is
/// lowercase, and for registered schemes [`normalise`](Normalise::normalise)
/// returns the shared canonical instance.
///
/// # Examples
///
/// ```
/// use uriref::{Normalise, Scheme};
///
/// let scheme = Scheme::parse("HTTP").unwrap();
/// assert_eq!(scheme.as_str(), "HTTP");
///
/// let canonical = scheme.normalise();
/// assert_eq!(canonical.as_str(), "http");
/// assert_eq!(canonical.default_port(), Some(80));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Scheme {
    name: Arc<str>,
}

impl Scheme {
    /// Parses a scheme from a string.
    ///
    /// # Errors
    ///
    /// Returns `SchemeError` if the input is empty, does not start with an
    /// ASCII letter, or contains a character other than letters, digits,
    /// `+`, `-`, and `.`.
    pub fn parse(input: &str) -> Result<Self, SchemeError> {
        let mut chars = input.chars().enumerate();
        match chars.next() {
            None => return Err(SchemeError::Empty),
            Some((_, c)) if !c.is_ascii_alphabetic() => {
                return Err(SchemeError::MustStartWithLetter { found: c });
            }
            Some(_) => {}
        }
        for (i, c) in chars {
            if !c.is_ascii_alphanumeric() && !matches!(c, '+' | '-' | '.') {
                return Err(SchemeError::InvalidChar { char: c, position: i });
            }
        }
        Ok(Self {
            name: Arc::from(input),
        })
    }

    /// Registers a scheme name with an optional default port.
    ///
    /// The name is canonicalized to lowercase before insertion, so
    /// registration is case-insensitive. Registration is append-only:
    /// re-registering an existing name is a no-op that returns the existing
    /// shared instance, keeping whatever default port was registered first.
    ///
    /// # Errors
    ///
    /// Returns `SchemeError` if the name is not a valid scheme.
    ///
    /// # Examples
    ///
    /// ```
    /// use uriref::Scheme;
    ///
    /// let gopher = Scheme::register("gopher", Some(70)).unwrap();
    /// assert_eq!(gopher.default_port(), Some(70));
    ///
    /// // Re-registration keeps the original default port.
    /// let again = Scheme::register("GOPHER", Some(7070)).unwrap();
    /// assert_eq!(again.default_port(), Some(70));
    /// ```
    pub fn register(name: &str, default_port: Option<u16>) -> Result<Self, SchemeError> {
        Self::parse(name)?;
        let key = name.to_ascii_lowercase();
        {
            let map = registry().read().unwrap_or_else(PoisonError::into_inner);
            if let Some(registration) = map.get(&key) {
                return Ok(Self {
                    name: Arc::clone(&registration.canonical),
                });
            }
        }
        let mut map = registry().write().unwrap_or_else(PoisonError::into_inner);
        let registration = map.entry(key.clone()).or_insert_with(|| Registration {
            canonical: Arc::from(key.as_str()),
            default_port,
        });
        Ok(Self {
            name: Arc::clone(&registration.canonical),
        })
    }

    /// Returns the shared canonical instance for a registered scheme name,
    /// looked up case-insensitively.
    #[must_use]
    pub fn registered(name: &str) -> Option<Self> {
        let key = name.to_ascii_lowercase();
        let map = registry().read().unwrap_or_else(PoisonError::into_inner);
        map.get(&key).map(|registration| Self {
            name: Arc::clone(&registration.canonical),
        })
    }

    /// Returns the registered default port for this scheme, if any.
    ///
    /// The lookup is case-insensitive, so a non-normalised scheme still
    /// finds its registration.
    #[must_use]
    pub fn default_port(&self) -> Option<u16> {
        let key = self.name.to_ascii_lowercase();
        let map = registry().read().unwrap_or_else(PoisonError::into_inner);
        map.get(&key).and_then(|registration| registration.default_port)
    }

    /// Returns the scheme as it was parsed.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.name
    }
}

impl Normalise for Scheme {
    fn is_normal_form(&self) -> bool {
        !self.name.bytes().any(|b| b.is_ascii_uppercase())
    }

    fn normalise(self) -> Self {
        if self.is_normal_form() {
            return self;
        }
        let lowered = self.name.to_ascii_lowercase();
        Self::registered(&lowered).unwrap_or(Self {
            name: Arc::from(lowered.as_str()),
        })
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl FromStr for Scheme {
    type Err = SchemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Scheme {
    fn as_ref(&self) -> &str {
        &self.name
    }
}

impl TryFrom<&str> for Scheme {
    type Error = SchemeError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl PartialOrd for Scheme {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Scheme {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Scheme {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.name)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Scheme {
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
    fn parse_preserves_case() {
        let scheme = Scheme::parse("HtTp").unwrap();
        assert_eq!(scheme.as_str(), "HtTp");
        assert_eq!(scheme.to_string(), "HtTp");
    }

    #[test]
    fn parse_accepts_plus_minus_dot() {
        let scheme = Scheme::parse("coap+tcp").unwrap();
        assert_eq!(scheme.as_str(), "coap+tcp");
        assert!(Scheme::parse("x-v1.0").is_ok());
    }

    #[test]
    fn parse_empty_fails() {
        assert!(matches!(Scheme::parse(""), Err(SchemeError::Empty)));
    }

    #[test]
    fn parse_leading_digit_fails() {
        assert!(matches!(
            Scheme::parse("1http"),
            Err(SchemeError::MustStartWithLetter { found: '1' })
        ));
    }

    #[test]
    fn parse_invalid_char_fails() {
        assert!(matches!(
            Scheme::parse("ht~tp"),
            Err(SchemeError::InvalidChar { char: '~', position: 2 })
        ));
    }

    #[test]
    fn case_sensitive_equality() {
        assert_ne!(Scheme::parse("HTTP").unwrap(), Scheme::parse("http").unwrap());
    }

    #[test]
    fn normalise_lowercases() {
        let scheme = Scheme::parse("HTTPS").unwrap().normalise();
        assert_eq!(scheme.as_str(), "https");
        assert!(scheme.is_normal_form());
    }

    #[test]
    fn normalise_of_registered_scheme_shares_the_canonical_name() {
        let a = Scheme::parse("HTTP").unwrap().normalise();
        let b = Scheme::parse("Http").unwrap().normalise();
        assert!(Arc::ptr_eq(&a.name, &b.name));
    }

    #[test]
    fn normal_form_returns_same_value() {
        let scheme = Scheme::parse("http").unwrap();
        let name = Arc::clone(&scheme.name);
        let normalised = scheme.normalise();
        assert!(Arc::ptr_eq(&name, &normalised.name));
    }

    #[test]
    fn preseeded_default_ports() {
        assert_eq!(Scheme::parse("http").unwrap().default_port(), Some(80));
        assert_eq!(Scheme::parse("https").unwrap().default_port(), Some(443));
        assert_eq!(Scheme::parse("ftp").unwrap().default_port(), Some(21));
        assert_eq!(Scheme::parse("ssh").unwrap().default_port(), Some(22));
    }

    #[test]
    fn default_port_lookup_is_case_insensitive() {
        assert_eq!(Scheme::parse("HTTP").unwrap().default_port(), Some(80));
    }

    #[test]
    fn unregistered_scheme_has_no_default_port() {
        assert_eq!(Scheme::parse("mailto").unwrap().default_port(), None);
    }

    #[test]
    fn register_returns_shared_instance() {
        let a = Scheme::register("zz-test-shared", Some(9000)).unwrap();
        let b = Scheme::register("ZZ-Test-Shared", Some(9999)).unwrap();
        assert!(Arc::ptr_eq(&a.name, &b.name));
        assert_eq!(b.default_port(), Some(9000));
    }

    #[test]
    fn register_invalid_name_fails() {
        assert!(Scheme::register("not a scheme", None).is_err());
    }

    #[test]
    fn concurrent_registration_converges() {
        let handles: Vec<_> = (0..8)
            .map(|_| std::thread::spawn(|| Scheme::register("zz-test-race", Some(1234)).unwrap()))
            .collect();
        let schemes: Vec<Scheme> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        for scheme in &schemes[1..] {
            assert!(Arc::ptr_eq(&schemes[0].name, &scheme.name));
        }
    }
}
