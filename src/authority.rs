//! Authority types: userinfo + host + port, and the no-userinfo
//! specialization.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::OnceLock;

use crate::error::AuthorityError;
use crate::host::Host;
use crate::normalise::Normalise;
use crate::port::Port;
use crate::scheme::Scheme;
use crate::userinfo::UserInfo;

/// The port slot of an authority.
///
/// `host:` carries a present-but-empty port, which must survive a round
/// trip distinctly from an absent one; only normalization drops it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
enum PortPart {
    Absent,
    Empty,
    Number(Port),
}

impl PortPart {
    fn as_port(&self) -> Option<&Port> {
        match self {
            Self::Number(port) => Some(port),
            Self::Absent | Self::Empty => None,
        }
    }
}

struct RawParts<'a> {
    userinfo: Option<&'a str>,
    host: &'a str,
    /// `Some("")` is a present-but-empty port.
    port: Option<&'a str>,
}

/// Splits `userinfo@host:port` textually: last `@` first, then the last `:`
/// outside any bracketed IP literal.
fn split_raw(input: &str) -> Result<RawParts<'_>, AuthorityError> {
    let (userinfo, host_port) = match input.rfind('@') {
        Some(at) => (Some(&input[..at]), &input[at + 1..]),
        None => (None, input),
    };
    if host_port.starts_with('[') {
        let Some(close) = host_port.find(']') else {
            return Err(AuthorityError::InvalidHost {
                host: host_port.to_string(),
                reason: crate::error::HostError::UnterminatedBracket {
                    host: host_port.to_string(),
                },
            });
        };
        let rest = &host_port[close + 1..];
        let port = match rest.strip_prefix(':') {
            Some(port) => Some(port),
            None if rest.is_empty() => None,
            None => {
                return Err(AuthorityError::InvalidHost {
                    host: host_port.to_string(),
                    reason: crate::error::HostError::TrailingAfterBracket {
                        host: host_port.to_string(),
                    },
                });
            }
        };
        return Ok(RawParts {
            userinfo,
            host: &host_port[..=close],
            port,
        });
    }
    match host_port.rfind(':') {
        Some(colon) => Ok(RawParts {
            userinfo,
            host: &host_port[..colon],
            port: Some(&host_port[colon + 1..]),
        }),
        None => Ok(RawParts {
            userinfo,
            host: host_port,
            port: None,
        }),
    }
}

fn parse_port_part(raw: Option<&str>) -> Result<PortPart, AuthorityError> {
    match raw {
        None => Ok(PortPart::Absent),
        Some("") => Ok(PortPart::Empty),
        Some(raw) => Port::parse(raw)
            .map(PortPart::Number)
            .map_err(|reason| AuthorityError::InvalidPort {
                port: raw.to_string(),
                reason,
            }),
    }
}

fn render_authority(
    userinfo: Option<&UserInfo>,
    host: &Host,
    port: &PortPart,
) -> String {
    let mut out = String::new();
    if let Some(userinfo) = userinfo {
        out.push_str(&userinfo.to_string());
        out.push('@');
    }
    out.push_str(host.as_str());
    match port {
        PortPart::Absent => {}
        PortPart::Empty => out.push(':'),
        PortPart::Number(port) => {
            out.push(':');
            out.push_str(port.as_str());
        }
    }
    out
}

/// A validated authority: optional userinfo, host, optional port.
///
/// An `Authority` without userinfo and a [`HostAndPort`] with the same host
/// and port compare equal in both directions and hash identically.
///
/// # Examples
///
/// ```
/// use uriref::{Authority, Normalise, Scheme};
///
/// let authority = Authority::parse("user@Example.COM:0080").unwrap();
/// assert_eq!(authority.host().as_str(), "Example.COM");
/// assert_eq!(authority.port().map(|p| p.number()), Some(80));
///
/// let http = Scheme::parse("http").unwrap();
/// assert_eq!(authority.normalise_with(&http).to_string(), "user@example.com");
/// ```
#[derive(Debug, Clone)]
pub struct Authority {
    userinfo: Option<UserInfo>,
    host: Host,
    port: PortPart,
    repr: OnceLock<String>,
}

impl Authority {
    /// Parses an authority from a string.
    ///
    /// The split runs from the outside in: the text before the last `@` is
    /// userinfo, and the text after the last `:` outside brackets is the
    /// port. `host:` keeps a present-but-empty port for round-trip
    /// fidelity.
    ///
    /// # Errors
    ///
    /// Returns `AuthorityError` wrapping the failing component's error.
    pub fn parse(input: &str) -> Result<Self, AuthorityError> {
        let parts = split_raw(input)?;
        let userinfo = parts
            .userinfo
            .map(|raw| {
                UserInfo::parse(raw).map_err(|reason| AuthorityError::InvalidUserInfo {
                    userinfo: raw.to_string(),
                    reason,
                })
            })
            .transpose()?;
        let host = Host::parse(parts.host).map_err(|reason| AuthorityError::InvalidHost {
            host: parts.host.to_string(),
            reason,
        })?;
        let port = parse_port_part(parts.port)?;
        Ok(Self {
            userinfo,
            host,
            port,
            repr: OnceLock::new(),
        })
    }

    /// Creates an authority of just a host.
    #[must_use]
    pub fn new(host: Host) -> Self {
        Self {
            userinfo: None,
            host,
            port: PortPart::Absent,
            repr: OnceLock::new(),
        }
    }

    /// Returns the userinfo, if present.
    #[must_use]
    pub const fn user_info(&self) -> Option<&UserInfo> {
        self.userinfo.as_ref()
    }

    /// Returns the host.
    #[must_use]
    pub const fn host(&self) -> &Host {
        &self.host
    }

    /// Returns the port, if a numeric one is present.
    #[must_use]
    pub fn port(&self) -> Option<&Port> {
        self.port.as_port()
    }

    /// Returns true when the authority was parsed with a trailing `:` and
    /// nothing after it.
    #[must_use]
    pub fn has_empty_port(&self) -> bool {
        self.port == PortPart::Empty
    }

    /// Returns this authority with the given userinfo.
    #[must_use]
    pub fn with_user_info(self, userinfo: UserInfo) -> Self {
        if self.userinfo.as_ref() == Some(&userinfo) {
            return self;
        }
        Self {
            userinfo: Some(userinfo),
            host: self.host,
            port: self.port,
            repr: OnceLock::new(),
        }
    }

    /// Returns this authority without userinfo. Unchanged input comes back
    /// as the same value without reallocation.
    #[must_use]
    pub fn without_user_info(self) -> Self {
        if self.userinfo.is_none() {
            return self;
        }
        Self {
            userinfo: None,
            host: self.host,
            port: self.port,
            repr: OnceLock::new(),
        }
    }

    /// Returns this authority with the given port. Setting the port it
    /// already has returns the same value without reallocation.
    #[must_use]
    pub fn with_port(self, port: Port) -> Self {
        if self.port.as_port() == Some(&port) {
            return self;
        }
        Self {
            userinfo: self.userinfo,
            host: self.host,
            port: PortPart::Number(port),
            repr: OnceLock::new(),
        }
    }

    /// Returns this authority without a port. An authority that already has
    /// none comes back as the same value without reallocation.
    #[must_use]
    pub fn without_port(self) -> Self {
        if self.port == PortPart::Absent {
            return self;
        }
        Self {
            userinfo: self.userinfo,
            host: self.host,
            port: PortPart::Absent,
            repr: OnceLock::new(),
        }
    }

    /// Normalizes against a scheme: on top of [`Normalise::normalise`], the
    /// port is dropped entirely when it equals the scheme's registered
    /// default.
    #[must_use]
    pub fn normalise_with(self, scheme: &Scheme) -> Self {
        let normalised = self.normalise();
        match (&normalised.port, scheme.default_port()) {
            (PortPart::Number(port), Some(default)) if port.number() == default => {
                normalised.without_port()
            }
            _ => normalised,
        }
    }

    /// True iff [`normalise_with`](Authority::normalise_with) would return
    /// this value unchanged. Never allocates.
    #[must_use]
    pub fn is_normal_form_with(&self, scheme: &Scheme) -> bool {
        self.is_normal_form()
            && match (&self.port, scheme.default_port()) {
                (PortPart::Number(port), Some(default)) => port.number() != default,
                _ => true,
            }
    }

    /// Returns the authority in string form, composed once and cached.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.repr
            .get_or_init(|| render_authority(self.userinfo.as_ref(), &self.host, &self.port))
    }
}

impl Normalise for Authority {
    fn is_normal_form(&self) -> bool {
        self.userinfo.as_ref().is_none_or(UserInfo::is_normal_form)
            && self.host.is_normal_form()
            && match &self.port {
                PortPart::Absent => true,
                PortPart::Empty => false,
                PortPart::Number(port) => port.is_normal_form(),
            }
    }

    fn normalise(self) -> Self {
        if self.is_normal_form() {
            return self;
        }
        let port = match self.port {
            PortPart::Absent | PortPart::Empty => PortPart::Absent,
            PortPart::Number(port) => PortPart::Number(port.normalise()),
        };
        Self {
            userinfo: self.userinfo.map(UserInfo::normalise),
            host: self.host.normalise(),
            port,
            repr: OnceLock::new(),
        }
    }
}

impl PartialEq for Authority {
    fn eq(&self, other: &Self) -> bool {
        self.userinfo == other.userinfo && self.host == other.host && self.port == other.port
    }
}

impl Eq for Authority {}

impl Hash for Authority {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.userinfo.hash(state);
        self.host.hash(state);
        self.port.hash(state);
    }
}

impl PartialOrd for Authority {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Authority {
    fn cmp(&self, other: &Self) -> Ordering {
        (&self.userinfo, &self.host, &self.port).cmp(&(
            &other.userinfo,
            &other.host,
            &other.port,
        ))
    }
}

impl PartialEq<HostAndPort> for Authority {
    fn eq(&self, other: &HostAndPort) -> bool {
        self.userinfo.is_none() && self.host == other.host && self.port == other.port
    }
}

impl fmt::Display for Authority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Authority {
    type Err = AuthorityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Authority {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl TryFrom<&str> for Authority {
    type Error = AuthorityError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl From<HostAndPort> for Authority {
    fn from(host_and_port: HostAndPort) -> Self {
        Self {
            userinfo: None,
            host: host_and_port.host,
            port: host_and_port.port,
            repr: OnceLock::new(),
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Authority {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Authority {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// An authority restricted to host and optional port.
///
/// # Examples
///
/// ```
/// use uriref::{Authority, HostAndPort};
///
/// let hp = HostAndPort::parse("example.com:8080").unwrap();
/// let authority = Authority::parse("example.com:8080").unwrap();
/// assert_eq!(hp, authority);
/// assert_eq!(authority, hp);
/// ```
#[derive(Debug, Clone)]
pub struct HostAndPort {
    host: Host,
    port: PortPart,
    repr: OnceLock<String>,
}

impl HostAndPort {
    /// Parses a host-and-port from a string.
    ///
    /// # Errors
    ///
    /// Returns `AuthorityError`, with `UnexpectedUserInfo` if the input
    /// carries an `@`-delimited userinfo.
    pub fn parse(input: &str) -> Result<Self, AuthorityError> {
        let parts = split_raw(input)?;
        if let Some(userinfo) = parts.userinfo {
            return Err(AuthorityError::UnexpectedUserInfo {
                userinfo: userinfo.to_string(),
            });
        }
        let host = Host::parse(parts.host).map_err(|reason| AuthorityError::InvalidHost {
            host: parts.host.to_string(),
            reason,
        })?;
        let port = parse_port_part(parts.port)?;
        Ok(Self {
            host,
            port,
            repr: OnceLock::new(),
        })
    }

    /// Creates a host-and-port of just a host.
    #[must_use]
    pub fn new(host: Host) -> Self {
        Self {
            host,
            port: PortPart::Absent,
            repr: OnceLock::new(),
        }
    }

    /// Returns the host.
    #[must_use]
    pub const fn host(&self) -> &Host {
        &self.host
    }

    /// Returns the port, if a numeric one is present.
    #[must_use]
    pub fn port(&self) -> Option<&Port> {
        self.port.as_port()
    }

    /// Returns this value with the given port. Setting the port it already
    /// has returns the same value without reallocation.
    #[must_use]
    pub fn with_port(self, port: Port) -> Self {
        if self.port.as_port() == Some(&port) {
            return self;
        }
        Self {
            host: self.host,
            port: PortPart::Number(port),
            repr: OnceLock::new(),
        }
    }

    /// Returns this value without a port. One that already has none comes
    /// back as the same value without reallocation.
    #[must_use]
    pub fn without_port(self) -> Self {
        if self.port == PortPart::Absent {
            return self;
        }
        Self {
            host: self.host,
            port: PortPart::Absent,
            repr: OnceLock::new(),
        }
    }

    /// Returns the value in string form, composed once and cached.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.repr
            .get_or_init(|| render_authority(None, &self.host, &self.port))
    }
}

impl Normalise for HostAndPort {
    fn is_normal_form(&self) -> bool {
        self.host.is_normal_form()
            && match &self.port {
                PortPart::Absent => true,
                PortPart::Empty => false,
                PortPart::Number(port) => port.is_normal_form(),
            }
    }

    fn normalise(self) -> Self {
        if self.is_normal_form() {
            return self;
        }
        let port = match self.port {
            PortPart::Absent | PortPart::Empty => PortPart::Absent,
            PortPart::Number(port) => PortPart::Number(port.normalise()),
        };
        Self {
            host: self.host.normalise(),
            port,
            repr: OnceLock::new(),
        }
    }
}

impl PartialEq for HostAndPort {
    fn eq(&self, other: &Self) -> bool {
        self.host == other.host && self.port == other.port
    }
}

impl Eq for HostAndPort {}

impl Hash for HostAndPort {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Hash exactly what an Authority without userinfo hashes, so the
        // two stay interchangeable as map keys.
        let userinfo: Option<&UserInfo> = None;
        userinfo.hash(state);
        self.host.hash(state);
        self.port.hash(state);
    }
}

impl PartialOrd for HostAndPort {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HostAndPort {
    fn cmp(&self, other: &Self) -> Ordering {
        (&self.host, &self.port).cmp(&(&other.host, &other.port))
    }
}

impl PartialEq<Authority> for HostAndPort {
    fn eq(&self, other: &Authority) -> bool {
        other == self
    }
}

impl fmt::Display for HostAndPort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for HostAndPort {
    type Err = AuthorityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for HostAndPort {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl TryFrom<&str> for HostAndPort {
    type Error = AuthorityError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl TryFrom<Authority> for HostAndPort {
    type Error = AuthorityError;

    fn try_from(authority: Authority) -> Result<Self, Self::Error> {
        if let Some(userinfo) = authority.userinfo {
            return Err(AuthorityError::UnexpectedUserInfo {
                userinfo: userinfo.to_string(),
            });
        }
        Ok(Self {
            host: authority.host,
            port: authority.port,
            repr: OnceLock::new(),
        })
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for HostAndPort {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for HostAndPort {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
