//! Error types for URI reference parsing and construction.
//!
//! Every grammar has its own error type carrying the offending literal.
//! Reference-level failures wrap the most specific component error, so the
//! chain runs from e.g. [`PortError`] through [`AuthorityError`] up to
//! [`UriReferenceError`], whose message always includes the complete input.

use std::fmt;

/// Errors for scheme parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemeError {
    /// Scheme is empty
    Empty,
    /// Scheme must start with an ASCII letter
    MustStartWithLetter {
        /// The character found instead
        found: char,
    },
    /// Invalid character (not a letter, digit, `+`, `-`, or `.`)
    InvalidChar {
        /// The invalid character
        char: char,
        /// Position in the input
        position: usize,
    },
}

impl fmt::Display for SchemeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "scheme cannot be empty"),
            Self::MustStartWithLetter { found } => {
                write!(f, "scheme must start with a letter, found '{found}'")
            }
            Self::InvalidChar { char, position } => {
                write!(
                    f,
                    "invalid character '{char}' at position {position}; only letters, digits, '+', '-', and '.' allowed"
                )
            }
        }
    }
}

impl std::error::Error for SchemeError {}

/// Errors for username parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UsernameError {
    /// Character that must be percent-encoded appeared raw
    InvalidChar {
        /// The invalid character
        char: char,
        /// Position in the input
        position: usize,
    },
}

impl fmt::Display for UsernameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidChar { char, position } => {
                write!(
                    f,
                    "invalid character '{char}' at position {position}; must be percent-encoded"
                )
            }
        }
    }
}

impl std::error::Error for UsernameError {}

/// Errors for password parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PasswordError {
    /// Character that must be percent-encoded appeared raw
    InvalidChar {
        /// The invalid character
        char: char,
        /// Position in the input
        position: usize,
    },
}

impl fmt::Display for PasswordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidChar { char, position } => {
                write!(
                    f,
                    "invalid character '{char}' at position {position}; must be percent-encoded"
                )
            }
        }
    }
}

impl std::error::Error for PasswordError {}

/// Errors for userinfo parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserInfoError {
    /// Username part failed to parse
    InvalidUsername {
        /// The offending username
        username: String,
        /// The specific failure
        reason: UsernameError,
    },
    /// Password part failed to parse
    InvalidPassword {
        /// The offending password
        password: String,
        /// The specific failure
        reason: PasswordError,
    },
}

impl fmt::Display for UserInfoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidUsername { username, reason } => {
                write!(f, "invalid username '{username}': {reason}")
            }
            Self::InvalidPassword { password, reason } => {
                write!(f, "invalid password '{password}': {reason}")
            }
        }
    }
}

impl std::error::Error for UserInfoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidUsername { reason, .. } => Some(reason),
            Self::InvalidPassword { reason, .. } => Some(reason),
        }
    }
}

/// Errors for host parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    /// IP literal opened with `[` but never closed
    UnterminatedBracket {
        /// The offending host
        host: String,
    },
    /// IP literal `[]` with no content
    EmptyBracket,
    /// IP literal contains a nested `[`
    NestedBracket {
        /// The offending host
        host: String,
    },
    /// Text after the closing `]` of an IP literal
    TrailingAfterBracket {
        /// The offending host
        host: String,
    },
    /// Character that must be percent-encoded appeared raw
    InvalidChar {
        /// The invalid character
        char: char,
        /// Position in the input
        position: usize,
    },
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnterminatedBracket { host } => {
                write!(f, "missing closing bracket in IP literal '{host}'")
            }
            Self::EmptyBracket => write!(f, "IP literal cannot be empty"),
            Self::NestedBracket { host } => {
                write!(f, "nested bracket in IP literal '{host}'")
            }
            Self::TrailingAfterBracket { host } => {
                write!(f, "unexpected text after closing bracket in '{host}'")
            }
            Self::InvalidChar { char, position } => {
                write!(
                    f,
                    "invalid character '{char}' at position {position}; must be percent-encoded"
                )
            }
        }
    }
}

impl std::error::Error for HostError {}

/// Errors for port parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PortError {
    /// Port is empty
    Empty,
    /// Non-digit character in the port
    InvalidChar {
        /// The invalid character
        char: char,
        /// Position in the input
        position: usize,
    },
    /// Port outside the range 1-65535
    OutOfRange {
        /// The offending literal
        value: String,
    },
}

impl fmt::Display for PortError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "port cannot be empty"),
            Self::InvalidChar { char, position } => {
                write!(
                    f,
                    "invalid character '{char}' at position {position}; port must be decimal digits"
                )
            }
            Self::OutOfRange { value } => {
                write!(f, "port '{value}' is outside the range 1-65535")
            }
        }
    }
}

impl std::error::Error for PortError {}

/// Errors for authority parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthorityError {
    /// Authority is empty
    Empty,
    /// Userinfo part failed to parse
    InvalidUserInfo {
        /// The offending userinfo
        userinfo: String,
        /// The specific failure
        reason: UserInfoError,
    },
    /// Host part failed to parse
    InvalidHost {
        /// The offending host
        host: String,
        /// The specific failure
        reason: HostError,
    },
    /// Port part failed to parse
    InvalidPort {
        /// The offending port
        port: String,
        /// The specific failure
        reason: PortError,
    },
    /// Userinfo given where only host and port are allowed
    UnexpectedUserInfo {
        /// The userinfo that was found
        userinfo: String,
    },
}

impl fmt::Display for AuthorityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "authority cannot be empty"),
            Self::InvalidUserInfo { userinfo, reason } => {
                write!(f, "invalid userinfo '{userinfo}': {reason}")
            }
            Self::InvalidHost { host, reason } => {
                write!(f, "invalid host '{host}': {reason}")
            }
            Self::InvalidPort { port, reason } => {
                write!(f, "invalid port '{port}': {reason}")
            }
            Self::UnexpectedUserInfo { userinfo } => {
                write!(f, "userinfo '{userinfo}' is not allowed here")
            }
        }
    }
}

impl std::error::Error for AuthorityError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidUserInfo { reason, .. } => Some(reason),
            Self::InvalidHost { reason, .. } => Some(reason),
            Self::InvalidPort { reason, .. } => Some(reason),
            Self::Empty | Self::UnexpectedUserInfo { .. } => None,
        }
    }
}

/// Errors for path segment parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SegmentError {
    /// Character that must be percent-encoded appeared raw
    InvalidChar {
        /// The invalid character
        char: char,
        /// Position in the input
        position: usize,
    },
}

impl fmt::Display for SegmentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidChar { char, position } => {
                write!(
                    f,
                    "invalid character '{char}' at position {position}; must be percent-encoded"
                )
            }
        }
    }
}

impl std::error::Error for SegmentError {}

/// Errors for path parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    /// A segment failed to parse
    InvalidSegment {
        /// The offending segment
        segment: String,
        /// Index of the segment within the path
        index: usize,
        /// The specific failure
        reason: SegmentError,
    },
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSegment {
                segment,
                index,
                reason,
            } => {
                write!(f, "invalid segment '{segment}' at index {index}: {reason}")
            }
        }
    }
}

impl std::error::Error for PathError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidSegment { reason, .. } => Some(reason),
        }
    }
}

/// Errors for whole-query parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// Character that must be percent-encoded appeared raw
    InvalidChar {
        /// The invalid character
        char: char,
        /// Position in the input
        position: usize,
    },
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidChar { char, position } => {
                write!(
                    f,
                    "invalid character '{char}' at position {position}; must be percent-encoded"
                )
            }
        }
    }
}

impl std::error::Error for QueryError {}

/// Errors for query parameter key or value parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryParamError {
    /// Character that must be percent-encoded appeared raw
    InvalidChar {
        /// The invalid character
        char: char,
        /// Position in the input
        position: usize,
    },
}

impl fmt::Display for QueryParamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidChar { char, position } => {
                write!(
                    f,
                    "invalid character '{char}' at position {position}; must be percent-encoded"
                )
            }
        }
    }
}

impl std::error::Error for QueryParamError {}

/// Errors for fragment parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FragmentError {
    /// Control character in the fragment
    InvalidChar {
        /// The invalid character
        char: char,
        /// Position in the input
        position: usize,
    },
}

impl fmt::Display for FragmentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidChar { char, position } => {
                write!(
                    f,
                    "invalid character '{char}' at position {position}; control characters must be percent-encoded"
                )
            }
        }
    }
}

impl std::error::Error for FragmentError {}

/// Error returned by every reference-level `parse`.
///
/// Carries the complete offending input together with the most specific
/// failure; the full chain is available via [`std::error::Error::source`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UriReferenceError {
    /// The input that failed to parse
    pub input: String,
    /// The specific error that occurred
    pub kind: UriReferenceErrorKind,
}

/// Specific reference-level error kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UriReferenceErrorKind {
    /// Scheme failed to parse
    InvalidScheme {
        /// The offending scheme
        scheme: String,
        /// The specific failure
        reason: SchemeError,
    },
    /// Authority failed to parse
    InvalidAuthority {
        /// The offending authority
        authority: String,
        /// The specific failure
        reason: AuthorityError,
    },
    /// Path failed to parse
    InvalidPath {
        /// The offending path
        path: String,
        /// The specific failure
        reason: PathError,
    },
    /// Query failed to parse
    InvalidQuery {
        /// The offending query
        query: String,
        /// The specific failure
        reason: QueryError,
    },
    /// Fragment failed to parse
    InvalidFragment {
        /// The offending fragment
        fragment: String,
        /// The specific failure
        reason: FragmentError,
    },
    /// Scheme-less, authority-less path beginning with `//` would read back
    /// as an authority
    AmbiguousAuthorityPath {
        /// The offending path
        path: String,
    },
    /// First segment of a scheme-less relative path would read back as a
    /// scheme
    AmbiguousColonSegment {
        /// The offending segment
        segment: String,
    },
    /// A query on an empty scheme-less, authority-less path would read back
    /// as a bare `?` reference
    AmbiguousBareQuery,
    /// Authority present but the path is relative, so the two cannot be
    /// joined
    RelativePathWithAuthority {
        /// The offending path
        path: String,
    },
    /// Scheme required by this reference form but absent
    MissingScheme,
    /// Scheme present where this reference form forbids one
    UnexpectedScheme {
        /// The scheme that was found
        scheme: String,
    },
    /// Authority required by this reference form but absent
    MissingAuthority,
    /// Authority present where this reference form forbids one
    UnexpectedAuthority {
        /// The authority that was found
        authority: String,
    },
    /// Non-empty path where this reference form requires an empty one
    UnexpectedPath {
        /// The path that was found
        path: String,
    },
    /// Query present where this reference form forbids one
    UnexpectedQuery {
        /// The query that was found
        query: String,
    },
    /// Fragment present where this reference form forbids one
    UnexpectedFragment {
        /// The fragment that was found
        fragment: String,
    },
}

impl fmt::Display for UriReferenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse URI reference '{}': ", self.input)?;
        match &self.kind {
            UriReferenceErrorKind::InvalidScheme { scheme, reason } => {
                write!(f, "invalid scheme '{scheme}': {reason}")
            }
            UriReferenceErrorKind::InvalidAuthority { authority, reason } => {
                write!(f, "invalid authority '{authority}': {reason}")
            }
            UriReferenceErrorKind::InvalidPath { path, reason } => {
                write!(f, "invalid path '{path}': {reason}")
            }
            UriReferenceErrorKind::InvalidQuery { query, reason } => {
                write!(f, "invalid query '{query}': {reason}")
            }
            UriReferenceErrorKind::InvalidFragment { fragment, reason } => {
                write!(f, "invalid fragment '{fragment}': {reason}")
            }
            UriReferenceErrorKind::AmbiguousAuthorityPath { path } => {
                write!(
                    f,
                    "path '{path}' begins with '//' and would be read back as an authority"
                )
            }
            UriReferenceErrorKind::AmbiguousColonSegment { segment } => {
                write!(
                    f,
                    "segment '{segment}' contains ':' and would be read back as a scheme"
                )
            }
            UriReferenceErrorKind::AmbiguousBareQuery => {
                write!(
                    f,
                    "query on an empty path would be read back as a bare '?' reference"
                )
            }
            UriReferenceErrorKind::RelativePathWithAuthority { path } => {
                write!(
                    f,
                    "path '{path}' must be absolute or empty when an authority is present"
                )
            }
            UriReferenceErrorKind::MissingScheme => write!(f, "scheme is required"),
            UriReferenceErrorKind::UnexpectedScheme { scheme } => {
                write!(f, "scheme '{scheme}' is not allowed here")
            }
            UriReferenceErrorKind::MissingAuthority => write!(f, "authority is required"),
            UriReferenceErrorKind::UnexpectedAuthority { authority } => {
                write!(f, "authority '{authority}' is not allowed here")
            }
            UriReferenceErrorKind::UnexpectedPath { path } => {
                write!(f, "path '{path}' is not allowed here")
            }
            UriReferenceErrorKind::UnexpectedQuery { query } => {
                write!(f, "query '{query}' is not allowed here")
            }
            UriReferenceErrorKind::UnexpectedFragment { fragment } => {
                write!(f, "fragment '{fragment}' is not allowed here")
            }
        }
    }
}

impl std::error::Error for UriReferenceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            UriReferenceErrorKind::InvalidScheme { reason, .. } => Some(reason),
            UriReferenceErrorKind::InvalidAuthority { reason, .. } => Some(reason),
            UriReferenceErrorKind::InvalidPath { reason, .. } => Some(reason),
            UriReferenceErrorKind::InvalidQuery { reason, .. } => Some(reason),
            UriReferenceErrorKind::InvalidFragment { reason, .. } => Some(reason),
            _ => None,
        }
    }
}

/// Errors for builder-state misuse.
///
/// These indicate programmer error rather than malformed external input and
/// are kept separate from the grammar errors for that reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuilderError {
    /// Userinfo set without a host
    UserInfoWithoutHost,
    /// Port set without a host
    PortWithoutHost,
    /// Scheme-less, authority-less path beginning with `//`
    AmbiguousPath {
        /// The offending path
        path: String,
    },
    /// First segment of a scheme-less relative path would read back as a
    /// scheme
    AmbiguousColonSegment {
        /// The offending segment
        segment: String,
    },
    /// Query on an empty scheme-less, authority-less path
    AmbiguousBareQuery,
    /// Host or authority present but the path is relative
    RelativePathWithAuthority {
        /// The offending path
        path: String,
    },
}

impl fmt::Display for BuilderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UserInfoWithoutHost | Self::PortWithoutHost => {
                write!(f, "cannot construct a uri with a userinfo or port but no host")
            }
            Self::AmbiguousPath { path } => {
                write!(
                    f,
                    "path '{path}' begins with '//' and would be read back as an authority"
                )
            }
            Self::AmbiguousColonSegment { segment } => {
                write!(
                    f,
                    "segment '{segment}' contains ':' and would be read back as a scheme"
                )
            }
            Self::AmbiguousBareQuery => {
                write!(
                    f,
                    "query on an empty path would be read back as a bare '?' reference"
                )
            }
            Self::RelativePathWithAuthority { path } => {
                write!(
                    f,
                    "path '{path}' must be absolute or empty when an authority is present"
                )
            }
        }
    }
}

impl std::error::Error for BuilderError {}

impl From<BuilderError> for UriReferenceErrorKind {
    fn from(error: BuilderError) -> Self {
        match error {
            BuilderError::AmbiguousPath { path } => Self::AmbiguousAuthorityPath { path },
            BuilderError::AmbiguousColonSegment { segment } => {
                Self::AmbiguousColonSegment { segment }
            }
            BuilderError::AmbiguousBareQuery => Self::AmbiguousBareQuery,
            BuilderError::RelativePathWithAuthority { path } => {
                Self::RelativePathWithAuthority { path }
            }
            BuilderError::UserInfoWithoutHost | BuilderError::PortWithoutHost => {
                Self::MissingAuthority
            }
        }
    }
}
