//! Userinfo types: username, password, and their combination.

use std::fmt;
use std::str::FromStr;

use crate::encoding;
use crate::error::{PasswordError, UserInfoError, UsernameError};
use crate::normalise::Normalise;

/// Returns true if the character may appear raw in a username or password.
///
/// `:` is legal only as the userinfo separator, so both halves reject it.
const fn is_valid_userinfo_char(c: char) -> bool {
    !matches!(
        c,
        ' ' | ':' | '@' | '#' | '/' | '?' | '[' | ']' | '<' | '>' | '\\' | '|' | '"'
    )
}

fn keep_in_userinfo(byte: u8) -> bool {
    encoding::is_unreserved(byte) || encoding::is_sub_delim(byte)
}

/// A validated username.
///
/// # Examples
///
/// ```
/// use uriref::Username;
///
/// let name = Username::parse("alice%40home").unwrap();
/// assert_eq!(name.decode(), "alice@home");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Username(String);

impl Username {
    /// Parses a username from a string.
    ///
    /// # Errors
    ///
    /// Returns `UsernameError` if a character that must be percent-encoded
    /// appears raw.
    pub fn parse(input: &str) -> Result<Self, UsernameError> {
        for (i, c) in input.chars().enumerate() {
            if !is_valid_userinfo_char(c) {
                return Err(UsernameError::InvalidChar { char: c, position: i });
            }
        }
        Ok(Self(input.to_string()))
    }

    /// Creates a username from already-decoded text, percent-encoding
    /// whatever the grammar requires.
    #[must_use]
    pub fn encode(decoded: &str) -> Self {
        Self(encoding::percent_encode(decoded, keep_in_userinfo))
    }

    /// Returns the fully percent-decoded username.
    #[must_use]
    pub fn decode(&self) -> String {
        encoding::percent_decode(&self.0)
    }

    /// Returns the username as it was parsed.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Normalise for Username {
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

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Username {
    type Err = UsernameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for Username {
    type Error = UsernameError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

/// A validated password.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Password(String);

impl Password {
    /// Parses a password from a string.
    ///
    /// # Errors
    ///
    /// Returns `PasswordError` if a character that must be percent-encoded
    /// appears raw.
    pub fn parse(input: &str) -> Result<Self, PasswordError> {
        for (i, c) in input.chars().enumerate() {
            if !is_valid_userinfo_char(c) {
                return Err(PasswordError::InvalidChar { char: c, position: i });
            }
        }
        Ok(Self(input.to_string()))
    }

    /// Creates a password from already-decoded text, percent-encoding
    /// whatever the grammar requires.
    #[must_use]
    pub fn encode(decoded: &str) -> Self {
        Self(encoding::percent_encode(decoded, keep_in_userinfo))
    }

    /// Returns the fully percent-decoded password.
    #[must_use]
    pub fn decode(&self) -> String {
        encoding::percent_decode(&self.0)
    }

    /// Returns the password as it was parsed.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Normalise for Password {
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

impl fmt::Display for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Password {
    type Err = PasswordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Password {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for Password {
    type Error = PasswordError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

/// The userinfo part of an authority: `username[:password]`.
///
/// The first `:` separates the two halves; any later `:` must be
/// percent-encoded, so `a:b:c` is rejected rather than guessed at.
///
/// # Examples
///
/// ```
/// use uriref::UserInfo;
///
/// let info = UserInfo::parse("alice:secret").unwrap();
/// assert_eq!(info.username().as_str(), "alice");
/// assert_eq!(info.password().map(|p| p.as_str()), Some("secret"));
/// assert_eq!(info.to_string(), "alice:secret");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserInfo {
    username: Username,
    password: Option<Password>,
}

impl UserInfo {
    /// Parses a userinfo from a string, splitting at the first `:`.
    ///
    /// # Errors
    ///
    /// Returns `UserInfoError` wrapping the failing half's error.
    pub fn parse(input: &str) -> Result<Self, UserInfoError> {
        let (username_raw, password_raw) = match input.split_once(':') {
            Some((u, p)) => (u, Some(p)),
            None => (input, None),
        };
        let username =
            Username::parse(username_raw).map_err(|reason| UserInfoError::InvalidUsername {
                username: username_raw.to_string(),
                reason,
            })?;
        let password = password_raw
            .map(|raw| {
                Password::parse(raw).map_err(|reason| UserInfoError::InvalidPassword {
                    password: raw.to_string(),
                    reason,
                })
            })
            .transpose()?;
        Ok(Self { username, password })
    }

    /// Creates a userinfo from components.
    #[must_use]
    pub const fn new(username: Username, password: Option<Password>) -> Self {
        Self { username, password }
    }

    /// Returns the username.
    #[must_use]
    pub const fn username(&self) -> &Username {
        &self.username
    }

    /// Returns the password, if present.
    #[must_use]
    pub const fn password(&self) -> Option<&Password> {
        self.password.as_ref()
    }
}

impl Normalise for UserInfo {
    fn is_normal_form(&self) -> bool {
        self.username.is_normal_form()
            && self.password.as_ref().is_none_or(Password::is_normal_form)
    }

    fn normalise(self) -> Self {
        if self.is_normal_form() {
            return self;
        }
        Self {
            username: self.username.normalise(),
            password: self.password.map(Password::normalise),
        }
    }
}

impl fmt::Display for UserInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.password {
            Some(password) => write!(f, "{}:{password}", self.username),
            None => write!(f, "{}", self.username),
        }
    }
}

impl FromStr for UserInfo {
    type Err = UserInfoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for UserInfo {
    type Error = UserInfoError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for UserInfo {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for UserInfo {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
