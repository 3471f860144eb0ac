//! Query types: the opaque query string and its `key[=value]` pairs.

use std::fmt;
use std::str::FromStr;

use crate::encoding;
use crate::error::{QueryError, QueryParamError};
use crate::normalise::Normalise;

fn keep_in_query(byte: u8) -> bool {
    encoding::is_pchar(byte) || matches!(byte, b'/' | b'?')
}

/// A validated query string, stored without its leading `?`.
///
/// The query is opaque: it round-trips exactly as parsed, and normalization
/// touches only percent-encoding, never structure. It can be decomposed
/// into `&`-separated `key[=value]` pairs with [`params`](Query::params).
///
/// # Examples
///
/// ```
/// use uriref::Query;
///
/// let query = Query::parse("a=1&flag&b=2").unwrap();
/// let params = query.params();
/// assert_eq!(params.len(), 3);
/// assert_eq!(params[0].key().as_str(), "a");
/// assert!(params[1].value().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Query(String);

impl Query {
    /// Parses a query from a string (without the leading `?`).
    ///
    /// # Errors
    ///
    /// Returns `QueryError` if the query contains a raw `#`.
    pub fn parse(input: &str) -> Result<Self, QueryError> {
        for (i, c) in input.chars().enumerate() {
            if c == '#' {
                return Err(QueryError::InvalidChar { char: c, position: i });
            }
        }
        Ok(Self(input.to_string()))
    }

    /// Creates a query from already-decoded text, percent-encoding whatever
    /// the grammar requires. Structural `&` and `=` in the input stay raw.
    #[must_use]
    pub fn encode(decoded: &str) -> Self {
        Self(encoding::percent_encode(decoded, keep_in_query))
    }

    /// Composes a query from typed parameters.
    ///
    /// # Examples
    ///
    /// ```
    /// use uriref::{Query, QueryParam, QueryParamKey, QueryParamValue};
    ///
    /// let query = Query::from_pairs([
    ///     QueryParam::new(QueryParamKey::encode("q"), Some(QueryParamValue::encode("a&b"))),
    ///     QueryParam::new(QueryParamKey::encode("page"), None),
    /// ]);
    /// assert_eq!(query.to_string(), "q=a%26b&page");
    /// ```
    #[must_use]
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = QueryParam>,
    {
        let joined = pairs
            .into_iter()
            .map(|pair| pair.to_string())
            .collect::<Vec<_>>()
            .join("&");
        Self(joined)
    }

    /// Decomposes the query into its `&`-separated `key[=value]` pairs.
    ///
    /// The split always succeeds: the query grammar already excludes `#`,
    /// the split consumes every `&`, and a key is the text before the first
    /// `=` of its pair.
    #[must_use]
    pub fn params(&self) -> Vec<QueryParam> {
        if self.0.is_empty() {
            return Vec::new();
        }
        self.0
            .split('&')
            .map(|pair| {
                let (key, value) = match pair.split_once('=') {
                    Some((k, v)) => (k, Some(v)),
                    None => (pair, None),
                };
                QueryParam {
                    key: QueryParamKey(key.to_string()),
                    value: value.map(|v| QueryParamValue(v.to_string())),
                }
            })
            .collect()
    }

    /// Returns the fully percent-decoded query.
    #[must_use]
    pub fn decode(&self) -> String {
        encoding::percent_decode(&self.0)
    }

    /// Returns the query as it was parsed.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true for a present-but-empty query (`?` with nothing after).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Normalise for Query {
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

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Query {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Query {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for Query {
    type Error = QueryError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Query {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Query {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// A validated query parameter key.
///
/// Forbids raw `#`, `&`, and `=`; everything else is permissive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QueryParamKey(String);

impl QueryParamKey {
    /// Parses a key from a string.
    ///
    /// # Errors
    ///
    /// Returns `QueryParamError` if a raw `#`, `&`, or `=` appears.
    pub fn parse(input: &str) -> Result<Self, QueryParamError> {
        for (i, c) in input.chars().enumerate() {
            if matches!(c, '#' | '&' | '=') {
                return Err(QueryParamError::InvalidChar { char: c, position: i });
            }
        }
        Ok(Self(input.to_string()))
    }

    /// Creates a key from already-decoded text, percent-encoding whatever
    /// the grammar requires.
    #[must_use]
    pub fn encode(decoded: &str) -> Self {
        Self(encoding::percent_encode(decoded, |b| {
            keep_in_query(b) && !matches!(b, b'&' | b'=')
        }))
    }

    /// Returns the fully percent-decoded key.
    #[must_use]
    pub fn decode(&self) -> String {
        encoding::percent_decode(&self.0)
    }

    /// Returns the key as it was parsed.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Normalise for QueryParamKey {
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

impl fmt::Display for QueryParamKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for QueryParamKey {
    type Err = QueryParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for QueryParamKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A validated query parameter value.
///
/// Forbids raw `#` and `&`; a raw `=` is legal, so `a=b=c` keeps `b=c` as
/// one value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QueryParamValue(String);

impl QueryParamValue {
    /// Parses a value from a string.
    ///
    /// # Errors
    ///
    /// Returns `QueryParamError` if a raw `#` or `&` appears.
    pub fn parse(input: &str) -> Result<Self, QueryParamError> {
        for (i, c) in input.chars().enumerate() {
            if matches!(c, '#' | '&') {
                return Err(QueryParamError::InvalidChar { char: c, position: i });
            }
        }
        Ok(Self(input.to_string()))
    }

    /// Creates a value from already-decoded text, percent-encoding whatever
    /// the grammar requires.
    #[must_use]
    pub fn encode(decoded: &str) -> Self {
        Self(encoding::percent_encode(decoded, |b| {
            keep_in_query(b) && b != b'&'
        }))
    }

    /// Returns the fully percent-decoded value.
    #[must_use]
    pub fn decode(&self) -> String {
        encoding::percent_decode(&self.0)
    }

    /// Returns the value as it was parsed.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Normalise for QueryParamValue {
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

impl fmt::Display for QueryParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for QueryParamValue {
    type Err = QueryParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for QueryParamValue {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// One `key[=value]` pair of a query.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QueryParam {
    key: QueryParamKey,
    value: Option<QueryParamValue>,
}

impl QueryParam {
    /// Creates a pair from components. A `None` value renders without `=`.
    #[must_use]
    pub const fn new(key: QueryParamKey, value: Option<QueryParamValue>) -> Self {
        Self { key, value }
    }

    /// Returns the key.
    #[must_use]
    pub const fn key(&self) -> &QueryParamKey {
        &self.key
    }

    /// Returns the value, if present. A valueless pair (`flag`) and a pair
    /// with an empty value (`flag=`) are distinct.
    #[must_use]
    pub const fn value(&self) -> Option<&QueryParamValue> {
        self.value.as_ref()
    }
}

impl fmt::Display for QueryParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{}={value}", self.key),
            None => write!(f, "{}", self.key),
        }
    }
}
