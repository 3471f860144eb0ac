//! Mutable staging builder for URI references.

use crate::authority::Authority;
use crate::error::{
    AuthorityError, BuilderError, FragmentError, HostError, PathError, PortError, QueryError,
    SchemeError,
};
use crate::fragment::Fragment;
use crate::host::Host;
use crate::path::Path;
use crate::port::Port;
use crate::query::Query;
use crate::reference::{classify_parts, Parts, UriReference};
use crate::scheme::Scheme;
use crate::userinfo::UserInfo;

/// The authority slot of the builder.
///
/// A whole authority and the discrete userinfo/host/port fields are two
/// field groups; writing into one discards whatever the other held, so the
/// last group written wins.
#[derive(Debug, Clone)]
enum AuthorityState {
    Unset,
    Whole(Authority),
    Pieces {
        userinfo: Option<UserInfo>,
        host: Option<Host>,
        port: Option<Port>,
    },
}

impl AuthorityState {
    fn pieces(&mut self) -> (&mut Option<UserInfo>, &mut Option<Host>, &mut Option<Port>) {
        if !matches!(self, Self::Pieces { .. }) {
            *self = Self::Pieces {
                userinfo: None,
                host: None,
                port: None,
            };
        }
        match self {
            Self::Pieces {
                userinfo,
                host,
                port,
            } => (userinfo, host, port),
            Self::Unset | Self::Whole(_) => unreachable!("just switched to pieces"),
        }
    }
}

/// A mutable staging object that assembles an immutable, classified
/// [`UriReference`].
///
/// Every setter is last-write-wins, and the discrete userinfo/host/port
/// setters form one field group with [`authority`](UriBuilder::authority):
/// whichever group was written last is the one `build` uses.
///
/// # Examples
///
/// ```
/// use uriref::Uri;
///
/// let reference = Uri::builder()
///     .try_scheme("https")?
///     .try_host("example.com")?
///     .try_path("/api/v1")?
///     .try_query("page=2")?
///     .build()?;
/// assert_eq!(reference.to_string(), "https://example.com/api/v1?page=2");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
///
/// Userinfo or port without a host is a build-time misuse error:
///
/// ```
/// use uriref::{Port, Uri, BuilderError};
///
/// let result = Uri::builder()
///     .try_scheme("http")
///     .unwrap()
///     .port(Port::of(8080).unwrap())
///     .build();
/// assert_eq!(result.unwrap_err(), BuilderError::PortWithoutHost);
/// ```
#[derive(Debug, Clone)]
pub struct UriBuilder {
    scheme: Option<Scheme>,
    authority: AuthorityState,
    path: Path,
    query: Option<Query>,
    fragment: Option<Fragment>,
}

impl UriBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            scheme: None,
            authority: AuthorityState::Unset,
            path: Path::empty(),
            query: None,
            fragment: None,
        }
    }

    /// Sets the scheme.
    #[must_use]
    pub fn scheme(mut self, scheme: Scheme) -> Self {
        self.scheme = Some(scheme);
        self
    }

    /// Parses and sets the scheme.
    ///
    /// # Errors
    ///
    /// Returns [`SchemeError`] if the string is not a valid scheme.
    pub fn try_scheme(self, s: &str) -> Result<Self, SchemeError> {
        Ok(self.scheme(Scheme::parse(s)?))
    }

    /// Sets the whole authority, discarding any discrete userinfo, host, or
    /// port set earlier.
    #[must_use]
    pub fn authority(mut self, authority: Authority) -> Self {
        self.authority = AuthorityState::Whole(authority);
        self
    }

    /// Parses and sets the whole authority.
    ///
    /// # Errors
    ///
    /// Returns [`AuthorityError`] if the string is not a valid authority.
    pub fn try_authority(self, s: &str) -> Result<Self, AuthorityError> {
        Ok(self.authority(Authority::parse(s)?))
    }

    /// Sets the userinfo, discarding a whole authority set earlier.
    #[must_use]
    pub fn user_info(mut self, userinfo: UserInfo) -> Self {
        *self.authority.pieces().0 = Some(userinfo);
        self
    }

    /// Sets the host, discarding a whole authority set earlier.
    #[must_use]
    pub fn host(mut self, host: Host) -> Self {
        *self.authority.pieces().1 = Some(host);
        self
    }

    /// Parses and sets the host.
    ///
    /// # Errors
    ///
    /// Returns [`HostError`] if the string is not a valid host.
    pub fn try_host(self, s: &str) -> Result<Self, HostError> {
        Ok(self.host(Host::parse(s)?))
    }

    /// Sets the port, discarding a whole authority set earlier.
    #[must_use]
    pub fn port(mut self, port: Port) -> Self {
        *self.authority.pieces().2 = Some(port);
        self
    }

    /// Parses and sets the port.
    ///
    /// # Errors
    ///
    /// Returns [`PortError`] if the string is not a valid port.
    pub fn try_port(self, s: &str) -> Result<Self, PortError> {
        Ok(self.port(Port::parse(s)?))
    }

    /// Sets the path.
    #[must_use]
    pub fn path(mut self, path: Path) -> Self {
        self.path = path;
        self
    }

    /// Parses and sets the path.
    ///
    /// # Errors
    ///
    /// Returns [`PathError`] if the string is not a valid path.
    pub fn try_path(self, s: &str) -> Result<Self, PathError> {
        Ok(self.path(Path::parse(s)?))
    }

    /// Sets the query.
    #[must_use]
    pub fn query(mut self, query: Query) -> Self {
        self.query = Some(query);
        self
    }

    /// Parses and sets the query (without its leading `?`).
    ///
    /// # Errors
    ///
    /// Returns [`QueryError`] if the string is not a valid query.
    pub fn try_query(self, s: &str) -> Result<Self, QueryError> {
        Ok(self.query(Query::parse(s)?))
    }

    /// Sets the query if one is provided, otherwise leaves it unchanged.
    #[must_use]
    pub fn maybe_query(self, query: Option<Query>) -> Self {
        match query {
            Some(query) => self.query(query),
            None => self,
        }
    }

    /// Sets the fragment.
    #[must_use]
    pub fn fragment(mut self, fragment: Fragment) -> Self {
        self.fragment = Some(fragment);
        self
    }

    /// Parses and sets the fragment (without its leading `#`).
    ///
    /// # Errors
    ///
    /// Returns [`FragmentError`] if the string is not a valid fragment.
    pub fn try_fragment(self, s: &str) -> Result<Self, FragmentError> {
        Ok(self.fragment(Fragment::parse(s)?))
    }

    /// Sets the fragment if one is provided, otherwise leaves it unchanged.
    #[must_use]
    pub fn maybe_fragment(self, fragment: Option<Fragment>) -> Self {
        match fragment {
            Some(fragment) => self.fragment(fragment),
            None => self,
        }
    }

    /// Builds the immutable, classified reference.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError`] for state misuse: userinfo or port without a
    /// host, or a component combination whose rendering would read back
    /// differently (a `//`-leading path with no authority, a scheme-like
    /// first segment, a bare `?` query, or a relative path joined to an
    /// authority).
    pub fn build(self) -> Result<UriReference, BuilderError> {
        let authority = match self.authority {
            AuthorityState::Unset => None,
            AuthorityState::Whole(authority) => Some(authority),
            AuthorityState::Pieces {
                userinfo,
                host,
                port,
            } => match host {
                Some(host) => {
                    let mut authority = Authority::new(host);
                    if let Some(userinfo) = userinfo {
                        authority = authority.with_user_info(userinfo);
                    }
                    if let Some(port) = port {
                        authority = authority.with_port(port);
                    }
                    Some(authority)
                }
                None if userinfo.is_some() => return Err(BuilderError::UserInfoWithoutHost),
                None if port.is_some() => return Err(BuilderError::PortWithoutHost),
                None => None,
            },
        };
        classify_parts(Parts {
            scheme: self.scheme,
            authority,
            path: self.path,
            query: self.query,
            fragment: self.fragment,
        })
    }
}

impl Default for UriBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TryFrom<UriBuilder> for UriReference {
    type Error = BuilderError;

    fn try_from(builder: UriBuilder) -> Result<Self, Self::Error> {
        builder.build()
    }
}
