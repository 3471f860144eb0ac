//! Convenient re-exports for glob imports.
//!
//! ```rust
//! use uriref::prelude::*;
//!
//! let uri = Uri::parse("https://example.com/a?b=1").unwrap();
//! assert!(uri.clone().normalise().is_normal_form());
//! ```

pub use crate::{
    // Core types
    AbsoluteUrl, Authority, Fragment, Host, HostAndPort, OpaqueUri, Origin, Password, Path,
    PathAndQuery, Port, Query, QueryParam, QueryParamKey, QueryParamValue, RelativeRef,
    RelativeUrl, Scheme, SchemeRelativeUrl, Segment, ServersideAbsoluteUrl, Uri, UriReference,
    UserInfo, Username,
    // Capabilities and builder
    Normalise, UriBuilder,
    // Errors
    AuthorityError, BuilderError, FragmentError, HostError, PasswordError, PathError, PortError,
    QueryError, QueryParamError, SchemeError, SegmentError, UriReferenceError,
    UriReferenceErrorKind, UserInfoError, UsernameError,
};
