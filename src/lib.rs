//! Parser, normaliser, and resolver for RFC 3986 URI references.
//!
//! This crate is the value-type foundation beneath an HTTP mock server's
//! URL matching and client tooling: every component of a URI reference is
//! an immutable, lossless wrapper over the text it was parsed from, and a
//! parsed reference is classified into the most specific of a closed set of
//! variants. Parsing is pragmatically permissive in the WHATWG style;
//! normalisation and resolution follow RFC 3986 §6 and §5.3.
//!
//! # Quick Start
//!
//! ```rust
//! use uriref::{Normalise, Uri, UriReference};
//!
//! // Parse and classify a reference.
//! let uri = Uri::parse("HTTP://Example.COM:80/a/../b?q=1").unwrap();
//! assert!(matches!(uri, Uri::ServersideAbsolute(_)));
//!
//! // Values round-trip exactly as written...
//! assert_eq!(uri.to_string(), "HTTP://Example.COM:80/a/../b?q=1");
//!
//! // ...and normalise to the RFC 3986 canonical form.
//! assert_eq!(uri.clone().normalise().to_string(), "http://example.com/b?q=1");
//!
//! // Resolve a reference against a base.
//! let relative = UriReference::parse("../c#frag").unwrap();
//! assert_eq!(uri.resolve(&relative).to_string(), "HTTP://Example.COM:80/c#frag");
//! ```
//!
//! # Builder
//!
//! ```rust
//! use uriref::Uri;
//!
//! let reference = Uri::builder()
//!     .try_scheme("https")?
//!     .try_host("example.com")?
//!     .try_path("/api/items")?
//!     .try_query("page=2")?
//!     .build()?;
//! assert_eq!(reference.to_string(), "https://example.com/api/items?page=2");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Equality and normal form
//!
//! Equality is over the parsed text, case-sensitively and before any
//! normalisation: `%61` and `a` are different values until normalised.
//! Every type implements [`Normalise`], whose `normalise` is idempotent and
//! returns an already-normal value unchanged.
//!
//! # Errors
//!
//! Each grammar has its own error type carrying the offending literal, and
//! reference-level errors chain down to the most specific component failure
//! while always reporting the complete input.

#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

mod authority;
mod builder;
mod encoding;
mod error;
mod fragment;
mod host;
mod normalise;
mod path;
mod port;
pub mod prelude;
mod query;
mod reference;
mod resolve;
mod scheme;
mod segment;
mod userinfo;

pub use authority::{Authority, HostAndPort};
pub use builder::UriBuilder;
pub use error::{
    AuthorityError, BuilderError, FragmentError, HostError, PasswordError, PathError, PortError,
    QueryError, QueryParamError, SchemeError, SegmentError, UriReferenceError,
    UriReferenceErrorKind, UserInfoError, UsernameError,
};
pub use fragment::Fragment;
pub use host::Host;
pub use normalise::Normalise;
pub use path::Path;
pub use port::Port;
pub use query::{Query, QueryParam, QueryParamKey, QueryParamValue};
pub use reference::{
    AbsoluteUrl, OpaqueUri, Origin, PathAndQuery, RelativeRef, RelativeUrl, SchemeRelativeUrl,
    ServersideAbsoluteUrl, Uri, UriReference,
};
pub use scheme::Scheme;
pub use segment::Segment;
pub use userinfo::{Password, UserInfo, Username};
