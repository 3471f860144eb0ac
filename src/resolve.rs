//! RFC 3986 §5.3 reference resolution.

use crate::path::Path;
use crate::reference::{classify_target, Parts, Uri, UriReference};

impl Uri {
    /// Resolves a reference against this base per RFC 3986 §5.3.
    ///
    /// A reference with a scheme wins entirely (its path still has
    /// dot-segments removed and the result is re-classified). One with an
    /// authority inherits only the base's scheme. Anything else inherits
    /// scheme and authority, with the paths merged; a fragment-only
    /// reference changes nothing but the fragment.
    ///
    /// # Examples
    ///
    /// ```
    /// use uriref::{Uri, UriReference};
    ///
    /// let base = Uri::parse("http://a/b/c/d;p?q").unwrap();
    /// let resolve = |r: &str| base.resolve(&UriReference::parse(r).unwrap()).to_string();
    ///
    /// assert_eq!(resolve("g"), "http://a/b/c/g");
    /// assert_eq!(resolve(".."), "http://a/b/");
    /// assert_eq!(resolve("?y"), "http://a/b/c/d;p?y");
    /// assert_eq!(resolve("#s"), "http://a/b/c/d;p?q#s");
    /// ```
    #[must_use]
    pub fn resolve(&self, reference: &UriReference) -> Self {
        let base = self.clone_parts();
        let r = reference.clone_parts();

        let target = if let Some(scheme) = r.scheme {
            Parts {
                scheme: Some(scheme),
                authority: r.authority,
                path: r.path.remove_dot_segments(),
                query: r.query,
                fragment: r.fragment,
            }
        } else if let Some(authority) = r.authority {
            Parts {
                scheme: base.scheme,
                authority: Some(authority),
                path: r.path.remove_dot_segments(),
                query: r.query,
                fragment: r.fragment,
            }
        } else if r.path.is_empty() {
            // Fragment- or query-only reference: everything else comes from
            // the base, including its query when the reference has none.
            Parts {
                scheme: base.scheme,
                authority: base.authority,
                path: base.path,
                query: r.query.or(base.query),
                fragment: r.fragment,
            }
        } else {
            let base_path = if base.authority.is_some() && base.path.is_empty() {
                Path::root()
            } else {
                base.path
            };
            Parts {
                scheme: base.scheme,
                authority: base.authority,
                path: base_path.merge(&r.path),
                query: r.query,
                fragment: r.fragment,
            }
        };

        classify_target(target)
    }
}
