//! Normal-form capability implemented by every value type.

/// Canonicalization capability.
///
/// `normalise` is idempotent, and a value for which [`is_normal_form`] is
/// already true is returned as-is without reallocation:
///
/// ```
/// use uriref::{Host, Normalise};
///
/// let host = Host::parse("EXAMPLE.COM").unwrap();
/// assert!(!host.is_normal_form());
/// assert_eq!(host.normalise().to_string(), "example.com");
/// ```
///
/// [`is_normal_form`]: Normalise::is_normal_form
pub trait Normalise: Sized {
    /// Returns true if [`normalise`](Normalise::normalise) would return this
    /// value unchanged. Never allocates.
    fn is_normal_form(&self) -> bool;

    /// Returns the canonical form of this value.
    #[must_use]
    fn normalise(self) -> Self;
}
