//! Property-based tests validating the parser against its grammars.
//!
//! These generate random grammar-conformant inputs and verify the
//! round-trip, idempotence, and classification-closure properties hold for
//! all of them.

use proptest::prelude::*;

use uriref::{
    Normalise, Path, Port, Query, Segment, Uri, UriReference,
};

/// Strategies for generating valid grammar-conformant inputs.
mod strategies {
    use super::*;

    /// Characters always legal raw in a path segment.
    const SEGMENT_CHARS: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789-._~!$&'()*+,;=:@";

    /// Characters legal raw in a registered name.
    const HOST_CHARS: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789-._~!$&'()";

    /// Characters legal raw in a query.
    const QUERY_CHARS: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789-._~&=/?:@";

    const LOWER: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
    const SCHEME_TAIL: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789+-.";

    fn string_of(charset: &'static [u8], length: std::ops::Range<usize>) -> impl Strategy<Value = String> {
        prop::collection::vec(prop::sample::select(charset.to_vec()), length)
            .prop_map(|bytes| bytes.into_iter().map(char::from).collect())
    }

    pub fn scheme() -> impl Strategy<Value = String> {
        (
            prop::sample::select(LOWER.to_vec()),
            string_of(SCHEME_TAIL, 0..8),
        )
            .prop_map(|(first, tail)| format!("{}{tail}", char::from(first)))
    }

    pub fn host() -> impl Strategy<Value = String> {
        prop_oneof![
            string_of(HOST_CHARS, 1..16),
            Just("[2001:db8::1]".to_string()),
            Just("[::1]".to_string()),
        ]
    }

    pub fn port() -> impl Strategy<Value = u16> {
        1u16..=65535
    }

    pub fn authority() -> impl Strategy<Value = String> {
        (host(), prop::option::of(port())).prop_map(|(host, port)| match port {
            Some(port) => format!("{host}:{port}"),
            None => host,
        })
    }

    pub fn segment() -> impl Strategy<Value = String> {
        string_of(SEGMENT_CHARS, 0..10)
    }

    /// An absolute path, the shape every authority-bearing reference uses.
    pub fn absolute_path() -> impl Strategy<Value = String> {
        prop::collection::vec(segment(), 1..5).prop_filter_map(
            "leading segment must be non-empty to avoid '//'",
            |segments| {
                if segments[0].is_empty() && segments.len() > 1 {
                    None
                } else {
                    Some(format!("/{}", segments.join("/")))
                }
            },
        )
    }

    pub fn query() -> impl Strategy<Value = String> {
        string_of(QUERY_CHARS, 0..16)
    }

    /// A full URL string: scheme + authority + path, optional query and
    /// fragment.
    pub fn url() -> impl Strategy<Value = String> {
        (
            scheme(),
            authority(),
            prop_oneof![Just(String::new()), absolute_path()],
            prop::option::of(query()),
            prop::option::of(string_of(QUERY_CHARS, 0..8)),
        )
            .prop_map(|(scheme, authority, path, query, fragment)| {
                let mut out = format!("{scheme}://{authority}{path}");
                if let Some(query) = query {
                    out.push('?');
                    out.push_str(&query);
                }
                if let Some(fragment) = fragment {
                    out.push('#');
                    out.push_str(&fragment);
                }
                out
            })
    }
}

proptest! {
    #[test]
    fn parsed_url_round_trips(input in strategies::url()) {
        let reference = UriReference::parse(&input).unwrap();
        prop_assert_eq!(reference.to_string(), input);
    }

    #[test]
    fn reparsing_yields_the_same_variant(input in strategies::url()) {
        let first = UriReference::parse(&input).unwrap();
        let second = UriReference::parse(&first.to_string()).unwrap();
        prop_assert_eq!(
            std::mem::discriminant(&first),
            std::mem::discriminant(&second)
        );
        prop_assert_eq!(first, second);
    }

    #[test]
    fn normalise_is_idempotent(input in strategies::url()) {
        let once = UriReference::parse(&input).unwrap().normalise();
        prop_assert!(once.is_normal_form());
        let twice = once.clone().normalise();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn normalised_form_still_parses_to_the_same_variant(input in strategies::url()) {
        let normalised = UriReference::parse(&input).unwrap().normalise();
        let reparsed = UriReference::parse(&normalised.to_string()).unwrap();
        prop_assert_eq!(normalised, reparsed);
    }

    #[test]
    fn segment_encode_decode_inverse(decoded in "\\PC{0,24}") {
        let segment = Segment::encode(&decoded);
        prop_assert_eq!(segment.decode(), decoded);
    }

    #[test]
    fn query_encode_decode_inverse(decoded in "[a-zA-Z0-9 %+/=?#&]{0,24}") {
        let query = Query::encode(&decoded);
        prop_assert_eq!(query.decode(), decoded);
    }

    #[test]
    fn encoded_segment_always_parses(decoded in "\\PC{0,24}") {
        let segment = Segment::encode(&decoded);
        prop_assert!(Segment::parse(segment.as_str()).is_ok());
    }

    #[test]
    fn distinct_segments_parse_to_distinct_values(
        a in strategies::segment(),
        b in strategies::segment(),
    ) {
        prop_assume!(a != b);
        prop_assert_ne!(Segment::parse(&a).unwrap(), Segment::parse(&b).unwrap());
    }

    #[test]
    fn port_round_trips_and_normalises(number in strategies::port(), zeros in 0usize..3) {
        let padded = format!("{}{number}", "0".repeat(zeros));
        let port = Port::parse(&padded).unwrap();
        prop_assert_eq!(port.number(), number);
        prop_assert_eq!(port.to_string(), padded);
        prop_assert_eq!(port.normalise().to_string(), number.to_string());
    }

    #[test]
    fn path_normalisation_is_idempotent(path in strategies::absolute_path()) {
        let once = Path::parse(&path).unwrap().normalise();
        let twice = once.clone().normalise();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn resolution_output_reparses_unchanged(
        base in strategies::url(),
        reference in strategies::absolute_path(),
    ) {
        let base = Uri::parse(&base).unwrap();
        let reference = UriReference::parse(&reference).unwrap();
        let resolved = base.resolve(&reference);
        let reparsed = Uri::parse(&resolved.to_string()).unwrap();
        prop_assert_eq!(resolved, reparsed);
    }
}
