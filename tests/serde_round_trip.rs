//! Serde round-trip tests: every type serializes as its string form and
//! re-validates on the way back in.

#![cfg(feature = "serde")]

use uriref::{
    AbsoluteUrl, Authority, Fragment, Host, HostAndPort, Origin, PathAndQuery, Port, Query,
    Scheme, Uri, UriReference, UserInfo,
};

fn round_trip<T>(value: &T) -> T
where
    T: serde::Serialize + serde::de::DeserializeOwned,
{
    let json = serde_json::to_string(value).expect("serializes");
    serde_json::from_str(&json).expect("deserializes")
}

#[test]
fn components_round_trip() {
    let scheme = Scheme::parse("HTTP").unwrap();
    assert_eq!(round_trip(&scheme), scheme);

    let host = Host::parse("Example.COM").unwrap();
    assert_eq!(round_trip(&host), host);

    let port = Port::parse("0080").unwrap();
    assert_eq!(round_trip(&port), port);

    let userinfo = UserInfo::parse("alice:secret").unwrap();
    assert_eq!(round_trip(&userinfo), userinfo);

    let query = Query::parse("a=1&b").unwrap();
    assert_eq!(round_trip(&query), query);

    let fragment = Fragment::parse("sec{2}").unwrap();
    assert_eq!(round_trip(&fragment), fragment);
}

#[test]
fn authorities_round_trip() {
    let authority = Authority::parse("alice@example.com:8080").unwrap();
    assert_eq!(round_trip(&authority), authority);

    // The empty-but-present port survives serialization.
    let authority = Authority::parse("example.com:").unwrap();
    assert_eq!(round_trip(&authority), authority);

    let host_and_port = HostAndPort::parse("[::1]:9000").unwrap();
    assert_eq!(round_trip(&host_and_port), host_and_port);
}

#[test]
fn references_round_trip_preserving_variant() {
    let reference = UriReference::parse("HTTP://Example.COM:0080/A?q=%31#f").unwrap();
    let back = round_trip(&reference);
    assert_eq!(back, reference);
    assert_eq!(back.to_string(), "HTTP://Example.COM:0080/A?q=%31#f");

    let uri = Uri::parse("mailto:someone%40example.com").unwrap();
    assert_eq!(round_trip(&uri), uri);

    let origin = Origin::parse("https://example.com").unwrap();
    assert_eq!(round_trip(&origin), origin);

    let url = AbsoluteUrl::parse("https://example.com/a#f").unwrap();
    assert_eq!(round_trip(&url), url);

    let target = PathAndQuery::parse("/search?q=uri").unwrap();
    assert_eq!(round_trip(&target), target);
}

#[test]
fn malformed_strings_fail_deserialization() {
    assert!(serde_json::from_str::<Port>("\"+80\"").is_err());
    assert!(serde_json::from_str::<Host>("\"[::1\"").is_err());
    assert!(serde_json::from_str::<Origin>("\"https://example.com/path\"").is_err());
    assert!(serde_json::from_str::<Scheme>("\"1http\"").is_err());
}

#[test]
fn serialized_form_is_the_display_form() {
    let uri = Uri::parse("https://example.com/a?b").unwrap();
    let json = serde_json::to_string(&uri).unwrap();
    assert_eq!(json, format!("\"{uri}\""));
}
