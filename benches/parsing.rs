//! Criterion benchmarks for parsing, normalisation, and resolution.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use uriref::{Normalise, Uri, UriReference};

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    let test_cases = [
        ("origin", "https://example.com"),
        ("typical", "https://example.com/api/v1/items?page=2&per_page=50"),
        (
            "userinfo_ipv6",
            "https://user:secret@[2001:db8::1]:8443/a/b/c?q=1#frag",
        ),
        (
            "encoded",
            "https://example.com/%E2%82%AC/prices?from=%31%32&to=%33#%64etails",
        ),
        ("relative", "/api/v1/items?page=2"),
        ("opaque", "mailto:someone%40example.com?subject=hello"),
    ];

    for (name, input) in test_cases {
        group.throughput(Throughput::Bytes(input.len() as u64));
        group.bench_with_input(BenchmarkId::new("reference", name), &input, |b, input| {
            b.iter(|| UriReference::parse(black_box(input)));
        });
    }

    group.finish();
}

fn bench_normalise(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalise");

    let test_cases = [
        ("already_normal", "https://example.com/a/b?q=1"),
        ("case_and_port", "HTTPS://EXAMPLE.COM:443/a/b?q=1"),
        ("dot_segments", "https://example.com/a/./b/../c/d/../e"),
        ("escapes", "https://example.com/%61%62%63?%64=%65"),
    ];

    for (name, input) in test_cases {
        let reference = UriReference::parse(input).expect("valid benchmark input");
        group.bench_with_input(BenchmarkId::new("reference", name), &reference, |b, reference| {
            b.iter(|| black_box(reference.clone()).normalise());
        });
    }

    group.finish();
}

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve");

    let base = Uri::parse("http://a/b/c/d;p?q").expect("valid base");
    let test_cases = [
        ("sibling", "g"),
        ("up_and_over", "../../../g"),
        ("fragment_only", "#s"),
        ("authority", "//other/x"),
    ];

    for (name, input) in test_cases {
        let reference = UriReference::parse(input).expect("valid benchmark input");
        group.bench_with_input(BenchmarkId::new("against_base", name), &reference, |b, reference| {
            b.iter(|| base.resolve(black_box(reference)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_parse, bench_normalise, bench_resolve);
criterion_main!(benches);
