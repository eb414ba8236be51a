//! Signing benchmarks for pushko-protocol.

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use pushko_protocol::{authenticate_socket, body_md5, canonical_query, sign, SignableRequest};

fn bench_canonicalize(c: &mut Criterion) {
    let request = SignableRequest::post("/apps/1/events")
        .with_param("body_md5", "900150983cd24fb0d6963f7d28e17f72")
        .with_param("socket_id", "123.456")
        .with_param("auth_key", "key")
        .with_param("auth_timestamp", "1000000000")
        .with_param("auth_version", "1.0");

    c.bench_function("canonical_query_5_params", |b| {
        b.iter(|| canonical_query(black_box(&request.params)))
    });
}

fn bench_sign(c: &mut Criterion) {
    let request = SignableRequest::post("/apps/1/events")
        .with_param("body_md5", "900150983cd24fb0d6963f7d28e17f72");

    c.bench_function("sign_trigger", |b| {
        b.iter(|| sign("key", b"secret", black_box(&request), Some(1_000_000_000)))
    });
}

fn bench_body_md5(c: &mut Criterion) {
    let body = vec![b'x'; 1024];

    let mut group = c.benchmark_group("body_md5");
    group.throughput(Throughput::Bytes(body.len() as u64));
    group.bench_function("1KiB", |b| b.iter(|| body_md5(black_box(&body))));
    group.finish();
}

fn bench_socket_auth(c: &mut Criterion) {
    c.bench_function("socket_auth_presence", |b| {
        b.iter(|| {
            authenticate_socket(
                "key",
                b"secret",
                black_box("123.456"),
                black_box("presence-room"),
                Some(r#"{"user_id":"42"}"#.to_string()),
            )
        })
    });
}

criterion_group!(
    benches,
    bench_canonicalize,
    bench_sign,
    bench_body_md5,
    bench_socket_auth
);
criterion_main!(benches);
