//! Benchmarks for property bag operations.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use reqprops::{add_props, get_all_props, get_props, RequestContext};
use serde_json::json;

fn props_benchmark(c: &mut Criterion) {
    c.bench_function("add_then_get", |b| {
        b.iter(|| {
            let mut req = RequestContext::new("GET", "/");
            add_props(&mut req, &json!({"user": {"name": "dummy", "id": 1}}), "authenticateUser")
                .unwrap();
            let user: serde_json::Value = get_props(&req, "authenticateUser").unwrap();
            black_box(user)
        })
    });

    c.bench_function("get_all_props_16", |b| {
        let mut req = RequestContext::new("GET", "/");
        for i in 0..16 {
            add_props(&mut req, &i, &format!("stage{i}")).unwrap();
        }
        b.iter(|| black_box(get_all_props(&req)))
    });
}

criterion_group!(benches, props_benchmark);
criterion_main!(benches);
