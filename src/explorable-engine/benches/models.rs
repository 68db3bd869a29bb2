// Copyright 2026 The Explorable Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use explorable_engine::{VariableStore, apply_response, formulas, mock_response, render_svg};

fn bench_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate");
    for schema in formulas() {
        let values = schema.defaults();
        group.bench_with_input(BenchmarkId::from_parameter(schema.id), &values, |b, values| {
            b.iter(|| schema.evaluate(values))
        });
    }
    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_svg");
    for schema in formulas() {
        let derived = schema.evaluate(&schema.defaults());
        group.bench_with_input(BenchmarkId::from_parameter(schema.id), &derived, |b, derived| {
            b.iter(|| render_svg(derived))
        });
    }
    group.finish();
}

fn bench_apply_mock(c: &mut Criterion) {
    let response = mock_response();
    c.bench_function("apply_mock_response", |b| {
        b.iter(|| {
            let mut store = VariableStore::new();
            apply_response(&mut store, &response, Default::default()).unwrap()
        })
    });
}

criterion_group!(benches, bench_evaluate, bench_render, bench_apply_mock);
criterion_main!(benches);
