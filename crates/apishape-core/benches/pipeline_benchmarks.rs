//! Benchmarks for the transformation pipeline
//!
//! These benchmarks measure the cost of reshaping typical index and view
//! results of increasing size.
//!
//! Copyright (c) 2025 Apishape Team
//! Licensed under the Apache-2.0 license

use apishape_core::transformer::built_in::{cast_number, date_to_epoch};
use apishape_core::{PipelineConfigBuilder, Scalar, TimeZoneSetting, TransformPipeline, Value};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use serde_json::json;

fn create_result(index: usize) -> serde_json::Value {
    json!({
        "Post": {
            "id": index.to_string(),
            "title": format!("Post number {}", index),
            "created": "2021-07-04 10:00:00",
            "modified": "2021-07-05 11:30:00",
            "rating": "4.25"
        },
        "User": {"id": "7", "username": "writer", "created": "2020-01-01"},
        "Comment": [
            {"id": "1", "body": "First", "created": "2021-07-04 12:00:00"},
            {"id": "2", "body": "Second", "created": "2021-07-04 13:00:00"}
        ],
        "Tag": [{"id": "3", "name": "rust", "PostTag": {"post_id": index.to_string(), "tag_id": "3"}}]
    })
}

fn create_index(size: usize) -> Value {
    Value::from(serde_json::Value::Array((0..size).map(create_result).collect()))
}

fn create_pipeline() -> TransformPipeline {
    PipelineConfigBuilder::new()
        .time_zone(TimeZoneSetting::Utc)
        .build_pipeline()
}

fn bench_single_record(c: &mut Criterion) {
    let pipeline = create_pipeline();
    let input = Value::from(create_result(1));

    c.bench_function("transform_single_record", |b| {
        b.iter(|| pipeline.transform(black_box(input.clone()), "Post"))
    });
}

fn bench_index_sizes(c: &mut Criterion) {
    let pipeline = create_pipeline();
    let mut group = c.benchmark_group("transform_index");

    for size in [10, 100, 1000] {
        let input = create_index(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &input, |b, input| {
            b.iter(|| pipeline.transform(black_box(input.clone()), "Post"))
        });
    }

    group.finish();
}

fn bench_value_transformers(c: &mut Criterion) {
    let mut group = c.benchmark_group("value_transformers");

    group.bench_function("cast_number_numeric", |b| {
        b.iter(|| cast_number(black_box(Scalar::String("12345".to_string()))))
    });
    group.bench_function("cast_number_text", |b| {
        b.iter(|| cast_number(black_box(Scalar::String("hello world".to_string()))))
    });
    group.bench_function("date_to_epoch_datetime", |b| {
        b.iter(|| {
            date_to_epoch(
                black_box(Scalar::String("2021-07-04 10:00:00".to_string())),
                TimeZoneSetting::Utc,
            )
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_single_record,
    bench_index_sizes,
    bench_value_transformers
);
criterion_main!(benches);
