//! Benchmarks for newsprint segmentation and export.
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use newsprint::acquire::DEMO_TEXT;
use newsprint::{HeuristicSegmenter, Table};

/// Repeat the demonstration page to build a longer transcript.
fn create_test_text(copies: usize) -> String {
    let mut text = String::with_capacity(DEMO_TEXT.len() * copies);
    for _ in 0..copies {
        text.push_str(DEMO_TEXT);
        text.push('\n');
    }
    text
}

/// Benchmark compiling the default rules.
fn bench_segmenter_creation(c: &mut Criterion) {
    c.bench_function("segmenter_creation", |b| {
        b.iter(HeuristicSegmenter::default);
    });
}

/// Benchmark segmentation at various transcript sizes.
fn bench_segmentation(c: &mut Criterion) {
    let segmenter = HeuristicSegmenter::default();
    let mut group = c.benchmark_group("segmentation");

    for copies in [1, 10, 50].iter() {
        let text = create_test_text(*copies);
        group.bench_function(format!("{}_pages", copies), |b| {
            b.iter(|| segmenter.segment(black_box(&text)));
        });
    }

    group.finish();
}

/// Benchmark flattening and CSV encoding.
fn bench_csv_export(c: &mut Criterion) {
    let doc = HeuristicSegmenter::default().segment(&create_test_text(10));

    c.bench_function("csv_export", |b| {
        b.iter(|| Table::from_document(black_box(&doc)).to_csv());
    });
}

criterion_group!(
    benches,
    bench_segmenter_creation,
    bench_segmentation,
    bench_csv_export,
);
criterion_main!(benches);
