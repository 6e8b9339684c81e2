//! Benchmarks for pdfslice output parsing.
//!
//! Run with: cargo bench
//!
//! Tool invocations dominate real workloads; these cover the parts that
//! run in-process on every document.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pdfslice::{parse_page_count, PageSelection};

/// Builds pdfinfo-style output with `extra_lines` metadata lines before the
/// page count.
fn create_pdfinfo_output(extra_lines: usize) -> String {
    let mut output = String::new();
    for i in 0..extra_lines {
        output.push_str(&format!("Custom Metadata {}: value number {}\n", i, i));
    }
    output.push_str("Pages:          128\n");
    output.push_str("Encrypted:      no\n");
    output.push_str("Page size:      595.276 x 841.89 pts (A4)\n");
    output
}

fn bench_parse_page_count(c: &mut Criterion) {
    let short = create_pdfinfo_output(10);
    let long = create_pdfinfo_output(1000);

    c.bench_function("parse_page_count_short", |b| {
        b.iter(|| parse_page_count(black_box(&short)))
    });

    c.bench_function("parse_page_count_long", |b| {
        b.iter(|| parse_page_count(black_box(&long)))
    });

    c.bench_function("parse_page_count_missing", |b| {
        b.iter(|| parse_page_count(black_box("Title: none\nEncrypted: no\n")))
    });
}

fn bench_page_selection(c: &mut Criterion) {
    c.bench_function("page_selection_parse", |b| {
        b.iter(|| PageSelection::parse(black_box("1,3,5-20,40-60,99")))
    });

    let selection = PageSelection::parse("1,3,5-20,40-60,99").unwrap();
    c.bench_function("page_selection_indices", |b| {
        b.iter(|| selection.indices(black_box(500)))
    });
}

criterion_group!(benches, bench_parse_page_count, bench_page_selection);
criterion_main!(benches);
