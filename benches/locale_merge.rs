// SPDX-License-Identifier: MPL-2.0
//! Benchmarks for boot-path locale work.
//!
//! Measures the performance of:
//! - Shallow document merging (base + overlay)
//! - Language list parsing and deduplication
//! - First-render language resolution

use criterion::{criterion_group, criterion_main, Criterion};
use serde_json::Value;
use std::hint::black_box;
use tradeshell::locale::{merge_documents, parse_language_list, resolve_language, ResourceDocument};
use tradeshell::shell::LaunchContext;

/// A flat translation document with `keys` entries.
fn document(keys: usize, prefix: &str) -> ResourceDocument {
    let mut doc = ResourceDocument::new();
    for index in 0..keys {
        doc.insert(
            format!("{prefix}.key.{index}"),
            Value::String(format!("translation {index}")),
        );
    }
    doc
}

/// Benchmark the shallow right-biased merge on realistic document sizes.
fn bench_merge(c: &mut Criterion) {
    let mut group = c.benchmark_group("locale_merge");

    let base = document(240, "base");
    // Overlapping keys, the common case for an overlay.
    let overlay = document(40, "base");

    group.bench_function("merge_overlay_into_base", |b| {
        b.iter(|| {
            let merged = merge_documents(base.clone(), overlay.clone());
            black_box(&merged);
        });
    });

    group.finish();
}

/// Benchmark parsing a configured language list with duplicates and junk.
fn bench_language_list(c: &mut Criterion) {
    let mut group = c.benchmark_group("locale_merge");

    let raw = "en, fr, de, es, pt, ru, tr, vi, ja, ko, zh-CN, zh-TW, en, fr, bogus!!, de";

    group.bench_function("parse_language_list", |b| {
        b.iter(|| {
            let codes = parse_language_list(raw.split(','));
            black_box(&codes);
        });
    });

    group.finish();
}

/// Benchmark the full language-selection priority walk.
fn bench_resolution(c: &mut Criterion) {
    let mut group = c.benchmark_group("locale_merge");

    let available = parse_language_list("en,fr,de,ja,ko,zh-CN".split(','));

    group.bench_function("resolve_language_system_locale", |b| {
        b.iter(|| {
            let chosen = resolve_language(None, None, Some("fr-FR.UTF-8"), &available);
            black_box(&chosen);
        });
    });

    group.bench_function("resolve_language_activation_override", |b| {
        b.iter(|| {
            let mut ctx = LaunchContext::from_query("lang=ja&ref=promo");
            let chosen = resolve_language(Some(&mut ctx), None, None, &available);
            black_box(&chosen);
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_merge,
    bench_language_list,
    bench_resolution
);
criterion_main!(benches);
