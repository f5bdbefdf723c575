//! Microbenchmarks for the comparator hot path.
//!
//! Measures per-call latency of decoding and ordering encoded keys, which
//! the storage engine pays on every lookup step and compaction merge.
//!
//! Run with: `cargo bench -p samplekey -- compare`

#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use samplekey::ffi::samplekey_compare;
use samplekey::{FingerprintSummary, KeyComparator, SampleKey, SampleKeyComparator, order};

/// Two keys that agree on every field up to `depth` and differ on the next.
fn keys_differing_at(depth: usize) -> (SampleKey, SampleKey) {
    let left = SampleKey::new(FingerprintSummary::new(1000, "a", 3, "y"), 1_700_000_000)
        .with_payload(1_700_000_300, 120);
    let mut right = left.clone();
    match depth {
        0 => right.fingerprint.hash += 1,
        1 => right.fingerprint.first = b"b".to_vec(),
        2 => right.fingerprint.modulus += 1,
        3 => right.fingerprint.last = b"z".to_vec(),
        4 => right.timestamp += 1,
        _ => right.sample_count += 1,
    }
    (left, right)
}

fn bench_order_decoded(c: &mut Criterion) {
    let mut group = c.benchmark_group("order/differs_at");

    for (depth, label) in ["hash", "first", "modulus", "last", "timestamp", "equal"]
        .iter()
        .enumerate()
    {
        let (left, right) = keys_differing_at(depth);
        group.bench_with_input(BenchmarkId::from_parameter(label), &depth, |b, _| {
            b.iter(|| order(black_box(&left), black_box(&right)));
        });
    }

    group.finish();
}

fn bench_compare_encoded(c: &mut Criterion) {
    let mut group = c.benchmark_group("compare/differs_at");
    let comparator = SampleKeyComparator::new();

    for (depth, label) in [(0, "hash"), (4, "timestamp"), (5, "equal")] {
        let (left, right) = keys_differing_at(depth);
        let (left, right) = (left.encode(), right.encode());
        group.bench_with_input(BenchmarkId::from_parameter(label), &depth, |b, _| {
            b.iter(|| comparator.compare(black_box(&left), black_box(&right)));
        });
    }

    group.finish();
}

fn bench_compare_empty(c: &mut Criterion) {
    let comparator = SampleKeyComparator::new();
    let (key, _) = keys_differing_at(0);
    let key = key.encode();
    let empty: &[u8] = &[];

    c.bench_function("compare/empty_vs_populated", |b| {
        b.iter(|| comparator.compare(black_box(empty), black_box(&key)));
    });
}

fn bench_compare_ffi(c: &mut Criterion) {
    let (left, right) = keys_differing_at(4);
    let (left, right) = (left.encode(), right.encode());

    c.bench_function("compare/ffi", |b| {
        b.iter(|| {
            // SAFETY: both buffers are live for the duration of the call.
            unsafe {
                samplekey_compare(
                    std::ptr::null_mut(),
                    black_box(left.as_ptr()).cast(),
                    left.len(),
                    black_box(right.as_ptr()).cast(),
                    right.len(),
                )
            }
        });
    });
}

fn bench_sort(c: &mut Criterion) {
    let mut group = c.benchmark_group("sort/key_count");
    let comparator = SampleKeyComparator::new();

    for count in [100u64, 1_000, 10_000] {
        let keys: Vec<Vec<u8>> = (0..count)
            .rev()
            .map(|i| {
                let fingerprint = FingerprintSummary::new(i % 97, "a", 0, "z");
                SampleKey::new(fingerprint, 1_700_000_000 + i64::try_from(i).unwrap_or(0))
                    .encode()
            })
            .collect();

        group.bench_with_input(BenchmarkId::from_parameter(count), &keys, |b, keys| {
            b.iter(|| comparator.sort(black_box(keys.iter())));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_order_decoded,
    bench_compare_encoded,
    bench_compare_empty,
    bench_compare_ffi,
    bench_sort,
);
criterion_main!(benches);
