//! Pool versus contiguous storage under the same red-black tree.

use std::collections::BTreeMap;
use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use fxc_containers::{
    CompactContiguousFixedMap, CompactFixedMap, ContiguousFixedMap, FixedMap,
};

const CAPACITY: usize = 4096;
const SIZES: [usize; 4] = [64, 256, 1024, 4096];

/// Deterministic key sequence (xorshift64), keys drawn from `0..size`.
fn shuffled_keys(size: usize) -> Vec<u64> {
    let mut state = 0x9E37_79B9_7F4A_7C15_u64;
    (0..size)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            state % size as u64
        })
        .collect()
}

macro_rules! bench_map_kind {
    ($group:expr, $name:literal, $ty:ty, $size:expr, $keys:expr) => {
        $group.bench_with_input(BenchmarkId::new($name, $size), $keys, |b, keys| {
            let mut map = Box::new(<$ty>::new());
            b.iter(|| {
                for &k in keys {
                    map.insert(k, k);
                }
                black_box(map.len());
                map.clear();
            });
        });
    };
}

fn benchmark_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("map_insert");

    for size in SIZES {
        let keys = shuffled_keys(size);
        bench_map_kind!(group, "pool", FixedMap<u64, u64, CAPACITY>, size, &keys);
        bench_map_kind!(group, "contiguous", ContiguousFixedMap<u64, u64, CAPACITY>, size, &keys);
        bench_map_kind!(group, "pool_compact", CompactFixedMap<u64, u64, CAPACITY>, size, &keys);
        bench_map_kind!(
            group,
            "contiguous_compact",
            CompactContiguousFixedMap<u64, u64, CAPACITY>,
            size,
            &keys
        );

        group.bench_with_input(BenchmarkId::new("btree_map", size), &keys, |b, keys| {
            let mut map = BTreeMap::new();
            b.iter(|| {
                for &k in keys {
                    map.insert(k, k);
                }
                black_box(map.len());
                map.clear();
            });
        });
    }

    group.finish();
}

fn benchmark_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("map_lookup");

    for size in SIZES {
        let keys = shuffled_keys(size);

        let mut pool = Box::new(FixedMap::<u64, u64, CAPACITY>::new());
        let mut contiguous = Box::new(ContiguousFixedMap::<u64, u64, CAPACITY>::new());
        for k in 0..size as u64 {
            pool.insert(k, k);
            contiguous.insert(k, k);
        }

        group.bench_with_input(BenchmarkId::new("pool", size), &keys, |b, keys| {
            b.iter(|| keys.iter().filter_map(|k| pool.get(black_box(k))).sum::<u64>());
        });
        group.bench_with_input(BenchmarkId::new("contiguous", size), &keys, |b, keys| {
            b.iter(|| keys.iter().filter_map(|k| contiguous.get(black_box(k))).sum::<u64>());
        });
    }

    group.finish();
}

fn benchmark_erase(c: &mut Criterion) {
    let mut group = c.benchmark_group("map_erase");

    for size in SIZES {
        let keys = shuffled_keys(size);

        group.bench_with_input(BenchmarkId::new("pool", size), &keys, |b, keys| {
            let mut map = Box::new(FixedMap::<u64, u64, CAPACITY>::new());
            b.iter(|| {
                for k in 0..size as u64 {
                    map.insert(k, k);
                }
                for k in keys {
                    black_box(map.remove(k));
                }
                map.clear();
            });
        });
        // Erasing relocates the last node on every removal.
        group.bench_with_input(BenchmarkId::new("contiguous", size), &keys, |b, keys| {
            let mut map = Box::new(ContiguousFixedMap::<u64, u64, CAPACITY>::new());
            b.iter(|| {
                for k in 0..size as u64 {
                    map.insert(k, k);
                }
                for k in keys {
                    black_box(map.remove(k));
                }
                map.clear();
            });
        });
    }

    group.finish();
}

fn benchmark_iterate(c: &mut Criterion) {
    let mut group = c.benchmark_group("map_iterate");
    let mut pool = Box::new(FixedMap::<u64, u64, CAPACITY>::new());
    let mut contiguous = Box::new(ContiguousFixedMap::<u64, u64, CAPACITY>::new());
    for k in shuffled_keys(CAPACITY) {
        pool.insert(k, k);
        contiguous.insert(k, k);
    }

    group.bench_function("pool", |b| b.iter(|| pool.values().sum::<u64>()));
    group.bench_function("contiguous", |b| b.iter(|| contiguous.values().sum::<u64>()));
    group.finish();
}

criterion_group!(
    benches,
    benchmark_insert,
    benchmark_lookup,
    benchmark_erase,
    benchmark_iterate
);
criterion_main!(benches);
