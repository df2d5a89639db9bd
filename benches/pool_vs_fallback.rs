//! Pool-path vs fallback-path round-trip benchmarks

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use slotpool::PoolAllocator;

/// Allocate one element and give it straight back.
fn bench_single_element_round_trip(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_element_round_trip");
    group.throughput(Throughput::Elements(1));

    // Pool hit: the slot comes off the free list and goes back on it.
    group.bench_function("pool_hit", |b| {
        let mut alloc: PoolAllocator<[u8; 64], 64> = PoolAllocator::new();

        b.iter(|| {
            let ptr = alloc.allocate(1).unwrap();
            black_box(ptr);
            // SAFETY: ptr is live with count 1
            unsafe { alloc.deallocate(ptr, 1).unwrap() };
        });
    });

    // Pool miss: every slot is held, so each request spills to the system
    // allocator and the release routes by the range test.
    group.bench_function("pool_exhausted_fallback", |b| {
        let mut alloc: PoolAllocator<[u8; 64], 64> = PoolAllocator::new();
        let held: Vec<_> = (0..64).map(|_| alloc.allocate(1).unwrap()).collect();

        b.iter(|| {
            let ptr = alloc.allocate(1).unwrap();
            black_box(ptr);
            // SAFETY: ptr is live with count 1
            unsafe { alloc.deallocate(ptr, 1).unwrap() };
        });

        // SAFETY: held pointers are live with count 1
        for ptr in held {
            unsafe { alloc.deallocate(ptr, 1).unwrap() };
        }
    });

    group.finish();
}

/// Multi-element requests bypass the pool by contract.
fn bench_multi_element(c: &mut Criterion) {
    let mut group = c.benchmark_group("multi_element");
    group.throughput(Throughput::Elements(8));

    group.bench_function("fallback_array_of_8", |b| {
        let mut alloc: PoolAllocator<[u8; 64], 64> = PoolAllocator::new();

        b.iter(|| {
            let ptr = alloc.allocate(8).unwrap();
            black_box(ptr);
            // SAFETY: ptr is live with count 8
            unsafe { alloc.deallocate(ptr, 8).unwrap() };
        });
    });

    group.finish();
}

criterion_group!(benches, bench_single_element_round_trip, bench_multi_element);
criterion_main!(benches);
