//! Benchmarks for property reads, writes and observer fan-out.
//!
//! Run with: cargo bench -p ftui-property --bench property_bench

use std::cell::{Cell, RefCell};
use std::hint::black_box;
use std::rc::Rc;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use ftui_property::{NotifyPolicy, ObservableProperty, Property};

// =============================================================================
// Reads
// =============================================================================

fn bench_get(c: &mut Criterion) {
    let mut group = c.benchmark_group("property/get");

    let plain = Property::with_value(42u64);
    group.bench_function("identity", |b| b.iter(|| black_box(plain.get())));

    let computed = Property::read_only(|v: &u64| v.wrapping_mul(31));
    group.bench_function("custom", |b| b.iter(|| black_box(computed.get())));

    let owner = Rc::new(RefCell::new(7u64));
    let bound = Property::read_only_bound(&owner, |v: &u64| *v);
    group.bench_function("bound", |b| b.iter(|| black_box(bound.get())));

    group.finish();
}

// =============================================================================
// Writes with fan-out
// =============================================================================

fn bench_set_fan_out(c: &mut Criterion) {
    let mut group = c.benchmark_group("property/set");

    for observers in [0usize, 1, 8, 64] {
        group.throughput(Throughput::Elements(observers.max(1) as u64));

        let hits = Rc::new(Cell::new(0u64));
        let prop = ObservableProperty::new();
        for _ in 0..observers {
            let hits = Rc::clone(&hits);
            prop.observe(move |v: &u64| hits.set(hits.get().wrapping_add(*v)));
        }
        group.bench_with_input(
            BenchmarkId::new("overwrite", observers),
            &observers,
            |b, _| {
                let mut next = 0u64;
                b.iter(|| {
                    next = next.wrapping_add(1);
                    prop.set(black_box(next)).unwrap();
                });
            },
        );

        let owner = Rc::new(RefCell::new(0u64));
        let bound = ObservableProperty::bound(
            &owner,
            |v: &u64| *v,
            |v: &mut u64, next| *v = next,
            NotifyPolicy::OnSet,
        );
        for _ in 0..observers {
            let hits = Rc::clone(&hits);
            bound.observe(move |v: &u64| hits.set(hits.get().wrapping_add(*v)));
        }
        group.bench_with_input(BenchmarkId::new("bound", observers), &observers, |b, _| {
            let mut next = 0u64;
            b.iter(|| {
                next = next.wrapping_add(1);
                bound.set(black_box(next)).unwrap();
            });
        });

        black_box(hits.get());
    }

    group.finish();
}

// =============================================================================
// Explicit notification
// =============================================================================

fn bench_notify_observers(c: &mut Criterion) {
    let mut group = c.benchmark_group("property/notify");

    for observers in [1usize, 8, 64] {
        group.throughput(Throughput::Elements(observers as u64));
        let prop = ObservableProperty::read_only_constant(3u64);
        for _ in 0..observers {
            prop.observe(|v: &u64| {
                black_box(*v);
            });
        }
        group.bench_with_input(
            BenchmarkId::new("read_only_constant", observers),
            &observers,
            |b, _| b.iter(|| prop.notify_observers()),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_get, bench_set_fan_out, bench_notify_observers);
criterion_main!(benches);
