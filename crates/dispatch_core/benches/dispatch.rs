//! Dispatch benchmarks using Criterion.rs.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use dispatch_core::selection::{select_longest_idle, Candidate, RandomTieBreaker};
use dispatch_core::test_helpers::{register_fleet, seeded_registry};
use dispatch_core::City;

fn bench_query_booking(c: &mut Criterion) {
    let fleets = vec![("small", 50), ("medium", 500), ("large", 5_000)];

    let mut group = c.benchmark_group("query_booking");
    for (name, size) in fleets {
        let (registry, _clock) = seeded_registry(42);
        let ids: Vec<String> = (0..size).map(|i| format!("C{i}")).collect();
        let fleet: Vec<(&str, City)> = ids
            .iter()
            .enumerate()
            .map(|(i, id)| (id.as_str(), City::ALL[i % City::ALL.len()]))
            .collect();
        register_fleet(&registry, &fleet);

        group.bench_with_input(BenchmarkId::from_parameter(name), &registry, |b, registry| {
            b.iter(|| {
                let booking = registry
                    .query_booking(black_box(City::Pune), City::Mumbai)
                    .expect("booking");
                registry.cancel_trip(booking.booking_id).expect("cancel");
            });
        });
    }
    group.finish();
}

fn bench_selection(c: &mut Criterion) {
    let candidates: Vec<Candidate> = (0..10_000)
        .map(|slot| Candidate {
            slot,
            last_seen_at: (slot % 100) as u64,
        })
        .collect();
    let mut tie_breaker = RandomTieBreaker::seeded(7);

    c.bench_function("select_longest_idle_10k", |b| {
        b.iter(|| select_longest_idle(black_box(&candidates), &mut tie_breaker));
    });
}

criterion_group!(benches, bench_query_booking, bench_selection);
criterion_main!(benches);
