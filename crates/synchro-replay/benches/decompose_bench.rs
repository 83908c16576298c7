//! Decomposition Benchmark Suite
//!
//! Measures the per-event overhead the replay engine pays on its hot path:
//!
//! 1. **Computation decompose + drain** at several operation counts and
//!    granules
//! 2. **Communication decompose + drain** with growing prerequisite lists
//! 3. **Statistics folding** of drained sub-events

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use synchro_replay::domain::{
    ComputeCounters, DependencyRecord, Event, EventId, ReplayConfig, ThreadId, ThreadStats, Ticks,
};

fn computation_event(ops: u64, config: &ReplayConfig) -> Event {
    let reads = (0..ops / 4)
        .map(|i| DependencyRecord::local(0x1000 + i * 8, 8))
        .collect();
    let writes = (0..ops / 4)
        .map(|i| DependencyRecord::local(0x8000 + i * 8, 8))
        .collect();
    Event::computation(
        ThreadId::new(0),
        EventId::new(1),
        ComputeCounters::new(ops, ops, ops / 4, ops / 4),
        reads,
        writes,
    )
    .with_config(config)
}

fn bench_computation(c: &mut Criterion) {
    let mut group = c.benchmark_group("computation_decompose_drain");

    for &granule in &[1u64, 16] {
        let config = ReplayConfig {
            compute_granule: granule,
            ..Default::default()
        };
        for &ops in &[16u64, 256, 4096] {
            group.bench_with_input(
                BenchmarkId::new(format!("granule_{granule}"), ops),
                &ops,
                |b, &ops| {
                    b.iter(|| {
                        let mut event = computation_event(ops, &config);
                        event.decompose().unwrap();
                        while !event.is_drained() {
                            black_box(event.pop_sub_event().unwrap());
                        }
                    });
                },
            );
        }
    }

    group.finish();
}

fn bench_communication(c: &mut Criterion) {
    let mut group = c.benchmark_group("communication_decompose_drain");

    for &prereqs in &[1u32, 8, 64] {
        group.bench_with_input(BenchmarkId::from_parameter(prereqs), &prereqs, |b, &n| {
            b.iter(|| {
                let records = (0..n)
                    .map(|i| {
                        DependencyRecord::remote(
                            ThreadId::new(i % 4 + 1),
                            EventId::new(u64::from(i)),
                            0x4000 + u64::from(i) * 8,
                            8,
                        )
                    })
                    .collect();
                let mut event = Event::communication(ThreadId::new(0), EventId::new(1), records);
                event.decompose().unwrap();
                while !event.is_drained() {
                    black_box(event.pop_sub_event().unwrap());
                }
            });
        });
    }

    group.finish();
}

fn bench_stats(c: &mut Criterion) {
    let config = ReplayConfig::default();
    let mut event = computation_event(1024, &config);
    event.decompose().unwrap();
    let subs: Vec<_> = event.sub_events().cloned().collect();

    c.bench_function("stats_record_2560_sub_events", |b| {
        b.iter(|| {
            let mut stats = ThreadStats::new(ThreadId::new(0));
            for (i, sub) in subs.iter().enumerate() {
                stats.record_sub_event(sub, i % 2 == 0, Ticks(3));
            }
            black_box(stats.snapshot())
        });
    });
}

criterion_group!(benches, bench_computation, bench_communication, bench_stats);
criterion_main!(benches);
