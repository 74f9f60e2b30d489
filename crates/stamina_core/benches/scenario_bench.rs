//! Scenario throughput
//!
//! - single 927 s run with and without history
//! - full validation suite
//! - batch evaluation scaling over candidate count

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use stamina_core::{
    evaluate_candidates, run_suite, simulate_scenario, MovementType, ParameterSet, Scenario,
    ScenarioRunner,
};

fn baseline() -> Scenario {
    Scenario::constant("baseline", 3.47, 927.0)
}

fn bench_single_run(c: &mut Criterion) {
    let params = ParameterSet::default();
    let scenario = baseline();
    let mut group = c.benchmark_group("single_run");
    group.throughput(Throughput::Elements(4635));

    group.bench_function("with_history", |b| {
        b.iter(|| black_box(simulate_scenario(black_box(&scenario), &params, 0.2, None)))
    });
    group.bench_function("without_history", |b| {
        let runner = ScenarioRunner::new(&params).with_history(false);
        b.iter(|| black_box(runner.run(black_box(&scenario), None)))
    });
    group.bench_function("seeded", |b| {
        b.iter(|| black_box(simulate_scenario(black_box(&scenario), &params, 0.2, Some(1))))
    });
    group.finish();
}

fn bench_suite(c: &mut Criterion) {
    let params = ParameterSet::default();
    c.bench_function("validation_suite", |b| b.iter(|| black_box(run_suite(&params, 0.2))));
}

fn bench_batch(c: &mut Criterion) {
    let scenarios = vec![
        baseline(),
        Scenario::constant("sprint", 5.0, 30.0).with_movement(MovementType::Sprint),
        Scenario::constant("march", 1.5, 600.0)
            .with_movement(MovementType::Walk)
            .with_weight(130.0),
    ];
    let mut group = c.benchmark_group("batch_candidates");
    for count in [1usize, 8, 32] {
        let candidates: Vec<ParameterSet> = (0..count)
            .map(|i| {
                let mut p = ParameterSet::default();
                p.recovery.base_recovery_rate = 0.0008 + i as f64 * 0.00005;
                p
            })
            .collect();
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &candidates, |b, c| {
            b.iter(|| black_box(evaluate_candidates(c, &scenarios, 0.2, None)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_single_run, bench_suite, bench_batch);
criterion_main!(benches);
