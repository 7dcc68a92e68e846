//! Benchmarks for the simulation engine

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use seismic_sim::prelude::*;

fn create_engine(stories: usize, bays: usize) -> SimulationEngine<ManualClock> {
    let building = BuildingModel::new(
        6.0 * bays as f64,
        6.0 * bays as f64,
        3.0 * stories as f64,
        stories,
        bays,
        bays,
    )
    .unwrap();
    SimulationEngine::with_clock(
        building,
        MaterialProperties::concrete(),
        SeismicExcitation::new(0.4, 2.0, 5.0),
        ManualClock::new(),
    )
    .unwrap()
}

fn run_at_60fps(engine: &mut SimulationEngine<ManualClock>, options: StartOptions) {
    engine.run_to_completion(options, 1.0 / 60.0).unwrap();
}

fn benchmark_small_frame(c: &mut Criterion) {
    c.bench_function("run_4story_3bay", |b| {
        b.iter(|| {
            let mut engine = create_engine(4, 3);
            run_at_60fps(&mut engine, StartOptions::default());
            black_box(engine.result());
        })
    });
}

fn benchmark_large_frame(c: &mut Criterion) {
    c.bench_function("run_12story_6bay", |b| {
        b.iter(|| {
            let mut engine = create_engine(12, 6);
            run_at_60fps(&mut engine, StartOptions::default());
            black_box(engine.result());
        })
    });
}

fn benchmark_large_frame_batched(c: &mut Criterion) {
    c.bench_function("run_12story_6bay_batch200", |b| {
        b.iter(|| {
            let mut engine = create_engine(12, 6);
            run_at_60fps(&mut engine, StartOptions::default().with_batch_size(200));
            black_box(engine.result());
        })
    });
}

fn benchmark_single_step(c: &mut Criterion) {
    c.bench_function("step_12story_6bay", |b| {
        let mut engine = create_engine(12, 6);
        engine.start(StartOptions::default()).unwrap();
        b.iter(|| {
            if engine.state() != RunState::Running {
                engine.start(StartOptions::default()).unwrap();
            }
            engine.clock().advance(1.0 / 600.0);
            black_box(engine.step().unwrap());
        })
    });
}

criterion_group!(
    benches,
    benchmark_small_frame,
    benchmark_large_frame,
    benchmark_large_frame_batched,
    benchmark_single_step,
);

criterion_main!(benches);
