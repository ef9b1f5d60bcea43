//! Control Cycle Benchmarks
//!
//! Measures the cost of one `update` with and without tuning telemetry, and
//! of whole runs against a simulated plant.
//!
//! Run with: cargo bench --bench control_loop

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::sync::Arc;

use pidloop_benchmarks::{run_to_completion, Plant};
use pidloop_core::{NullSink, TelemetrySink, TelemetryTable};
use pidloop_library::{ControlLoop, PidConfig, SharedPidConfig};

fn tuned_config(tuning_output: bool) -> SharedPidConfig {
    SharedPidConfig::new(
        PidConfig::new(0.8, 0.2, 0.05)
            .with_output_limit(1.0)
            .with_error_limit(5.0)
            .with_accuracy(0.01)
            .with_tuning_output(tuning_output),
    )
}

/// Benchmark a single control cycle
fn bench_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("update");

    let sinks: [(&str, bool, Arc<dyn TelemetrySink>); 3] = [
        ("quiet", false, Arc::new(NullSink)),
        ("null_sink", true, Arc::new(NullSink)),
        ("table_sink", true, Arc::new(TelemetryTable::new())),
    ];

    for (label, tuning, sink) in sinks {
        group.bench_function(label, |b| {
            let mut pid = ControlLoop::with_sink(tuned_config(tuning), sink.clone());
            pid.init(0.0, 100.0);
            let mut reading = 0.0;
            b.iter(|| {
                let command = pid.update(black_box(reading));
                reading = (reading + command) % 100.0;
                black_box(command)
            });
        });
    }

    group.finish();
}

/// Benchmark full runs to the target
fn bench_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("run_to_target");

    for &distance in &[1.0, 10.0, 100.0] {
        group.bench_with_input(BenchmarkId::from_parameter(distance), &distance, |b, &distance| {
            let config = tuned_config(false);
            b.iter(|| {
                let mut pid = ControlLoop::with_sink(config.clone(), Arc::new(NullSink));
                pid.init(0.0, distance);
                let mut plant = Plant::new(0.0, 0.5);
                black_box(run_to_completion(&mut pid, &mut plant, 100_000))
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_update, bench_run);
criterion_main!(benches);
