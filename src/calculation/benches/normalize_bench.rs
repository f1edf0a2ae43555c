//! Benchmarks for the force normalization hot path.
//!
//! Run with: `cargo bench -p flapping_calc`

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ndarray::{Array1, Zip};

use flapping_calc::{ellipse, regularize, Flapping, ForceSeries};

/// Force history sampled every `dt` over `periods` flapping periods.
fn generate_forces(model: &Flapping, periods: f64, dt: f64) -> ForceSeries {
    let n = (periods * model.params().period() / dt).ceil() as usize;
    let t = Array1::from_iter((0..n).map(|i| 0.5 * dt + i as f64 * dt));
    let (u0, _) = model.translational_velocity(t.view());
    let fx = u0.mapv(|u| -0.8 * u);
    let fy = Zip::from(&t).map_collect(|&ti| (ti * 3.0).sin());
    ForceSeries::new(t, fx, fy).unwrap()
}

fn bench_normalize(c: &mut Criterion) {
    let model = Flapping::default();
    let raw = ellipse(0.5, 0.05, (0.0, 0.0), 100).unwrap();
    let body = regularize(raw.x(), raw.y(), 0.025).unwrap();

    let mut group = c.benchmark_group("normalize");
    for &dt in &[0.04, 0.01] {
        let forces = generate_forces(&model, 4.0, dt);
        group.throughput(Throughput::Elements(forces.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(forces.len()), &forces, |b, forces| {
            b.iter(|| model.normalize(forces, body.x()).unwrap());
        });
    }
    group.finish();
}

fn bench_kinematics(c: &mut Criterion) {
    let model = Flapping::default();
    let t = Array1::linspace(0.0, 16.0, 1600);
    c.bench_function("quasi_steady_coefficients", |b| {
        b.iter(|| model.quasi_steady_coefficients(t.view()));
    });
}

criterion_group!(benches, bench_normalize, bench_kinematics);
criterion_main!(benches);
