use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use nalgebra::Vector3;
use orbital_sim::{
    bodies::{Bodies, Body, Color},
    AccelerationSolver, BarnesHut, DirectSummation, Execution, Simulation,
};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn random_bodies(rng: &mut StdRng, n: usize) -> Bodies {
    (0..n)
        .map(|_| {
            Body::generated(
                rng.gen_range(1e18..1e24),
                1.,
                Color::GRAY,
                Vector3::new(
                    rng.gen_range(-1e12..1e12),
                    rng.gen_range(-1e10..1e10),
                    rng.gen_range(-1e12..1e12),
                ),
                Vector3::new(
                    rng.gen_range(-1e4..1e4),
                    rng.gen_range(-1e2..1e2),
                    rng.gen_range(-1e4..1e4),
                ),
            )
        })
        .collect()
}

fn solvers(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0);

    let mut group = c.benchmark_group("solvers");
    for n in [100, 1_000, 10_000] {
        group.bench_with_input(BenchmarkId::new("barnes hut", n), &n, |b, &n| {
            b.iter_batched_ref(
                || {
                    Simulation::with_solver(random_bodies(&mut rng, n), 3600., BarnesHut::default())
                        .unwrap()
                },
                |sim| sim.simulate(10),
                BatchSize::SmallInput,
            )
        });

        group.bench_with_input(BenchmarkId::new("barnes hut multithreaded", n), &n, |b, &n| {
            b.iter_batched_ref(
                || {
                    Simulation::with_solver(random_bodies(&mut rng, n), 3600., BarnesHut::default())
                        .unwrap()
                        .multithreaded(4)
                },
                |sim| sim.simulate(10),
                BatchSize::SmallInput,
            )
        });

        group.bench_with_input(BenchmarkId::new("barnes hut rayon", n), &n, |b, &n| {
            b.iter_batched_ref(
                || {
                    Simulation::with_solver(random_bodies(&mut rng, n), 3600., BarnesHut::default())
                        .unwrap()
                        .rayon_iter()
                },
                |sim| sim.simulate(10),
                BatchSize::SmallInput,
            )
        });

        if n <= 1_000 {
            group.bench_with_input(BenchmarkId::new("direct summation", n), &n, |b, &n| {
                b.iter_batched_ref(
                    || {
                        let bodies = random_bodies(&mut rng, n);
                        Simulation::with_solver(bodies, 3600., DirectSummation::default()).unwrap()
                    },
                    |sim| sim.simulate(10),
                    BatchSize::SmallInput,
                )
            });
        }
    }
    group.finish();
}

fn theta(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(1);
    let bodies = random_bodies(&mut rng, 5_000);
    let mut accelerations = vec![Vector3::zeros(); bodies.len()];

    let mut group = c.benchmark_group("theta");
    for theta in [0.2, 0.5, 1., 1.5] {
        group.bench_with_input(BenchmarkId::from_parameter(theta), &theta, |b, &theta| {
            let mut solver = BarnesHut::new(theta);
            b.iter(|| {
                solver.calculate_accelerations(
                    bodies.as_slice(),
                    &mut accelerations,
                    Execution::SingleThreaded,
                )
            })
        });
    }
    group.finish();
}

criterion_group!(benches, solvers, theta);
criterion_main!(benches);
