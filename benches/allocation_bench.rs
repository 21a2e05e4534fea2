//! Criterion benchmarks for fitness evaluation and full GA runs.
//!
//! Uses synthetic datasets: students scattered around a city center,
//! schools on a grid, a few classrooms per school for five grades.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use u_allocation::evaluation::{FitnessEvaluator, Penalties};
use u_allocation::ga::{AllocationFactory, GaConfig, GaRunner};
use u_allocation::models::{Classroom, Dataset, School, Student};

const GRADES: i64 = 5;

fn synthetic(n_students: usize, n_schools: usize) -> Dataset {
    let mut rng = StdRng::seed_from_u64(1234);

    let students = (0..n_students)
        .map(|i| {
            Student::new(
                i as i64,
                -23.55 + rng.random_range(-0.2..0.2),
                -46.63 + rng.random_range(-0.2..0.2),
                rng.random_range(1..=GRADES),
            )
        })
        .collect();

    let schools = (0..n_schools)
        .map(|i| {
            School::new(
                i as i64,
                -23.55 + rng.random_range(-0.2..0.2),
                -46.63 + rng.random_range(-0.2..0.2),
            )
        })
        .collect();

    let classrooms = (0..n_schools)
        .flat_map(|school| (1..=GRADES).map(move |grade| (school, grade)))
        .enumerate()
        .map(|(id, (school, grade))| Classroom::new(id as i64, school, grade, 30))
        .collect();

    Dataset::new(students, schools, classrooms).expect("synthetic dataset is consistent")
}

fn bench_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate");

    for n in [1_000, 10_000] {
        let dataset = synthetic(n, n / 50);
        let factory = AllocationFactory::new(&dataset, 0.05);
        let mut rng = StdRng::seed_from_u64(42);
        let mut alloc = factory.create(&mut rng);
        let mut evaluator = FitnessEvaluator::new(&dataset, Penalties::default());

        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| black_box(evaluator.evaluate(&mut alloc)))
        });
    }
    group.finish();
}

fn bench_ga_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("ga_run");
    group.sample_size(10);

    for n in [200, 1_000] {
        let dataset = synthetic(n, 10);
        let config = GaConfig::default()
            .with_population_size(50)
            .with_max_generations(50)
            .with_log_interval(0)
            .with_seed(42);

        group.bench_with_input(BenchmarkId::from_parameter(n), &config, |b, config| {
            b.iter(|| {
                let result = GaRunner::run(&dataset, &Penalties::default(), config)
                    .expect("valid configuration");
                black_box(result.best_fitness)
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_evaluate, bench_ga_run);
criterion_main!(benches);
