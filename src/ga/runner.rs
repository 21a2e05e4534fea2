//! GA evolutionary loop execution.
//!
//! [`GaRunner`] drives the generational loop:
//! initialize → (evaluate → track best → breed → swap) × generations.
//!
//! Two population buffers of equal size are allocated once. Each
//! generation is bred from `current` into `next`, then the two vectors are
//! swapped, so gene storage is reused for the whole run.

use super::config::{ConfigError, GaConfig};
use super::factory::AllocationFactory;
use super::operators::{mutate, single_point_crossover, single_point_crossover_one};
use super::selection::tournament;
use super::types::Allocation;
use crate::evaluation::{CostBreakdown, FitnessEvaluator, Penalties};
use crate::models::Dataset;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::instrument;

/// Error that aborts a GA run.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GaError {
    /// The configuration failed [`GaConfig::validate`].
    #[error("invalid GA configuration: {0}")]
    Config(#[from] ConfigError),

    /// An individual holds genes that name no classroom. Operators only
    /// ever produce valid genes, so this is a programming error.
    #[error(
        "individual {individual} of generation {generation} has {count} gene(s) outside the classroom list"
    )]
    InvalidGene {
        /// Generation in which it was detected.
        generation: usize,
        /// Position in the population.
        individual: usize,
        /// Number of invalid genes.
        count: usize,
    },
}

/// Result of a GA run.
#[derive(Debug, Clone)]
pub struct GaResult {
    /// The best allocation found during the entire run.
    pub best: Allocation,

    /// Best fitness value (same as `best.fitness()`).
    pub best_fitness: f64,

    /// Cost components of `best`.
    pub breakdown: CostBreakdown,

    /// Total number of generations executed.
    pub generations: usize,

    /// All-time best fitness after each generation.
    ///
    /// Non-increasing: the best is only replaced by a strictly lower
    /// fitness.
    pub fitness_history: Vec<f64>,
}

/// Receives progress after every generation.
///
/// Closures `FnMut(usize, usize, f64)` implement this trait.
pub trait GenerationObserver {
    /// Called once per generation with the zero-based generation index, the
    /// total number of generations, and the all-time best fitness.
    fn on_generation(&mut self, generation: usize, total: usize, best_fitness: f64);
}

impl<F: FnMut(usize, usize, f64)> GenerationObserver for F {
    fn on_generation(&mut self, generation: usize, total: usize, best_fitness: f64) {
        self(generation, total, best_fitness)
    }
}

/// Logs the best fitness at info level every `interval` generations and on
/// the last one, and at debug level on every other generation.
#[derive(Debug, Clone, Copy)]
pub struct ProgressLog {
    interval: usize,
}

impl ProgressLog {
    /// Creates a logger. `interval = 0` logs only the final generation.
    pub fn new(interval: usize) -> Self {
        Self { interval }
    }

    /// Whether `generation` of `total` gets a progress line.
    pub fn should_log(&self, generation: usize, total: usize) -> bool {
        let periodic = self.interval > 0 && generation % self.interval == 0;
        periodic || generation + 1 == total
    }
}

impl GenerationObserver for ProgressLog {
    fn on_generation(&mut self, generation: usize, total: usize, best_fitness: f64) {
        if self.should_log(generation, total) {
            tracing::info!(
                generation,
                total,
                best_fitness,
                "generation [{generation}/{total}] best cost: {best_fitness:.2}"
            );
        } else {
            tracing::debug!(generation, total, best_fitness, "generation finished");
        }
    }
}

/// Executes the GA evolutionary loop.
///
/// # Usage
///
/// ```
/// use u_allocation::evaluation::Penalties;
/// use u_allocation::ga::{GaConfig, GaRunner};
/// use u_allocation::models::{Classroom, Dataset, School, Student};
///
/// let ds = Dataset::new(
///     vec![Student::new(1, 0.0, 0.0, 1), Student::new(2, 0.0, 0.1, 1)],
///     vec![School::new(1, 0.0, 0.0)],
///     vec![Classroom::new(1, 0, 1, 2)],
/// )
/// .unwrap();
///
/// let config = GaConfig::default()
///     .with_population_size(10)
///     .with_max_generations(20)
///     .with_seed(42);
/// let result = GaRunner::run(&ds, &Penalties::default(), &config).unwrap();
/// assert_eq!(result.fitness_history.len(), 20);
/// assert!(result.best_fitness < 200.0);
/// ```
pub struct GaRunner;

impl GaRunner {
    /// Runs the GA, logging progress through `tracing` every
    /// [`GaConfig::log_interval`] generations.
    pub fn run(
        dataset: &Dataset,
        penalties: &Penalties,
        config: &GaConfig,
    ) -> Result<GaResult, GaError> {
        let mut log = ProgressLog::new(config.log_interval);
        Self::run_with_observer(dataset, penalties, config, &mut log)
    }

    /// Runs the GA, reporting each generation to `observer`.
    ///
    /// # Errors
    ///
    /// - [`GaError::Config`] if `config` does not validate
    /// - [`GaError::InvalidGene`] if an evaluated individual holds a gene
    ///   outside the classroom list
    #[instrument(
        level = "info",
        skip_all,
        fields(
            students = dataset.n_students(),
            rooms = dataset.n_rooms(),
            population = config.population_size,
            generations = config.max_generations,
        )
    )]
    pub fn run_with_observer<O: GenerationObserver>(
        dataset: &Dataset,
        penalties: &Penalties,
        config: &GaConfig,
        observer: &mut O,
    ) -> Result<GaResult, GaError> {
        config.validate()?;

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };

        let n = dataset.n_students();
        let pop_size = config.population_size;
        let factory = AllocationFactory::new(dataset, config.unassigned_rate);
        let mut evaluator = FitnessEvaluator::new(dataset, *penalties);

        // 1. Initialize both buffers and the two best slots
        let mut population: Vec<Allocation> =
            (0..pop_size).map(|_| factory.create(&mut rng)).collect();
        let mut next: Vec<Allocation> = (0..pop_size).map(|_| Allocation::unassigned(n)).collect();
        let mut generation_best = Allocation::unassigned(n);
        let mut best = Allocation::unassigned(n);

        let mut fitness_history = Vec::with_capacity(config.max_generations);
        tracing::debug!(pop_size, genes = n, "population initialized");

        // 2. Evolutionary loop
        for gen in 0..config.max_generations {
            // Evaluate
            evaluate_population(&mut evaluator, &mut population, config.parallel, gen)?;

            // Best of this generation; ties keep the lowest index
            let idx = best_index(&population);
            generation_best.copy_from(&population[idx]);

            // All-time best
            if generation_best.fitness() < best.fitness() {
                best.copy_from(&generation_best);
                tracing::debug!(
                    generation = gen,
                    fitness = best.fitness(),
                    "new best allocation"
                );
            }

            // Breed
            let mut slot = 0;
            if config.elitism {
                next[0].copy_from(&best);
                slot = 1;
            }

            while slot < pop_size {
                let p1 = tournament(&population, config.tournament_size, &mut rng);
                let p2 = tournament(&population, config.tournament_size, &mut rng);

                if slot + 1 < pop_size {
                    let (head, tail) = next.split_at_mut(slot + 1);
                    let (child1, child2) = (&mut head[slot], &mut tail[0]);
                    single_point_crossover(
                        &population[p1],
                        &population[p2],
                        child1,
                        child2,
                        &mut rng,
                    );
                    mutate(child1, &factory, config.mutation_rate, &mut rng);
                    mutate(child2, &factory, config.mutation_rate, &mut rng);
                    slot += 2;
                } else {
                    // One slot left: the second child is not produced.
                    let child = &mut next[slot];
                    single_point_crossover_one(&population[p1], &population[p2], child, &mut rng);
                    mutate(child, &factory, config.mutation_rate, &mut rng);
                    slot += 1;
                }
            }

            // Swap
            std::mem::swap(&mut population, &mut next);

            fitness_history.push(best.fitness());
            observer.on_generation(gen, config.max_generations, best.fitness());
        }

        // 3. Finalize
        let breakdown = evaluator.cost_of(best.genes());
        tracing::info!(
            best_fitness = best.fitness(),
            unassigned = breakdown.unassigned,
            grade_mismatches = breakdown.grade_mismatches,
            overflow_units = breakdown.overflow_units,
            "evolution finished"
        );

        Ok(GaResult {
            best_fitness: best.fitness(),
            best,
            breakdown,
            generations: config.max_generations,
            fitness_history,
        })
    }
}

/// Evaluate all individuals, failing on the first one with invalid genes.
fn evaluate_population(
    evaluator: &mut FitnessEvaluator<'_>,
    population: &mut [Allocation],
    parallel: bool,
    generation: usize,
) -> Result<(), GaError> {
    #[cfg(feature = "parallel")]
    {
        if parallel {
            return evaluate_parallel(evaluator, population, generation);
        }
    }
    #[cfg(not(feature = "parallel"))]
    let _ = parallel;

    for (individual, ind) in population.iter_mut().enumerate() {
        let breakdown = evaluator.evaluate(ind);
        if breakdown.invalid_genes > 0 {
            return Err(GaError::InvalidGene {
                generation,
                individual,
                count: breakdown.invalid_genes,
            });
        }
    }
    Ok(())
}

/// Rayon evaluation. Each worker owns its own evaluator and scratch buffer.
#[cfg(feature = "parallel")]
fn evaluate_parallel(
    evaluator: &FitnessEvaluator<'_>,
    population: &mut [Allocation],
    generation: usize,
) -> Result<(), GaError> {
    use rayon::prelude::*;

    let dataset = evaluator.dataset();
    let penalties = *evaluator.penalties();
    let first_invalid = population
        .par_iter_mut()
        .enumerate()
        .map_init(
            || FitnessEvaluator::new(dataset, penalties),
            |ev, (idx, ind)| (idx, ev.evaluate(ind).invalid_genes),
        )
        .find_first(|&(_, count)| count > 0);

    match first_invalid {
        Some((individual, count)) => Err(GaError::InvalidGene {
            generation,
            individual,
            count,
        }),
        None => Ok(()),
    }
}

/// Index of the lowest fitness; the first one on ties.
fn best_index(population: &[Allocation]) -> usize {
    let mut best = 0;
    for (idx, ind) in population.iter().enumerate().skip(1) {
        if ind.fitness() < population[best].fitness() {
            best = idx;
        }
    }
    best
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Classroom, School, Student};

    /// Ten students around two schools; grades 1 and 2 with enough seats
    /// for everyone, so a zero-penalty allocation exists.
    fn neighborhood() -> Dataset {
        let students = (0..10)
            .map(|i| {
                let lat = if i % 2 == 0 { 0.01 * i as f64 } else { 1.0 + 0.01 * i as f64 };
                Student::new(i, lat, 0.0, 1 + (i % 2))
            })
            .collect();
        Dataset::new(
            students,
            vec![School::new(1, 0.0, 0.0), School::new(2, 1.0, 0.0)],
            vec![
                Classroom::new(10, 0, 1, 3),
                Classroom::new(11, 0, 1, 3),
                Classroom::new(20, 1, 2, 5),
                Classroom::new(21, 0, 2, 5),
            ],
        )
        .unwrap()
    }

    fn crowded() -> Dataset {
        Dataset::new(
            (1..=3).map(|i| Student::new(i, 5.0, 5.0, 1)).collect(),
            vec![School::new(1, 5.0, 5.0)],
            vec![Classroom::new(1, 0, 1, 1)],
        )
        .unwrap()
    }

    fn config() -> GaConfig {
        GaConfig::default()
            .with_population_size(30)
            .with_max_generations(60)
            .with_seed(42)
            .with_log_interval(0)
    }

    #[test]
    fn test_finds_feasible_allocation() {
        let ds = neighborhood();
        let cfg = config().with_max_generations(200);
        let result = GaRunner::run(&ds, &Penalties::default(), &cfg).unwrap();

        assert!(
            result.breakdown.is_feasible(),
            "expected a feasible allocation, got {:?}",
            result.breakdown
        );
        assert_eq!(result.best.len(), 10);
        assert_eq!(result.best_fitness, result.best.fitness());
        assert!((result.breakdown.total - result.best_fitness).abs() < 1e-9);
    }

    #[test]
    fn test_overflow_scenario_optimum() {
        // One seat, three students at the school: the best the unassigned
        // penalty allows is one seated and two unassigned (100 each), which
        // beats any overflow.
        let ds = crowded();
        let cfg = config().with_unassigned_rate(0.5);
        let result = GaRunner::run(&ds, &Penalties::default(), &cfg).unwrap();
        assert!((result.best_fitness - 200.0).abs() < 1e-9);

        // With unassignment made prohibitively expensive, everyone is
        // seated and two students overflow.
        let penalties = Penalties::default().with_unassigned(1e9);
        let result = GaRunner::run(&ds, &penalties, &config()).unwrap();
        assert!((result.best_fitness - 2.0 * 5000.0).abs() < 1e-9);
        assert_eq!(result.breakdown.overflow_units, 2);
    }

    #[test]
    fn test_history_non_increasing_with_elitism() {
        let ds = neighborhood();
        let result = GaRunner::run(&ds, &Penalties::default(), &config()).unwrap();

        assert_eq!(result.fitness_history.len(), 60);
        assert_eq!(result.generations, 60);
        for w in result.fitness_history.windows(2) {
            assert!(w[1] <= w[0], "fitness got worse: {} > {}", w[1], w[0]);
        }
        assert_eq!(*result.fitness_history.last().unwrap(), result.best_fitness);
    }

    #[test]
    fn test_without_elitism_still_reports_all_time_best() {
        let ds = neighborhood();
        let cfg = config().with_elitism(false);
        let result = GaRunner::run(&ds, &Penalties::default(), &cfg).unwrap();
        for w in result.fitness_history.windows(2) {
            assert!(w[1] <= w[0]);
        }
    }

    #[test]
    fn test_same_seed_same_result() {
        let ds = neighborhood();
        let a = GaRunner::run(&ds, &Penalties::default(), &config()).unwrap();
        let b = GaRunner::run(&ds, &Penalties::default(), &config()).unwrap();
        assert_eq!(a.best, b.best);
        assert_eq!(a.fitness_history, b.fitness_history);
    }

    #[test]
    fn test_odd_population_sizes() {
        let ds = neighborhood();
        for (size, elitism) in [(2, true), (3, true), (3, false), (7, false), (8, true)] {
            let cfg = config()
                .with_population_size(size)
                .with_max_generations(5)
                .with_elitism(elitism);
            let result = GaRunner::run(&ds, &Penalties::default(), &cfg).unwrap();
            assert_eq!(result.fitness_history.len(), 5);
        }
    }

    #[test]
    fn test_observer_sees_every_generation() {
        let ds = crowded();
        let mut seen = Vec::new();
        let mut observer = |gen: usize, total: usize, best: f64| seen.push((gen, total, best));
        let cfg = config().with_max_generations(12);
        let result =
            GaRunner::run_with_observer(&ds, &Penalties::default(), &cfg, &mut observer).unwrap();

        assert_eq!(seen.len(), 12);
        assert_eq!(seen[0].0, 0);
        assert_eq!(seen[11], (11, 12, result.best_fitness));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let ds = crowded();
        let cfg = config().with_population_size(1);
        let err = GaRunner::run(&ds, &Penalties::default(), &cfg).unwrap_err();
        assert_eq!(err, GaError::Config(ConfigError::PopulationTooSmall(1)));
    }

    #[test]
    fn test_no_students() {
        let ds = Dataset::new(vec![], vec![School::new(1, 0.0, 0.0)], vec![]).unwrap();
        let result = GaRunner::run(&ds, &Penalties::default(), &config()).unwrap();
        assert!(result.best.is_empty());
        assert_eq!(result.best_fitness, 0.0);
    }

    #[test]
    fn test_invalid_gene_is_fatal() {
        let ds = crowded();
        let mut evaluator = FitnessEvaluator::new(&ds, Penalties::default());
        let mut population = vec![
            Allocation::new(vec![Some(0), None, None]),
            Allocation::new(vec![Some(0), Some(3), None]),
        ];
        let err = evaluate_population(&mut evaluator, &mut population, false, 4).unwrap_err();
        assert_eq!(
            err,
            GaError::InvalidGene {
                generation: 4,
                individual: 1,
                count: 1,
            }
        );
    }

    #[test]
    fn test_best_index_prefers_first_on_ties() {
        let pop: Vec<Allocation> = [3.0, 1.0, 1.0, 2.0]
            .iter()
            .map(|&f| {
                let mut a = Allocation::unassigned(0);
                a.set_fitness(f);
                a
            })
            .collect();
        assert_eq!(best_index(&pop), 1);
    }

    #[test]
    fn test_progress_log_schedule() {
        let log = ProgressLog::new(10);
        let logged: Vec<usize> = (0..25).filter(|&g| log.should_log(g, 25)).collect();
        assert_eq!(logged, vec![0, 10, 20, 24]);

        let last_only = ProgressLog::new(0);
        let logged: Vec<usize> = (0..5).filter(|&g| last_only.should_log(g, 5)).collect();
        assert_eq!(logged, vec![4]);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_matches_sequential() {
        let ds = neighborhood();
        let seq = GaRunner::run(&ds, &Penalties::default(), &config()).unwrap();
        let par = GaRunner::run(&ds, &Penalties::default(), &config().with_parallel(true)).unwrap();
        assert_eq!(seq.best, par.best);
        assert_eq!(seq.fitness_history, par.fitness_history);
    }
}
