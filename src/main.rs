use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing::Level;
use u_allocation::evaluation::Penalties;
use u_allocation::ga::{GaConfig, GaRunner};
use u_allocation::io::{self, AllocationSummary};

/// Allocates students to classrooms with a genetic algorithm.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Students file: count, then `id lat lon grade` records.
    #[arg(long, default_value = "alunos.txt")]
    students: PathBuf,

    /// Schools file: count, then `id lat lon` records.
    #[arg(long, default_value = "escolas.txt")]
    schools: PathBuf,

    /// Classrooms file: count, then `id school_index grade capacity` records.
    #[arg(long, default_value = "salas.txt")]
    classrooms: PathBuf,

    /// Where to write one classroom index per student.
    #[arg(long, default_value = "solucao.txt")]
    solution: PathBuf,

    /// Where to write the detailed per-student report.
    #[arg(long, default_value = "solucao_completa.txt")]
    report: PathBuf,

    #[arg(long, default_value_t = 100)]
    population_size: usize,

    #[arg(long, default_value_t = 200)]
    generations: usize,

    #[arg(long, default_value_t = 0.05)]
    mutation_rate: f64,

    #[arg(long, default_value_t = 3)]
    tournament_size: usize,

    /// Do not carry the best allocation into the next generation.
    #[arg(long)]
    no_elitism: bool,

    /// Seed for a reproducible run.
    #[arg(long)]
    seed: Option<u64>,

    /// Evaluate generations on all cores (needs the `parallel` feature).
    #[arg(long)]
    parallel: bool,

    /// Enable debug logs: progress on every generation and each new best.
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    /// Builds the GA configuration. Values are taken as given so that
    /// [`GaConfig::validate`] rejects out-of-range input.
    fn config(&self) -> GaConfig {
        GaConfig {
            population_size: self.population_size,
            max_generations: self.generations,
            mutation_rate: self.mutation_rate,
            tournament_size: self.tournament_size,
            elitism: !self.no_elitism,
            parallel: self.parallel,
            seed: self.seed,
            ..GaConfig::default()
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(if args.verbose {
            Level::DEBUG
        } else {
            Level::INFO
        })
        .init();

    let dataset = io::load_dataset(&args.students, &args.schools, &args.classrooms)
        .context("failed to load dataset")?;

    if args.parallel && !cfg!(feature = "parallel") {
        tracing::warn!("built without the `parallel` feature; evaluating sequentially");
    }

    let penalties = Penalties::default();
    let result = GaRunner::run(&dataset, &penalties, &args.config())
        .context("genetic algorithm failed")?;

    tracing::info!(
        best_fitness = %format!("{:.2}", result.best_fitness),
        distance_km = %format!("{:.2}", result.breakdown.distance_km),
        unassigned = result.breakdown.unassigned,
        grade_mismatches = result.breakdown.grade_mismatches,
        overflow = result.breakdown.overflow_units,
        "search finished"
    );

    io::save_plain(&args.solution, &result.best)
        .with_context(|| format!("failed to write {}", args.solution.display()))?;
    let total = io::save_detailed(&args.report, &dataset, &penalties, &result.best)
        .with_context(|| format!("failed to write {}", args.report.display()))?;
    tracing::info!(
        recomputed_total = %format!("{total:.2}"),
        "detailed report written"
    );

    AllocationSummary::new(&dataset, &result.best).log();

    Ok(())
}
