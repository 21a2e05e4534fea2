//! Student-to-classroom allocation with a penalty-based genetic algorithm.
//!
//! Each student is placed in a classroom (or left unassigned) so that total
//! home-to-school distance is small while grade matching and classroom
//! capacity are respected. Constraint violations are not forbidden but
//! priced, which lets the search move through infeasible allocations:
//!
//! - **Models**: students, schools and classrooms, validated into a
//!   read-only [`models::Dataset`].
//! - **Distance**: great-circle (haversine) distance in kilometers.
//! - **Evaluation**: distance plus penalties for unassigned students,
//!   grade mismatches and capacity overflow.
//! - **GA**: tournament selection, single-point crossover, per-gene
//!   mutation and elitism over a fixed-size population.
//! - **IO**: whitespace-delimited dataset files, plain and detailed
//!   solution output, and an end-of-run summary.
//!
//! # Example
//!
//! ```
//! use u_allocation::evaluation::Penalties;
//! use u_allocation::ga::{GaConfig, GaRunner};
//! use u_allocation::models::{Classroom, Dataset, School, Student};
//!
//! let dataset = Dataset::new(
//!     vec![Student::new(1, -23.55, -46.63, 1), Student::new(2, -23.56, -46.64, 2)],
//!     vec![School::new(10, -23.55, -46.63)],
//!     vec![Classroom::new(100, 0, 1, 30), Classroom::new(101, 0, 2, 30)],
//! )
//! .unwrap();
//!
//! let config = GaConfig::default()
//!     .with_population_size(20)
//!     .with_max_generations(30)
//!     .with_seed(7);
//! let result = GaRunner::run(&dataset, &Penalties::default(), &config).unwrap();
//!
//! assert_eq!(result.generations, 30);
//! assert!(result.best_fitness.is_finite());
//! ```
//!
//! # Features
//!
//! - `parallel`: evaluates each generation on the rayon thread pool.
//! - `serde`: `Serialize`/`Deserialize` for models, configuration and
//!   results.

pub mod distance;
pub mod evaluation;
pub mod ga;
pub mod io;
pub mod models;
