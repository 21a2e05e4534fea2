//! Genetic Algorithm for student allocation.
//!
//! Each individual is an [`Allocation`]: one gene per student holding a
//! classroom index or "unassigned". The engine evolves a fixed-size
//! population with tournament selection, single-point crossover, per-gene
//! mutation and single-individual elitism, for a fixed number of
//! generations.
//!
//! # Key Types
//!
//! - [`Allocation`]: a candidate solution with its cached fitness
//! - [`AllocationFactory`]: random grade-aware gene construction
//! - [`GaConfig`]: algorithm parameters
//! - [`GaRunner`]: executes the evolutionary loop
//! - [`GaResult`]: final best allocation and fitness history
//!
//! # Submodules
//!
//! - [`operators`]: single-point crossover and per-gene mutation
//! - [`selection`]: tournament selection
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - De Jong (2006), *Evolutionary Computation: A Unified Approach*

mod config;
mod factory;
pub mod operators;
mod runner;
pub mod selection;
mod types;

pub use config::{ConfigError, GaConfig};
pub use factory::AllocationFactory;
pub use runner::{GaError, GaResult, GaRunner, GenerationObserver, ProgressLog};
pub use types::{Allocation, Gene};
