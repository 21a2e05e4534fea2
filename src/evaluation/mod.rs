//! Fitness evaluation of allocations.
//!
//! The cost of an allocation is travel distance plus three additive
//! penalties: unassigned students, grade mismatches, and seats used beyond a
//! classroom's capacity. Penalties relax the hard constraints so the search
//! can cross infeasible regions and repair them gradually.
//!
//! # Key Types
//!
//! - [`FitnessEvaluator`]: scores allocations, owning a reusable
//!   [`CapacityUsage`] scratch buffer
//! - [`Penalties`]: the four penalty magnitudes
//! - [`CostBreakdown`]: per-component view of one evaluation
//!
//! # References
//!
//! - Coello Coello (2002), "Theoretical and numerical constraint-handling
//!   techniques used with evolutionary algorithms: a survey of the state
//!   of the art"

mod evaluator;
mod penalties;
mod usage;

pub use evaluator::{CostBreakdown, FitnessEvaluator, PlacementCost};
pub use penalties::Penalties;
pub use usage::{CapacityUsage, CapacityViolation};
