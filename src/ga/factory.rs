//! Random, grade-aware construction of genes and allocations.

use super::types::{Allocation, Gene};
use crate::models::Dataset;
use rand::Rng;

/// Draws genes the way the initial population is built.
///
/// Each draw is "unassigned" with probability `unassigned_rate`; otherwise
/// it is a classroom chosen uniformly among those teaching the student's
/// desired grade. A student whose grade no classroom offers always gets
/// "unassigned". Capacity is ignored here; the evaluator
/// penalizes it.
///
/// Mutation reuses [`draw_gene`](AllocationFactory::draw_gene) so that
/// redrawn genes follow the same distribution.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use u_allocation::ga::AllocationFactory;
/// use u_allocation::models::{Classroom, Dataset, School, Student};
///
/// let ds = Dataset::new(
///     vec![Student::new(1, 0.0, 0.0, 4)],
///     vec![School::new(1, 0.0, 0.0)],
///     vec![Classroom::new(9, 0, 4, 20)],
/// )
/// .unwrap();
///
/// let factory = AllocationFactory::new(&ds, 0.0);
/// let mut rng = StdRng::seed_from_u64(1);
/// assert_eq!(factory.create(&mut rng).genes(), &[Some(0)]);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct AllocationFactory<'a> {
    dataset: &'a Dataset,
    unassigned_rate: f64,
}

impl<'a> AllocationFactory<'a> {
    /// Creates a factory. `unassigned_rate` is clamped to `[0, 1]`.
    pub fn new(dataset: &'a Dataset, unassigned_rate: f64) -> Self {
        let unassigned_rate = if unassigned_rate.is_nan() {
            0.0
        } else {
            unassigned_rate.clamp(0.0, 1.0)
        };
        Self {
            dataset,
            unassigned_rate,
        }
    }

    /// Draws a gene for student `student`.
    ///
    /// # Panics
    ///
    /// Panics if `student` is out of range.
    pub fn draw_gene<R: Rng>(&self, student: usize, rng: &mut R) -> Gene {
        if rng.random_bool(self.unassigned_rate) {
            return None;
        }
        let grade = self.dataset.students()[student].desired_grade;
        let rooms = self.dataset.rooms_offering(grade);
        if rooms.is_empty() {
            None
        } else {
            Some(rooms[rng.random_range(0..rooms.len())])
        }
    }

    /// Overwrites every gene of `allocation` with a fresh draw.
    pub fn fill<R: Rng>(&self, allocation: &mut Allocation, rng: &mut R) {
        for (student, gene) in allocation.genes_mut().iter_mut().enumerate() {
            *gene = self.draw_gene(student, rng);
        }
        allocation.invalidate();
    }

    /// Creates a random allocation for every student in the dataset.
    pub fn create<R: Rng>(&self, rng: &mut R) -> Allocation {
        let mut allocation = Allocation::unassigned(self.dataset.n_students());
        self.fill(&mut allocation, rng);
        allocation
    }
}
