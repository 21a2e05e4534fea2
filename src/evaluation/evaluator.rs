//! Allocation scoring.

use super::{CapacityUsage, Penalties};
use crate::ga::{Allocation, Gene};
use crate::models::Dataset;

/// Per-component result of one evaluation.
///
/// `total` is the fitness stored on the allocation; the other fields say
/// where it came from.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CostBreakdown {
    /// Total cost (the fitness).
    pub total: f64,
    /// Sum of student → school distances in kilometers.
    pub distance_km: f64,
    /// Students without a classroom.
    pub unassigned: usize,
    /// Students placed in a room teaching another grade.
    pub grade_mismatches: usize,
    /// Seats used beyond capacity, summed over classrooms.
    pub overflow_units: u64,
    /// Genes that do not name an existing classroom.
    pub invalid_genes: usize,
}

impl CostBreakdown {
    /// Returns `true` if no hard constraint is violated: every student in a
    /// room of the right grade and no room over capacity.
    pub fn is_feasible(&self) -> bool {
        self.unassigned == 0
            && self.grade_mismatches == 0
            && self.overflow_units == 0
            && self.invalid_genes == 0
    }
}

/// Cost of placing a single student in a single classroom, ignoring
/// capacity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementCost {
    /// Student → school distance in kilometers.
    pub distance_km: f64,
    /// Whether the room teaches a different grade.
    pub grade_mismatch: bool,
    /// Distance plus the grade-mismatch penalty, if any.
    pub cost: f64,
}

/// Scores allocations against a dataset.
///
/// Owns a [`CapacityUsage`] scratch buffer sized for the dataset, reset at
/// the start of each call to [`evaluate`](FitnessEvaluator::evaluate).
/// Evaluation takes `&mut self`, so the buffer can never be shared between
/// two evaluations in flight; parallel callers create one evaluator per
/// worker.
///
/// # Examples
///
/// ```
/// use u_allocation::evaluation::{FitnessEvaluator, Penalties};
/// use u_allocation::ga::Allocation;
/// use u_allocation::models::{Classroom, Dataset, School, Student};
///
/// let ds = Dataset::new(
///     vec![Student::new(1, 0.0, 0.0, 1), Student::new(2, 0.0, 0.0, 1)],
///     vec![School::new(1, 0.0, 0.0)],
///     vec![Classroom::new(1, 0, 1, 1)],
/// )
/// .unwrap();
///
/// let mut evaluator = FitnessEvaluator::new(&ds, Penalties::default());
/// let mut alloc = Allocation::new(vec![Some(0), None]);
/// let cost = evaluator.evaluate(&mut alloc);
///
/// assert_eq!(cost.total, 100.0); // one unassigned student
/// assert_eq!(alloc.fitness(), 100.0);
/// ```
#[derive(Debug, Clone)]
pub struct FitnessEvaluator<'a> {
    dataset: &'a Dataset,
    penalties: Penalties,
    usage: CapacityUsage,
}

impl<'a> FitnessEvaluator<'a> {
    /// Creates an evaluator with a scratch buffer sized for `dataset`.
    pub fn new(dataset: &'a Dataset, penalties: Penalties) -> Self {
        Self {
            dataset,
            penalties,
            usage: CapacityUsage::new(dataset.n_rooms()),
        }
    }

    /// The dataset being scored against.
    pub fn dataset(&self) -> &'a Dataset {
        self.dataset
    }

    /// The penalty weights in use.
    pub fn penalties(&self) -> &Penalties {
        &self.penalties
    }

    /// Scores `allocation` and stores the total as its fitness.
    pub fn evaluate(&mut self, allocation: &mut Allocation) -> CostBreakdown {
        let breakdown = self.cost_of(allocation.genes());
        allocation.set_fitness(breakdown.total);
        breakdown
    }

    /// Scores a gene sequence without touching any allocation.
    ///
    /// A gene outside the classroom list is charged
    /// [`Penalties::invalid_gene`] and counted in
    /// [`CostBreakdown::invalid_genes`].
    ///
    /// # Panics
    ///
    /// Panics unless there is exactly one gene per student.
    ///
    /// # Complexity
    /// O(students + classrooms)
    pub fn cost_of(&mut self, genes: &[Gene]) -> CostBreakdown {
        assert_eq!(
            genes.len(),
            self.dataset.n_students(),
            "allocation must hold one gene per student"
        );
        self.usage.reset();

        let n_rooms = self.dataset.n_rooms();
        let mut b = CostBreakdown::default();
        let mut total = 0.0;

        for (student, gene) in genes.iter().enumerate() {
            let room = match *gene {
                None => {
                    total += self.penalties.unassigned;
                    b.unassigned += 1;
                    continue;
                }
                Some(room) if room >= n_rooms => {
                    total += self.penalties.invalid_gene;
                    b.invalid_genes += 1;
                    continue;
                }
                Some(room) => room,
            };

            let placement = self.placement(student, room);
            if placement.grade_mismatch {
                b.grade_mismatches += 1;
            }
            b.distance_km += placement.distance_km;
            total += placement.cost;

            self.usage.add(room);
        }

        b.overflow_units = self.usage.overflow_units(self.dataset);
        total += b.overflow_units as f64 * self.penalties.overflow;

        b.total = total;
        b
    }

    /// Cost of putting student `student` in classroom `room`, capacity
    /// aside.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range.
    pub fn placement(&self, student: usize, room: usize) -> PlacementCost {
        let s = &self.dataset.students()[student];
        let classroom = &self.dataset.classrooms()[room];
        let school = self.dataset.school_of(room);

        let distance_km = s.location.distance_km(&school.location);
        let grade_mismatch = !classroom.offers(s.desired_grade);
        let cost = if grade_mismatch {
            distance_km + self.penalties.wrong_grade
        } else {
            distance_km
        };

        PlacementCost {
            distance_km,
            grade_mismatch,
            cost,
        }
    }
}
