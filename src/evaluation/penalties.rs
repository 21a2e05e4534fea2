//! Penalty magnitudes.

/// Additive penalty weights used by the [`FitnessEvaluator`](super::FitnessEvaluator).
///
/// The defaults order violations by severity: a single overflowing seat or
/// grade mismatch outweighs any plausible sum of distances, while leaving a
/// student unassigned is the mildest outcome.
///
/// # Defaults
///
/// ```
/// use u_allocation::evaluation::Penalties;
///
/// let p = Penalties::default();
/// assert_eq!(p.unassigned, 100.0);
/// assert_eq!(p.wrong_grade, 2000.0);
/// assert_eq!(p.overflow, 5000.0);
/// assert_eq!(p.invalid_gene, 999_999.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Penalties {
    /// Cost of leaving one student without a classroom.
    pub unassigned: f64,

    /// Cost of placing a student in a room teaching a different grade.
    pub wrong_grade: f64,

    /// Cost per seat used beyond a classroom's capacity.
    pub overflow: f64,

    /// Cost of a gene pointing outside the classroom list.
    ///
    /// Only reachable through a broken operator; the runner treats any
    /// occurrence as fatal.
    pub invalid_gene: f64,
}

impl Default for Penalties {
    fn default() -> Self {
        Self {
            unassigned: 100.0,
            wrong_grade: 2000.0,
            overflow: 5000.0,
            invalid_gene: 999_999.0,
        }
    }
}

impl Penalties {
    /// Sets the unassigned-student penalty.
    pub fn with_unassigned(mut self, penalty: f64) -> Self {
        self.unassigned = penalty.max(0.0);
        self
    }

    /// Sets the grade-mismatch penalty.
    pub fn with_wrong_grade(mut self, penalty: f64) -> Self {
        self.wrong_grade = penalty.max(0.0);
        self
    }

    /// Sets the per-seat overflow penalty.
    pub fn with_overflow(mut self, penalty: f64) -> Self {
        self.overflow = penalty.max(0.0);
        self
    }
}
