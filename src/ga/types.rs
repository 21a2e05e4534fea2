//! The GA individual: one complete student → classroom assignment.

/// One student's assignment: a classroom index, or `None` when the student
/// is left unassigned.
///
/// Externally (files, reports) an unassigned gene is written as `-1`.
pub type Gene = Option<usize>;

/// A candidate allocation.
///
/// Holds one [`Gene`] per student plus the cached fitness (total cost,
/// lower is better). The fitness is `f64::INFINITY` until the allocation is
/// evaluated, and is reset whenever the genes are rewritten by an operator.
///
/// The gene vector is sized at construction and never grows or shrinks;
/// operators write into it in place. Copying between allocations goes
/// through [`copy_from`](Allocation::copy_from), which reuses the
/// destination's storage.
///
/// # Examples
///
/// ```
/// use u_allocation::ga::Allocation;
///
/// let mut a = Allocation::unassigned(3);
/// assert_eq!(a.genes(), &[None, None, None]);
/// assert!(!a.is_evaluated());
///
/// a.set_fitness(12.5);
/// assert_eq!(a.fitness(), 12.5);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Allocation {
    genes: Vec<Gene>,
    fitness: f64,
}

impl Allocation {
    /// Creates an allocation from explicit genes, not yet evaluated.
    pub fn new(genes: Vec<Gene>) -> Self {
        Self {
            genes,
            fitness: f64::INFINITY,
        }
    }

    /// Creates an allocation of `n` unassigned students.
    pub fn unassigned(n: usize) -> Self {
        Self::new(vec![None; n])
    }

    /// The genes, one per student.
    pub fn genes(&self) -> &[Gene] {
        &self.genes
    }

    /// Mutable access to the genes. The length cannot change.
    pub fn genes_mut(&mut self) -> &mut [Gene] {
        &mut self.genes
    }

    /// Number of genes (students).
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    /// Returns `true` if there are no students.
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Cached fitness. `f64::INFINITY` if not evaluated.
    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    /// Stores a freshly computed fitness.
    pub fn set_fitness(&mut self, fitness: f64) {
        self.fitness = fitness;
    }

    /// Marks the cached fitness stale.
    pub fn invalidate(&mut self) {
        self.fitness = f64::INFINITY;
    }

    /// Returns `true` once a finite fitness has been stored.
    pub fn is_evaluated(&self) -> bool {
        self.fitness.is_finite()
    }

    /// Deep-copies genes and fitness from `other` into this allocation's
    /// existing storage.
    ///
    /// # Panics
    ///
    /// Panics if the gene lengths differ.
    pub fn copy_from(&mut self, other: &Allocation) {
        self.genes.copy_from_slice(&other.genes);
        self.fitness = other.fitness;
    }

    /// Number of students with a classroom.
    pub fn assigned_count(&self) -> usize {
        self.genes.iter().filter(|g| g.is_some()).count()
    }
}
