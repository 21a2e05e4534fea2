//! Recombination and mutation of allocations.
//!
//! All operators write into allocations that already own gene storage of
//! the right length; none of them allocates. Children written by an
//! operator have their fitness reset to "unevaluated".
//!
//! # Crossover Operators
//!
//! - [`single_point_crossover`]: two children from one random cut
//! - [`single_point_crossover_one`]: only the first of those children
//! - [`crossover_at`]: same as the two-child form with an explicit cut
//!
//! # Mutation Operators
//!
//! - [`mutate`]: independent per-gene redraw through the [`AllocationFactory`]
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and
//!   Machine Learning*

use super::factory::AllocationFactory;
use super::types::Allocation;
use rand::Rng;

// ============================================================================
// Crossover operators
// ============================================================================

/// Single-point crossover into two existing children.
///
/// Picks a cut `k` uniformly in `[1, n-1]`, then
///
/// - `child1 = parent1[..k] ++ parent2[k..]`
/// - `child2 = parent2[..k] ++ parent1[k..]`
///
/// Returns the cut point used. With fewer than two genes there is no
/// interior cut; the children become copies of their leading parent.
///
/// # Complexity
/// O(n) time, O(1) extra space
///
/// # Panics
/// Panics if the four allocations do not share one gene length.
pub fn single_point_crossover<R: Rng>(
    parent1: &Allocation,
    parent2: &Allocation,
    child1: &mut Allocation,
    child2: &mut Allocation,
    rng: &mut R,
) -> usize {
    let cut = random_cut_point(parent1.len(), rng);
    crossover_at(parent1, parent2, child1, child2, cut);
    cut
}

/// Single-point crossover that keeps only the first child.
///
/// Used for the last slot of a generation when a single place is left.
/// The complementary child (`parent2[..k] ++ parent1[k..]`) is not
/// produced.
///
/// # Panics
/// Panics if the three allocations do not share one gene length.
pub fn single_point_crossover_one<R: Rng>(
    parent1: &Allocation,
    parent2: &Allocation,
    child: &mut Allocation,
    rng: &mut R,
) -> usize {
    let n = parent1.len();
    assert_eq!(n, parent2.len(), "parents must have equal length");
    assert_eq!(n, child.len(), "child must match parent length");

    let cut = random_cut_point(n, rng);
    let genes = child.genes_mut();
    genes[..cut].copy_from_slice(&parent1.genes()[..cut]);
    genes[cut..].copy_from_slice(&parent2.genes()[cut..]);
    child.invalidate();
    cut
}

/// Single-point crossover at an explicit cut point.
///
/// `cut` may be anywhere in `0..=n`; the random operators only use
/// `[1, n-1]`.
///
/// # Panics
/// Panics if lengths differ or `cut > n`.
pub fn crossover_at(
    parent1: &Allocation,
    parent2: &Allocation,
    child1: &mut Allocation,
    child2: &mut Allocation,
    cut: usize,
) {
    let n = parent1.len();
    assert_eq!(n, parent2.len(), "parents must have equal length");
    assert_eq!(n, child1.len(), "child1 must match parent length");
    assert_eq!(n, child2.len(), "child2 must match parent length");
    assert!(cut <= n, "cut point {cut} beyond gene length {n}");

    let (p1, p2) = (parent1.genes(), parent2.genes());

    let c1 = child1.genes_mut();
    c1[..cut].copy_from_slice(&p1[..cut]);
    c1[cut..].copy_from_slice(&p2[cut..]);

    let c2 = child2.genes_mut();
    c2[..cut].copy_from_slice(&p2[..cut]);
    c2[cut..].copy_from_slice(&p1[cut..]);

    child1.invalidate();
    child2.invalidate();
}

// ============================================================================
// Mutation operators
// ============================================================================

/// Per-gene mutation.
///
/// Each gene is independently redrawn with probability `rate` through
/// [`AllocationFactory::draw_gene`] (so a redraw is "unassigned" with the
/// factory's unassigned rate, otherwise a grade-matching classroom).
/// Returns the number of genes redrawn.
///
/// `rate = 0` never touches the genes; `rate = 1` redraws all of them.
/// Rates outside `[0, 1]` are clamped.
///
/// # Complexity
/// O(n)
pub fn mutate<R: Rng>(
    allocation: &mut Allocation,
    factory: &AllocationFactory<'_>,
    rate: f64,
    rng: &mut R,
) -> usize {
    let rate = if rate.is_nan() { 0.0 } else { rate.clamp(0.0, 1.0) };
    let mut redrawn = 0;
    for (student, gene) in allocation.genes_mut().iter_mut().enumerate() {
        if rng.random_bool(rate) {
            *gene = factory.draw_gene(student, rng);
            redrawn += 1;
        }
    }
    if redrawn > 0 {
        allocation.invalidate();
    }
    redrawn
}

// ============================================================================
// Helpers
// ============================================================================

/// Uniform cut point in `[1, n-1]`; `n` itself when `n < 2`.
fn random_cut_point<R: Rng>(n: usize, rng: &mut R) -> usize {
    if n < 2 {
        n
    } else {
        rng.random_range(1..n)
    }
}

// ============================================================================
// Tests
// ============================================================================
