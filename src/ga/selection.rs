//! Parent selection.
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"
//! - Miller & Goldberg (1995), "Genetic Algorithms, Tournament Selection,
//!   and the Effects of Noise"

use super::types::Allocation;
use rand::Rng;

/// Tournament selection: sample `k` individuals uniformly **with
/// replacement** and return the index of the one with the lowest fitness.
///
/// The first sample is the initial winner; later samples replace it only
/// when strictly better, so ties favor the earliest draw. `k = 0` is
/// treated as 1, which is plain uniform sampling.
///
/// # Complexity
/// O(k) per selection
///
/// # Panics
/// Panics if `population` is empty.
pub fn tournament<R: Rng>(population: &[Allocation], k: usize, rng: &mut R) -> usize {
    assert!(
        !population.is_empty(),
        "cannot select from empty population"
    );

    let n = population.len();
    let mut best_idx = rng.random_range(0..n);
    for _ in 1..k.max(1) {
        let idx = rng.random_range(0..n);
        if population[idx].fitness() < population[best_idx].fitness() {
            best_idx = idx;
        }
    }
    best_idx
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn make_population(fitnesses: &[f64]) -> Vec<Allocation> {
        fitnesses
            .iter()
            .map(|&f| {
                let mut a = Allocation::unassigned(1);
                a.set_fitness(f);
                a
            })
            .collect()
    }

    #[test]
    fn test_tournament_favors_best() {
        let pop = make_population(&[10.0, 5.0, 1.0, 8.0]);
        let mut rng = StdRng::seed_from_u64(42);

        let mut counts = [0u32; 4];
        let n = 10000;
        for _ in 0..n {
            counts[tournament(&pop, 4, &mut rng)] += 1;
        }
        // P(best sampled at least once in 4 draws) = 1 - (3/4)^4 ~ 0.68
        assert!(
            counts[2] > 6000,
            "expected best to be selected >60% of the time, got {}/{n}",
            counts[2]
        );
    }

    #[test]
    fn test_tournament_size_1_is_uniform() {
        let pop = make_population(&[10.0, 5.0, 1.0, 8.0]);
        let mut rng = StdRng::seed_from_u64(42);

        let mut counts = [0u32; 4];
        let n = 10000;
        for _ in 0..n {
            counts[tournament(&pop, 1, &mut rng)] += 1;
        }
        // Uniform: 2500 each. Best-of-many would push index 2 far above.
        for &c in &counts {
            assert!(
                (2200..2800).contains(&c),
                "expected uniform, got counts: {counts:?}"
            );
        }
    }

    #[test]
    fn test_tournament_size_0_behaves_like_1() {
        let pop = make_population(&[3.0, 1.0]);
        let mut rng = StdRng::seed_from_u64(9);
        let mut counts = [0u32; 2];
        for _ in 0..4000 {
            counts[tournament(&pop, 0, &mut rng)] += 1;
        }
        assert!(counts[0] > 1700 && counts[1] > 1700, "{counts:?}");
    }

    #[test]
    fn test_equal_fitness_is_uniform() {
        let pop = make_population(&[5.0, 5.0, 5.0, 5.0]);
        let mut rng = StdRng::seed_from_u64(42);

        let mut counts = [0u32; 4];
        for _ in 0..10000 {
            counts[tournament(&pop, 3, &mut rng)] += 1;
        }
        for &c in &counts {
            assert!(c > 1500, "expected roughly uniform, got {counts:?}");
        }
    }

    #[test]
    fn test_single_individual() {
        let pop = make_population(&[5.0]);
        let mut rng = StdRng::seed_from_u64(42);
        assert_eq!(tournament(&pop, 3, &mut rng), 0);
    }

    #[test]
    fn test_does_not_modify_population() {
        let pop = make_population(&[2.0, 1.0, 3.0]);
        let before = pop.clone();
        let mut rng = StdRng::seed_from_u64(0);
        for _ in 0..100 {
            tournament(&pop, 3, &mut rng);
        }
        assert_eq!(pop, before);
    }

    #[test]
    fn test_same_seed_same_choices() {
        let pop = make_population(&[4.0, 2.0, 9.0, 1.0, 7.0]);
        let mut a = StdRng::seed_from_u64(123);
        let mut b = StdRng::seed_from_u64(123);
        let xs: Vec<usize> = (0..50).map(|_| tournament(&pop, 3, &mut a)).collect();
        let ys: Vec<usize> = (0..50).map(|_| tournament(&pop, 3, &mut b)).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    #[should_panic(expected = "cannot select from empty population")]
    fn test_empty_population_panics() {
        let pop: Vec<Allocation> = vec![];
        let mut rng = StdRng::seed_from_u64(42);
        tournament(&pop, 3, &mut rng);
    }
}
