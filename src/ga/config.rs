//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control the evolutionary loop.

/// Error returned by [`GaConfig::validate`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// Fewer than two individuals.
    #[error("population_size must be at least 2, got {0}")]
    PopulationTooSmall(usize),

    /// Zero generations.
    #[error("max_generations must be at least 1")]
    NoGenerations,

    /// A probability outside `[0, 1]`.
    #[error("{name} must be between 0.0 and 1.0, got {value}")]
    RateOutOfRange {
        /// Parameter name.
        name: &'static str,
        /// Offending value.
        value: f64,
    },

    /// Tournament of size zero.
    #[error("tournament_size must be at least 1")]
    EmptyTournament,
}

/// Configuration for the allocation GA.
///
/// # Defaults
///
/// ```
/// use u_allocation::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.max_generations, 200);
/// assert_eq!(config.tournament_size, 3);
/// assert!(config.elitism);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_allocation::ga::GaConfig;
///
/// let config = GaConfig::default()
///     .with_population_size(60)
///     .with_tournament_size(5)
///     .with_mutation_rate(0.02)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaConfig {
    /// Number of individuals per generation. Constant for the whole run.
    pub population_size: usize,

    /// Number of generations to run. There is no early stopping.
    pub max_generations: usize,

    /// Per-gene probability of being redrawn in a freshly bred child.
    pub mutation_rate: f64,

    /// Probability that a drawn gene is "unassigned" instead of a
    /// grade-matching classroom. Used both when seeding the population and
    /// when mutating.
    pub unassigned_rate: f64,

    /// Individuals sampled (with replacement) per tournament.
    ///
    /// - 1: uniform random parent choice
    /// - 3: the reference setting
    pub tournament_size: usize,

    /// Copy the all-time best unchanged into slot 0 of every new generation.
    pub elitism: bool,

    /// Evaluate the population on the rayon thread pool.
    ///
    /// Only honored when the crate is built with the `parallel` feature.
    /// Results are identical to sequential evaluation.
    pub parallel: bool,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,

    /// Emit a progress line every this many generations (the last
    /// generation is always reported). 0 reports only the last.
    pub log_interval: usize,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            max_generations: 200,
            mutation_rate: 0.05,
            unassigned_rate: 0.05,
            tournament_size: 3,
            elitism: true,
            parallel: false,
            seed: None,
            log_interval: 10,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the number of generations.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the per-gene mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the probability of drawing "unassigned".
    pub fn with_unassigned_rate(mut self, rate: f64) -> Self {
        self.unassigned_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the tournament size.
    pub fn with_tournament_size(mut self, k: usize) -> Self {
        self.tournament_size = k;
        self
    }

    /// Enables or disables elitism.
    pub fn with_elitism(mut self, elitism: bool) -> Self {
        self.elitism = elitism;
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the progress logging interval.
    pub fn with_log_interval(mut self, every: usize) -> Self {
        self.log_interval = every;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size < 2 {
            return Err(ConfigError::PopulationTooSmall(self.population_size));
        }
        if self.max_generations == 0 {
            return Err(ConfigError::NoGenerations);
        }
        for (name, value) in [
            ("mutation_rate", self.mutation_rate),
            ("unassigned_rate", self.unassigned_rate),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::RateOutOfRange { name, value });
            }
        }
        if self.tournament_size == 0 {
            return Err(ConfigError::EmptyTournament);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GaConfig::default();
        assert_eq!(config.population_size, 100);
        assert_eq!(config.max_generations, 200);
        assert!((config.mutation_rate - 0.05).abs() < 1e-12);
        assert!((config.unassigned_rate - 0.05).abs() < 1e-12);
        assert_eq!(config.tournament_size, 3);
        assert!(config.elitism);
        assert!(!config.parallel);
        assert!(config.seed.is_none());
        assert_eq!(config.log_interval, 10);
    }

    #[test]
    fn test_builder_pattern() {
        let config = GaConfig::default()
            .with_population_size(30)
            .with_max_generations(50)
            .with_mutation_rate(0.2)
            .with_unassigned_rate(0.0)
            .with_tournament_size(1)
            .with_elitism(false)
            .with_parallel(true)
            .with_seed(42)
            .with_log_interval(0);

        assert_eq!(config.population_size, 30);
        assert_eq!(config.max_generations, 50);
        assert!((config.mutation_rate - 0.2).abs() < 1e-12);
        assert_eq!(config.unassigned_rate, 0.0);
        assert_eq!(config.tournament_size, 1);
        assert!(!config.elitism);
        assert!(config.parallel);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.log_interval, 0);
    }

    #[test]
    fn test_validate_ok() {
        assert!(GaConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_population_too_small() {
        let config = GaConfig::default().with_population_size(1);
        assert_eq!(config.validate(), Err(ConfigError::PopulationTooSmall(1)));
    }

    #[test]
    fn test_validate_zero_generations() {
        let config = GaConfig::default().with_max_generations(0);
        assert_eq!(config.validate(), Err(ConfigError::NoGenerations));
    }

    #[test]
    fn test_validate_zero_tournament() {
        let config = GaConfig::default().with_tournament_size(0);
        assert_eq!(config.validate(), Err(ConfigError::EmptyTournament));
    }

    #[test]
    fn test_validate_rate_set_directly() {
        let config = GaConfig {
            mutation_rate: 1.5,
            ..GaConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::RateOutOfRange {
                name: "mutation_rate",
                ..
            })
        ));
    }

    #[test]
    fn test_clamp_rates() {
        let config = GaConfig::default()
            .with_mutation_rate(2.0)
            .with_unassigned_rate(-0.5);
        assert_eq!(config.mutation_rate, 1.0);
        assert_eq!(config.unassigned_rate, 0.0);
        assert!(config.validate().is_ok());
    }
}
