//! Search configuration.
//!
//! [`SearchConfig`] holds the parameters the operators and the plant need
//! for one experiment.

use crate::error::{DispatchError, Result};
use crate::random::create_rng;
use rand::rngs::StdRng;

/// Configuration of the dispatch search operators.
///
/// # Defaults
///
/// ```
/// use hydro_dispatch::search::SearchConfig;
///
/// let config = SearchConfig::default();
/// assert_eq!(config.population_size, 50);
/// assert_eq!(config.tournament_size, 20);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use hydro_dispatch::search::SearchConfig;
///
/// let config = SearchConfig::default()
///     .with_population_size(80)
///     .with_target_demand(300.0)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchConfig {
    /// Maximum number of individuals kept by survivor selection.
    pub population_size: usize,

    /// Entrants drawn per tournament.
    pub tournament_size: usize,

    /// Best entrants kept from each tournament.
    pub tournament_winners: usize,

    /// Blend weight of whole-arithmetic recombination (0.0–1.0).
    ///
    /// A child locus is `alpha · parent2 + (1 − alpha) · parent1`.
    pub blend_alpha: f64,

    /// Probability of recombining a pair of parents (0.0–1.0).
    ///
    /// When recombination is not applied, copies of the parents are returned.
    pub crossover_rate: f64,

    /// Power demand the plant should meet.
    pub target_demand: f64,

    /// Whether to evaluate populations in parallel (requires the
    /// `parallel` feature).
    pub parallel: bool,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            population_size: 50,
            tournament_size: 20,
            tournament_winners: 2,
            blend_alpha: 0.5,
            crossover_rate: 0.5,
            target_demand: 320.0,
            parallel: false,
            seed: None,
        }
    }
}

impl SearchConfig {
    /// Sets the maximum population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the tournament size.
    pub fn with_tournament_size(mut self, k: usize) -> Self {
        self.tournament_size = k;
        self
    }

    /// Sets how many winners each tournament yields.
    pub fn with_tournament_winners(mut self, n: usize) -> Self {
        self.tournament_winners = n;
        self
    }

    /// Sets the blend weight.
    pub fn with_blend_alpha(mut self, alpha: f64) -> Self {
        self.blend_alpha = alpha.clamp(0.0, 1.0);
        self
    }

    /// Sets the crossover rate.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the power demand.
    pub fn with_target_demand(mut self, demand: f64) -> Self {
        self.target_demand = demand;
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

    /// RNG for this configuration: seeded if a seed is set.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => create_rng(seed),
            None => create_rng(rand::random()),
        }
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(DispatchError::invalid(
                "population_size",
                "must be at least 1",
            ));
        }
        if self.tournament_size == 0 {
            return Err(DispatchError::invalid("tournament_size", "must be at least 1"));
        }
        if self.tournament_winners == 0 || self.tournament_winners > self.tournament_size {
            return Err(DispatchError::invalid(
                "tournament_winners",
                format!("must be within [1, {}]", self.tournament_size),
            ));
        }
        if !(0.0..=1.0).contains(&self.blend_alpha) {
            return Err(DispatchError::invalid("blend_alpha", "must be within [0, 1]"));
        }
        if !(0.0..=1.0).contains(&self.crossover_rate) {
            return Err(DispatchError::invalid("crossover_rate", "must be within [0, 1]"));
        }
        if !self.target_demand.is_finite() || self.target_demand < 0.0 {
            return Err(DispatchError::invalid(
                "target_demand",
                format!("must be finite and non-negative, got {}", self.target_demand),
            ));
        }
        Ok(())
    }
}
