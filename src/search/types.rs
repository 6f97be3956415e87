//! Core trait definitions for the search operators.
//!
//! [`Individual`] and [`Fitness`] define what the operators need from a
//! candidate; [`Environment`], [`Generator`], [`Recombiner`] and
//! [`Selector`] are the seams an external evolutionary engine calls.

use crate::error::Result;
use rand::Rng;

/// Marker trait for fitness values.
///
/// Higher fitness is considered better (maximization).
pub trait Fitness: PartialOrd + Copy + Send + Sync + std::fmt::Debug + 'static {
    /// Returns a value representing the worst possible fitness.
    ///
    /// Used for unevaluated individuals.
    fn worst() -> Self;
}

impl Fitness for f64 {
    fn worst() -> Self {
        f64::NEG_INFINITY
    }
}

/// A candidate solution in the population.
///
/// Individuals carry their own fitness value. The environment computes
/// it and the engine stores it via [`set_fitness`](Individual::set_fitness).
pub trait Individual: Clone + Send + Sync {
    /// The fitness type. Must implement [`Fitness`].
    type Fitness: Fitness;

    /// Returns the current fitness of this individual.
    fn fitness(&self) -> Self::Fitness;

    /// Sets the fitness of this individual.
    fn set_fitness(&mut self, fitness: Self::Fitness);
}

/// Scores individuals.
pub trait Environment: Send + Sync {
    type Individual: Individual;

    /// Evaluates one individual; higher is better.
    fn evaluate(&self, individual: &Self::Individual)
        -> Result<<Self::Individual as Individual>::Fitness>;
}

/// Creates individuals.
pub trait Generator {
    type Individual: Individual;

    /// An individual whose genes are not yet assigned.
    ///
    /// Used as a template to fill in; it cannot be evaluated as is.
    fn template(&self) -> Self::Individual;

    /// A random, valid individual.
    fn random<R: Rng>(&self, rng: &mut R) -> Self::Individual;

    /// `n` independent random individuals.
    fn random_n<R: Rng>(&self, n: usize, rng: &mut R) -> Vec<Self::Individual> {
        (0..n).map(|_| self.random(rng)).collect()
    }
}

/// Produces children from a pair of parents.
pub trait Recombiner {
    type Individual: Individual;

    /// Returns the children of `parent1` and `parent2`.
    fn recombine<R: Rng>(
        &self,
        parent1: &Self::Individual,
        parent2: &Self::Individual,
        rng: &mut R,
    ) -> Result<Vec<Self::Individual>>;
}

/// Chooses parents and survivors.
pub trait Selector {
    /// Picks the parent pool from an evaluated population.
    fn parents<I: Individual, R: Rng>(&self, population: &[I], rng: &mut R) -> Vec<I>;

    /// Keeps the best `max_population` individuals.
    fn survivors<I: Individual>(&self, population: Vec<I>, max_population: usize) -> Vec<I>;
}
