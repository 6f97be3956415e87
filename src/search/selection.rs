//! Parent and survivor selection.
//!
//! Parents come from repeated tournaments; survivors from elitist
//! truncation. All comparisons assume **maximization** (higher fitness =
//! better).
//!
//! # References
//!
//! - Miller & Goldberg (1995), "Genetic Algorithms, Tournament Selection,
//!   and the Effects of Noise"

use super::types::{Individual, Selector};
use rand::Rng;
use std::cmp::Ordering;

/// Tournament parent selection with elitist survivor truncation.
///
/// Each tournament draws `size` entrants uniformly with replacement and
/// keeps the best `winners`. Tournaments repeat until the parent pool
/// holds as many individuals as the population.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TournamentSelection {
    size: usize,
    winners: usize,
}

impl Default for TournamentSelection {
    fn default() -> Self {
        Self {
            size: 20,
            winners: 2,
        }
    }
}

impl TournamentSelection {
    /// Tournament of `size` entrants keeping the best `winners`.
    ///
    /// Both are raised to at least 1 and `winners` is capped at `size`.
    pub fn new(size: usize, winners: usize) -> Self {
        let size = size.max(1);
        Self {
            size,
            winners: winners.clamp(1, size),
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn winners(&self) -> usize {
        self.winners
    }

    /// Runs one tournament and returns the winners' indices, best first.
    fn tournament<I: Individual, R: Rng>(&self, population: &[I], rng: &mut R) -> Vec<usize> {
        let n = population.len();
        let mut entrants: Vec<usize> = (0..self.size).map(|_| rng.random_range(0..n)).collect();
        entrants.sort_by(|&a, &b| by_fitness_desc(&population[a], &population[b]));
        entrants.truncate(self.winners);
        entrants
    }
}

impl Selector for TournamentSelection {
    /// Parent pool of exactly `population.len()` individuals.
    ///
    /// # Panics
    /// Panics if `population` is empty.
    fn parents<I: Individual, R: Rng>(&self, population: &[I], rng: &mut R) -> Vec<I> {
        assert!(
            !population.is_empty(),
            "cannot select from empty population"
        );

        let target = population.len();
        let mut parents = Vec::with_capacity(target + self.winners);
        let mut rounds = 0usize;
        while parents.len() < target {
            for idx in self.tournament(population, rng) {
                parents.push(population[idx].clone());
            }
            rounds += 1;
        }
        parents.truncate(target);
        tracing::debug!(rounds, parents = parents.len(), "Parent pool selected");
        parents
    }

    /// The best `max_population` individuals, best first.
    ///
    /// The sort is stable, so reapplying it to its own output is a no-op.
    fn survivors<I: Individual>(&self, mut population: Vec<I>, max_population: usize) -> Vec<I> {
        population.sort_by(by_fitness_desc);
        population.truncate(max_population);
        population
    }
}

fn by_fitness_desc<I: Individual>(a: &I, b: &I) -> Ordering {
    b.fitness()
        .partial_cmp(&a.fitness())
        .unwrap_or(Ordering::Equal)
}
