//! Operator set wired from a [`SearchConfig`].

use super::config::SearchConfig;
use super::generator::FlowGenerator;
use super::recombination::ArithmeticRecombination;
use super::selection::TournamentSelection;
use crate::error::Result;
use crate::plant::Plant;

/// Generator, recombiner and selector for one plant and configuration.
#[derive(Debug, Clone)]
pub struct SearchOperators {
    pub generator: FlowGenerator,
    pub recombination: ArithmeticRecombination,
    pub selection: TournamentSelection,
}

impl SearchOperators {
    /// Validates `config`, sets the plant's target demand and builds the
    /// operators.
    pub fn prepare(plant: &mut Plant, config: &SearchConfig) -> Result<Self> {
        config.validate()?;
        plant.set_target(config.target_demand);
        tracing::debug!(
            turbines = plant.turbines().len(),
            target = config.target_demand,
            population = config.population_size,
            "Search operators prepared"
        );
        Ok(Self {
            generator: FlowGenerator::new(plant),
            recombination: ArithmeticRecombination::new(
                config.blend_alpha,
                config.crossover_rate,
            )?,
            selection: TournamentSelection::new(
                config.tournament_size,
                config.tournament_winners,
            ),
        })
    }
}
