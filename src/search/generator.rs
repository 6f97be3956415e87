//! Distribution generator.

use super::types::Generator;
use crate::plant::{Distribution, Flow, Plant, Turbine};
use rand::Rng;
use std::sync::Arc;

/// Creates distributions bound to a plant's turbines.
///
/// Each turbine's flow is drawn independently and uniformly from its own
/// limits; no correlation between turbines is modeled.
#[derive(Debug, Clone)]
pub struct FlowGenerator {
    turbines: Vec<Arc<Turbine>>,
}

impl FlowGenerator {
    pub fn new(plant: &Plant) -> Self {
        Self {
            turbines: plant.turbines().to_vec(),
        }
    }

    pub fn turbines(&self) -> &[Arc<Turbine>] {
        &self.turbines
    }
}

impl Generator for FlowGenerator {
    type Individual = Distribution;

    fn template(&self) -> Distribution {
        Distribution::new(
            self.turbines
                .iter()
                .map(|t| Flow::unset(Arc::clone(t)))
                .collect(),
        )
    }

    fn random<R: Rng>(&self, rng: &mut R) -> Distribution {
        Distribution::new(
            self.turbines
                .iter()
                .map(|turbine| {
                    let limits = turbine.flow_limits();
                    let value = rng.random_range(limits.min..=limits.max);
                    Flow::clamped(value, Arc::clone(turbine))
                })
                .collect(),
        )
    }
}
