//! Flow distribution: one candidate dispatch across all turbines.

use super::flow::Flow;
use crate::error::Result;
use crate::search::{Fitness, Individual};

/// Ordered flows, index `i` bound to the plant's turbine `i`.
///
/// Carries its own fitness so the search operators can rank it; a fresh
/// distribution starts at the worst fitness until evaluated.
#[derive(Debug, Clone)]
pub struct Distribution {
    loci: Vec<Flow>,
    fitness: f64,
}

/// Output of a single unit within a distribution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitOutput {
    pub turbine: usize,
    pub flow: f64,
    pub power: f64,
    pub efficiency: f64,
}

impl Distribution {
    pub fn new(loci: Vec<Flow>) -> Self {
        Self {
            loci,
            fitness: f64::worst(),
        }
    }

    pub fn len(&self) -> usize {
        self.loci.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loci.is_empty()
    }

    pub fn loci(&self) -> &[Flow] {
        &self.loci
    }

    pub fn locus(&self, index: usize) -> Option<&Flow> {
        self.loci.get(index)
    }

    /// Mutable access to one locus.
    ///
    /// Resets the fitness to the worst value: an edited distribution must
    /// be evaluated again.
    pub fn locus_mut(&mut self, index: usize) -> Option<&mut Flow> {
        self.fitness = f64::worst();
        self.loci.get_mut(index)
    }

    /// Sum of the power produced by every locus.
    pub fn total_power(&self) -> Result<f64> {
        self.loci.iter().map(Flow::power).sum()
    }

    /// Sum of the flow assigned to every locus.
    pub fn total_flow(&self) -> Result<f64> {
        self.loci
            .iter()
            .map(|flow| flow.discharge().map(|d| d.rate))
            .sum()
    }

    /// Per-unit flow, power and efficiency.
    pub fn breakdown(&self) -> Result<Vec<UnitOutput>> {
        self.loci
            .iter()
            .map(|flow| {
                let turbine = flow.turbine();
                Ok(UnitOutput {
                    turbine: turbine.id(),
                    flow: flow.discharge()?.rate,
                    power: turbine.power(flow)?,
                    efficiency: turbine.efficiency(flow)?,
                })
            })
            .collect()
    }
}

impl Individual for Distribution {
    type Fitness = f64;

    fn fitness(&self) -> f64 {
        self.fitness
    }

    fn set_fitness(&mut self, fitness: f64) {
        self.fitness = fitness;
    }
}
