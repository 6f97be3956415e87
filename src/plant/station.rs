//! The plant: evaluation context for candidate distributions.

use super::distribution::Distribution;
use super::turbine::Turbine;
use crate::error::{DispatchError, Result};
use crate::hydraulics::Conduit;
use crate::search::{Environment, Individual};
use std::sync::Arc;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Fraction of the target power a distribution may deviate by without
/// penalty.
pub const DEMAND_TOLERANCE: f64 = 0.001;

/// Multiplier applied to the efficiency of an off-target distribution.
pub const DEMAND_PENALTY: f64 = 0.9;

/// Installed turbines plus the power demand they must meet.
///
/// Topology is frozen at construction: turbines and conduits are shared
/// read-only, so distributions can be evaluated concurrently.
#[derive(Debug, Clone)]
pub struct Plant {
    turbines: Vec<Arc<Turbine>>,
    target: Option<f64>,
}

impl Plant {
    /// Freezes a set of installed turbines into a plant.
    ///
    /// # Errors
    /// - `InvalidParameter` if a turbine's id differs from its position
    /// - `NotInstalled` if a turbine has no conduit
    pub fn new(turbines: Vec<Turbine>) -> Result<Self> {
        for (index, turbine) in turbines.iter().enumerate() {
            if turbine.id() != index {
                return Err(DispatchError::invalid(
                    "turbine id",
                    format!("turbine at position {index} has id {}", turbine.id()),
                ));
            }
            if !turbine.is_installed() {
                return Err(DispatchError::NotInstalled { turbine: index });
            }
        }
        Ok(Self {
            turbines: turbines.into_iter().map(Arc::new).collect(),
            target: None,
        })
    }

    pub fn turbines(&self) -> &[Arc<Turbine>] {
        &self.turbines
    }

    /// Conduits in turbine order.
    pub fn conduits(&self) -> impl Iterator<Item = &Conduit> {
        self.turbines.iter().filter_map(|t| t.conduit())
    }

    pub fn target(&self) -> Option<f64> {
        self.target
    }

    /// Sets the power demand fitness is measured against.
    pub fn set_target(&mut self, demand: f64) {
        self.target = Some(demand);
    }

    /// Scores a distribution; higher is better.
    ///
    /// Fitness is total power over total flow, multiplied by
    /// [`DEMAND_PENALTY`] when total power falls outside
    /// `[target · 0.999, target · 1.001]`. A distribution with zero total
    /// flow has no defined efficiency and yields a non-finite value.
    ///
    /// # Errors
    /// - `TargetNotSet` before [`set_target`](Self::set_target)
    /// - `DistributionMismatch` if the distribution is not bound to this
    ///   plant's turbines index by index
    /// - `FlowUnset` for a template distribution
    pub fn fitness(&self, distribution: &Distribution) -> Result<f64> {
        let target = self.target.ok_or(DispatchError::TargetNotSet)?;
        self.check_binding(distribution)?;

        let power = distribution.total_power()?;
        let flow = distribution.total_flow()?;
        if flow == 0.0 {
            tracing::warn!(power, "Evaluating a distribution with zero total flow");
        }

        let mut efficiency = power / flow;
        let low = target * (1.0 - DEMAND_TOLERANCE);
        let high = target * (1.0 + DEMAND_TOLERANCE);
        if power < low || power > high {
            tracing::trace!(power, target, "Off-target distribution penalized");
            efficiency *= DEMAND_PENALTY;
        }
        Ok(efficiency)
    }

    /// Computes and stores the fitness of every distribution.
    ///
    /// With the `parallel` feature and `parallel == true` the population is
    /// scored with rayon; otherwise sequentially.
    pub fn evaluate_population(&self, population: &mut [Distribution], parallel: bool) -> Result<()> {
        #[cfg(feature = "parallel")]
        if parallel {
            return population.par_iter_mut().try_for_each(|d| {
                let f = self.fitness(d)?;
                d.set_fitness(f);
                Ok(())
            });
        }
        #[cfg(not(feature = "parallel"))]
        let _ = parallel;

        for d in population.iter_mut() {
            let f = self.fitness(d)?;
            d.set_fitness(f);
        }
        Ok(())
    }

    fn check_binding(&self, distribution: &Distribution) -> Result<()> {
        if distribution.len() != self.turbines.len() {
            return Err(DispatchError::DistributionMismatch {
                detail: format!(
                    "{} loci for {} turbines",
                    distribution.len(),
                    self.turbines.len()
                ),
            });
        }
        for (index, (flow, turbine)) in distribution.loci().iter().zip(&self.turbines).enumerate() {
            if !Arc::ptr_eq(flow.turbine(), turbine) {
                return Err(DispatchError::DistributionMismatch {
                    detail: format!("locus {index} is bound to another turbine"),
                });
            }
        }
        Ok(())
    }
}

impl Environment for Plant {
    type Individual = Distribution;

    fn evaluate(&self, individual: &Distribution) -> Result<f64> {
        self.fitness(individual)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::plant::{Flow, TurbineParams};

    fn params() -> TurbineParams {
        TurbineParams {
            min_power: 35.0,
            max_power: 66.0,
            min_flow: 70.0,
            max_flow: 140.0,
            coefficients: [0.1463, 0.018076, 0.0050502, -3.5254e-05, -0.00012337, -1.4507e-05],
        }
    }

    fn lossless_plant(n: usize) -> Plant {
        let turbines = (0..n)
            .map(|id| {
                let mut t = Turbine::new(id, &params()).unwrap();
                t.install(54.0, Conduit::default()).unwrap();
                t
            })
            .collect();
        Plant::new(turbines).unwrap()
    }

    fn distribution(plant: &Plant, values: &[f64]) -> Distribution {
        Distribution::new(
            plant
                .turbines()
                .iter()
                .zip(values)
                .map(|(t, &v)| Flow::new(v, Arc::clone(t)).unwrap())
                .collect(),
        )
    }

    const GOLDEN_POWER: f64 = 49.333_901_601_6;

    #[test]
    fn test_fitness_requires_target() {
        let plant = lossless_plant(1);
        let d = distribution(&plant, &[100.0]);
        let err = plant.fitness(&d).unwrap_err();
        assert!(matches!(err, DispatchError::TargetNotSet));
        assert_eq!(err.kind(), ErrorKind::State);
    }

    #[test]
    fn test_no_penalty_on_target() {
        let mut plant = lossless_plant(1);
        let d = distribution(&plant, &[100.0]);
        let power = d.total_power().unwrap();
        plant.set_target(power);
        let fitness = plant.fitness(&d).unwrap();
        assert!((fitness - power / 100.0).abs() < 1e-15);
        assert!((fitness - GOLDEN_POWER / 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_penalty_outside_band() {
        let mut plant = lossless_plant(1);
        let d = distribution(&plant, &[100.0]);
        let power = d.total_power().unwrap();
        let unpenalized = power / 100.0;

        // power is 2% below the target
        plant.set_target(power / 0.98);
        assert!((plant.fitness(&d).unwrap() - 0.9 * unpenalized).abs() < 1e-15);

        // power is 2% above the target
        plant.set_target(power / 1.02);
        assert!((plant.fitness(&d).unwrap() - 0.9 * unpenalized).abs() < 1e-15);
    }

    #[test]
    fn test_band_edges() {
        let mut plant = lossless_plant(1);
        let d = distribution(&plant, &[100.0]);
        let power = d.total_power().unwrap();
        let unpenalized = power / 100.0;

        // 0.05% off target: inside the band
        plant.set_target(power * 1.0005);
        assert!((plant.fitness(&d).unwrap() - unpenalized).abs() < 1e-15);
        plant.set_target(power * 0.9995);
        assert!((plant.fitness(&d).unwrap() - unpenalized).abs() < 1e-15);

        // 0.2% off target: outside
        plant.set_target(power * 1.002);
        assert!((plant.fitness(&d).unwrap() - 0.9 * unpenalized).abs() < 1e-15);
    }

    fn next_up(x: f64) -> f64 {
        f64::from_bits(x.to_bits() + 1)
    }

    fn next_down(x: f64) -> f64 {
        f64::from_bits(x.to_bits() - 1)
    }

    #[test]
    fn test_band_boundaries_are_inclusive() {
        let mut plant = lossless_plant(1);
        let d = distribution(&plant, &[100.0]);
        let power = d.total_power().unwrap();
        let unpenalized = power / 100.0;

        // Largest target whose lower bound still reaches down to the power.
        let mut target = power / (1.0 - DEMAND_TOLERANCE);
        while target * (1.0 - DEMAND_TOLERANCE) > power {
            target = next_down(target);
        }
        while next_up(target) * (1.0 - DEMAND_TOLERANCE) <= power {
            target = next_up(target);
        }
        plant.set_target(target);
        assert_eq!(plant.fitness(&d).unwrap(), unpenalized);
        plant.set_target(next_up(target));
        assert_eq!(plant.fitness(&d).unwrap(), unpenalized * DEMAND_PENALTY);

        // Smallest target whose upper bound still reaches up to the power.
        let mut target = power / (1.0 + DEMAND_TOLERANCE);
        while target * (1.0 + DEMAND_TOLERANCE) < power {
            target = next_up(target);
        }
        while next_down(target) * (1.0 + DEMAND_TOLERANCE) >= power {
            target = next_down(target);
        }
        plant.set_target(target);
        assert_eq!(plant.fitness(&d).unwrap(), unpenalized);
        plant.set_target(next_down(target));
        assert_eq!(plant.fitness(&d).unwrap(), unpenalized * DEMAND_PENALTY);
    }

    #[test]
    fn test_zero_flow_is_not_finite() {
        let mut plant = lossless_plant(0);
        plant.set_target(320.0);
        let d = Distribution::new(Vec::new());
        let fitness = plant.fitness(&d).unwrap();
        assert!(!fitness.is_finite());
    }

    #[test]
    fn test_length_mismatch() {
        let mut plant = lossless_plant(2);
        plant.set_target(100.0);
        let other = lossless_plant(1);
        let d = distribution(&other, &[100.0]);
        let err = plant.fitness(&d).unwrap_err();
        assert!(matches!(err, DispatchError::DistributionMismatch { .. }));
    }

    #[test]
    fn test_foreign_turbine_binding() {
        let mut plant = lossless_plant(1);
        plant.set_target(50.0);
        let other = lossless_plant(1);
        let d = distribution(&other, &[100.0]);
        assert!(plant.fitness(&d).is_err());
    }

    #[test]
    fn test_template_cannot_be_scored() {
        let mut plant = lossless_plant(1);
        plant.set_target(50.0);
        let d = Distribution::new(vec![Flow::unset(Arc::clone(&plant.turbines()[0]))]);
        assert!(matches!(plant.fitness(&d), Err(DispatchError::FlowUnset { .. })));
    }

    #[test]
    fn test_new_rejects_uninstalled() {
        let turbines = vec![Turbine::new(0, &params()).unwrap()];
        let err = Plant::new(turbines).unwrap_err();
        assert!(matches!(err, DispatchError::NotInstalled { turbine: 0 }));
    }

    #[test]
    fn test_new_rejects_misplaced_id() {
        let mut t = Turbine::new(3, &params()).unwrap();
        t.install(54.0, Conduit::default()).unwrap();
        assert!(Plant::new(vec![t]).is_err());
    }

    #[test]
    fn test_conduits_in_turbine_order() {
        let plant = lossless_plant(3);
        let owners: Vec<Option<usize>> = plant.conduits().map(Conduit::turbine).collect();
        assert_eq!(owners, vec![Some(0), Some(1), Some(2)]);
    }

    #[test]
    fn test_evaluate_population_sets_fitness() {
        let mut plant = lossless_plant(2);
        plant.set_target(100.0);
        let mut population = vec![
            distribution(&plant, &[100.0, 100.0]),
            distribution(&plant, &[80.0, 130.0]),
        ];
        plant.evaluate_population(&mut population, false).unwrap();
        for d in &population {
            assert_eq!(d.fitness(), plant.fitness(d).unwrap());
        }
    }

    #[test]
    fn test_evaluate_population_parallel_matches_sequential() {
        let mut plant = lossless_plant(2);
        plant.set_target(100.0);
        let mut a = vec![
            distribution(&plant, &[100.0, 100.0]),
            distribution(&plant, &[70.0, 140.0]),
        ];
        let mut b = a.clone();
        plant.evaluate_population(&mut a, false).unwrap();
        plant.evaluate_population(&mut b, true).unwrap();
        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.fitness(), y.fitness());
        }
    }
}
