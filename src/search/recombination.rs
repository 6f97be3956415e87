//! Arithmetic recombination of flow distributions.
//!
//! # Operators
//!
//! - [`whole_arithmetic`]: every locus of each child is a convex blend of
//!   the parents' loci
//! - [`simple_recombination`]: the first `k` loci are copied from each
//!   parent and the rest blended
//!
//! Both parents' values lie within the same turbine's limits, so any
//! convex blend does too; children never need repair.
//!
//! # References
//!
//! - Eiben & Smith (2015), *Introduction to Evolutionary Computing*, §4.4.2

use super::types::Recombiner;
use crate::error::{DispatchError, Result};
use crate::plant::{Distribution, Flow};
use rand::Rng;
use std::sync::Arc;

/// Whole-arithmetic recombination.
///
/// Child 1 takes `alpha · p2 + (1 − alpha) · p1` at every locus, child 2
/// the symmetric `alpha · p1 + (1 − alpha) · p2`.
///
/// # Errors
/// - `InvalidParameter` if `alpha` is outside [0, 1]
/// - `DistributionMismatch` if the parents are not bound to the same
///   turbines
/// - `FlowUnset` if a parent has an unassigned locus
pub fn whole_arithmetic(
    alpha: f64,
    parent1: &Distribution,
    parent2: &Distribution,
) -> Result<(Distribution, Distribution)> {
    simple_recombination(0, alpha, parent1, parent2)
}

/// k-point arithmetic recombination.
///
/// Loci `0..k` are copied verbatim (child 1 from parent 1, child 2 from
/// parent 2); loci `k..` are blended as in [`whole_arithmetic`].
///
/// # Errors
/// As [`whole_arithmetic`], plus `InvalidParameter` if `k` exceeds the
/// distribution length.
pub fn simple_recombination(
    k: usize,
    alpha: f64,
    parent1: &Distribution,
    parent2: &Distribution,
) -> Result<(Distribution, Distribution)> {
    if !(0.0..=1.0).contains(&alpha) {
        return Err(DispatchError::invalid(
            "blend alpha",
            format!("must be within [0, 1], got {alpha}"),
        ));
    }
    check_parents(parent1, parent2)?;
    if k > parent1.len() {
        return Err(DispatchError::invalid(
            "crossover point",
            format!("{k} exceeds distribution length {}", parent1.len()),
        ));
    }

    let n = parent1.len();
    let mut loci1 = Vec::with_capacity(n);
    let mut loci2 = Vec::with_capacity(n);

    // A convex blend can only leave the limits through rounding.
    for (i, (a, b)) in parent1.loci().iter().zip(parent2.loci()).enumerate() {
        if i < k {
            loci1.push(a.clone());
            loci2.push(b.clone());
            continue;
        }
        let va = a.discharge()?.rate;
        let vb = b.discharge()?.rate;
        loci1.push(Flow::clamped(alpha * vb + (1.0 - alpha) * va, Arc::clone(a.turbine())));
        loci2.push(Flow::clamped(alpha * va + (1.0 - alpha) * vb, Arc::clone(b.turbine())));
    }

    Ok((Distribution::new(loci1), Distribution::new(loci2)))
}

fn check_parents(parent1: &Distribution, parent2: &Distribution) -> Result<()> {
    if parent1.len() != parent2.len() {
        return Err(DispatchError::DistributionMismatch {
            detail: format!("parents have {} and {} loci", parent1.len(), parent2.len()),
        });
    }
    let aligned = parent1
        .loci()
        .iter()
        .zip(parent2.loci())
        .all(|(a, b)| Arc::ptr_eq(a.turbine(), b.turbine()));
    if !aligned {
        return Err(DispatchError::DistributionMismatch {
            detail: "parents are bound to different turbines".into(),
        });
    }
    Ok(())
}

/// Recombiner applying [`whole_arithmetic`] with a given probability.
///
/// When the pair is not recombined the children are copies of the parents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArithmeticRecombination {
    alpha: f64,
    crossover_rate: f64,
}

impl ArithmeticRecombination {
    /// # Errors
    /// `InvalidParameter` if `alpha` or `crossover_rate` is outside [0, 1].
    pub fn new(alpha: f64, crossover_rate: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&alpha) {
            return Err(DispatchError::invalid(
                "blend alpha",
                format!("must be within [0, 1], got {alpha}"),
            ));
        }
        if !(0.0..=1.0).contains(&crossover_rate) {
            return Err(DispatchError::invalid(
                "crossover rate",
                format!("must be within [0, 1], got {crossover_rate}"),
            ));
        }
        Ok(Self {
            alpha,
            crossover_rate,
        })
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn crossover_rate(&self) -> f64 {
        self.crossover_rate
    }
}

impl Default for ArithmeticRecombination {
    fn default() -> Self {
        Self {
            alpha: 0.5,
            crossover_rate: 1.0,
        }
    }
}

impl Recombiner for ArithmeticRecombination {
    type Individual = Distribution;

    fn recombine<R: Rng>(
        &self,
        parent1: &Distribution,
        parent2: &Distribution,
        rng: &mut R,
    ) -> Result<Vec<Distribution>> {
        if rng.random_range(0.0..1.0) < self.crossover_rate {
            let (child1, child2) = whole_arithmetic(self.alpha, parent1, parent2)?;
            Ok(vec![child1, child2])
        } else {
            check_parents(parent1, parent2)?;
            Ok(vec![
                Distribution::new(parent1.loci().to_vec()),
                Distribution::new(parent2.loci().to_vec()),
            ])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::plant::{Plant, PlantSpec};
    use crate::random::create_rng;
    use crate::search::{FlowGenerator, Generator, Individual};
    use proptest::prelude::*;

    fn plant() -> Plant {
        PlantSpec::tres_marias().build().unwrap()
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

    fn values(d: &Distribution) -> Vec<f64> {
        d.loci().iter().map(|f| f.value().unwrap()).collect()
    }

    #[test]
    fn test_half_blend_is_mean() {
        let plant = plant();
        let p1 = distribution(&plant, &[70.0, 80.0, 90.0, 100.0, 110.0, 140.0]);
        let p2 = distribution(&plant, &[140.0, 120.0, 90.0, 80.0, 70.0, 70.0]);
        let (c1, c2) = whole_arithmetic(0.5, &p1, &p2).unwrap();

        let expected = [105.0, 100.0, 90.0, 90.0, 90.0, 105.0];
        for (got, want) in values(&c1).iter().zip(expected) {
            assert!((got - want).abs() < 1e-12);
        }
        assert_eq!(values(&c1), values(&c2));
    }

    #[test]
    fn test_asymmetric_blend() {
        let plant = plant();
        let p1 = distribution(&plant, &[70.0; 6]);
        let p2 = distribution(&plant, &[140.0; 6]);
        let (c1, c2) = whole_arithmetic(0.25, &p1, &p2).unwrap();
        assert!(values(&c1).iter().all(|v| (v - 87.5).abs() < 1e-12));
        assert!(values(&c2).iter().all(|v| (v - 122.5).abs() < 1e-12));
    }

    #[test]
    fn test_children_share_parent_turbines() {
        let plant = plant();
        let p1 = distribution(&plant, &[100.0; 6]);
        let p2 = distribution(&plant, &[120.0; 6]);
        let (c1, _) = whole_arithmetic(0.5, &p1, &p2).unwrap();
        for (flow, turbine) in c1.loci().iter().zip(plant.turbines()) {
            assert!(Arc::ptr_eq(flow.turbine(), turbine));
        }
        assert_eq!(c1.fitness(), f64::NEG_INFINITY);
    }

    #[test]
    fn test_k_point_copies_prefix() {
        let plant = plant();
        let p1 = distribution(&plant, &[70.0; 6]);
        let p2 = distribution(&plant, &[130.0; 6]);
        let (c1, c2) = simple_recombination(2, 0.5, &p1, &p2).unwrap();
        assert_eq!(values(&c1), vec![70.0, 70.0, 100.0, 100.0, 100.0, 100.0]);
        assert_eq!(values(&c2), vec![130.0, 130.0, 100.0, 100.0, 100.0, 100.0]);
    }

    #[test]
    fn test_k_point_full_length_copies_parents() {
        let plant = plant();
        let p1 = distribution(&plant, &[70.0; 6]);
        let p2 = distribution(&plant, &[130.0; 6]);
        let (c1, c2) = simple_recombination(6, 0.5, &p1, &p2).unwrap();
        assert_eq!(values(&c1), values(&p1));
        assert_eq!(values(&c2), values(&p2));
        assert!(simple_recombination(7, 0.5, &p1, &p2).is_err());
    }

    #[test]
    fn test_invalid_alpha() {
        let plant = plant();
        let p = distribution(&plant, &[100.0; 6]);
        let err = whole_arithmetic(1.5, &p, &p).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert!(ArithmeticRecombination::new(-0.1, 0.5).is_err());
        assert!(ArithmeticRecombination::new(0.5, 1.1).is_err());
    }

    #[test]
    fn test_mismatched_parents() {
        let a = plant();
        let b = plant();
        let p1 = distribution(&a, &[100.0; 6]);
        let p2 = distribution(&b, &[100.0; 6]);
        assert!(matches!(
            whole_arithmetic(0.5, &p1, &p2),
            Err(DispatchError::DistributionMismatch { .. })
        ));
    }

    #[test]
    fn test_template_parent_fails() {
        let plant = plant();
        let generator = FlowGenerator::new(&plant);
        let template = generator.template();
        let p = generator.random(&mut create_rng(1));
        assert!(matches!(
            whole_arithmetic(0.5, &template, &p),
            Err(DispatchError::FlowUnset { .. })
        ));
    }

    #[test]
    fn test_rate_zero_copies_parents() {
        let plant = plant();
        let p1 = distribution(&plant, &[70.0; 6]);
        let p2 = distribution(&plant, &[130.0; 6]);
        let op = ArithmeticRecombination::new(0.5, 0.0).unwrap();
        let children = op.recombine(&p1, &p2, &mut create_rng(3)).unwrap();
        assert_eq!(children.len(), 2);
        assert_eq!(values(&children[0]), values(&p1));
        assert_eq!(values(&children[1]), values(&p2));
    }

    #[test]
    fn test_rate_one_always_blends() {
        let plant = plant();
        let p1 = distribution(&plant, &[70.0; 6]);
        let p2 = distribution(&plant, &[130.0; 6]);
        let op = ArithmeticRecombination::default();
        let mut rng = create_rng(3);
        for _ in 0..20 {
            let children = op.recombine(&p1, &p2, &mut rng).unwrap();
            assert!(values(&children[0]).iter().all(|&v| v == 100.0));
        }
    }

    proptest! {
        #[test]
        fn prop_children_within_limits(seed in any::<u64>(), alpha in 0.0f64..=1.0) {
            let plant = plant();
            let generator = FlowGenerator::new(&plant);
            let mut rng = create_rng(seed);
            let p1 = generator.random(&mut rng);
            let p2 = generator.random(&mut rng);
            let (c1, c2) = whole_arithmetic(alpha, &p1, &p2).unwrap();
            for child in [&c1, &c2] {
                for flow in child.loci() {
                    let limits = flow.turbine().flow_limits();
                    let v = flow.value().unwrap();
                    prop_assert!(limits.min <= v && v <= limits.max);
                }
            }
        }

        #[test]
        fn prop_half_blend_between_parents(a in 70.0f64..=140.0, b in 70.0f64..=140.0) {
            let plant = plant();
            let p1 = distribution(&plant, &[a; 6]);
            let p2 = distribution(&plant, &[b; 6]);
            let (c1, _) = whole_arithmetic(0.5, &p1, &p2).unwrap();
            for v in values(&c1) {
                prop_assert!((v - (a + b) / 2.0).abs() < 1e-9);
                prop_assert!(a.min(b) - 1e-12 <= v && v <= a.max(b) + 1e-12);
            }
        }
    }
}
