//! Flow locus: the flow assigned to one turbine.

use super::turbine::Turbine;
use crate::error::{DispatchError, Result};
use crate::hydraulics::{Discharge, STANDARD_REYNOLDS};
use std::sync::Arc;

/// Bounded flow value tied to one turbine.
///
/// The value always lies within the turbine's flow limits. The turbine is
/// shared, not owned: cloning a `Flow` copies value and Reynolds number and
/// keeps pointing at the same turbine.
#[derive(Debug, Clone)]
pub struct Flow {
    value: Option<f64>,
    reynolds: f64,
    turbine: Arc<Turbine>,
}

impl Flow {
    /// A flow at the standard Reynolds number.
    ///
    /// # Errors
    /// `OutOfBounds` if `value` is outside the turbine's flow limits.
    pub fn new(value: f64, turbine: Arc<Turbine>) -> Result<Self> {
        Self::with_reynolds(value, STANDARD_REYNOLDS, turbine)
    }

    /// A flow with an explicit Reynolds number.
    ///
    /// # Errors
    /// - `InvalidParameter` if `reynolds < 0`
    /// - `OutOfBounds` if `value` is outside the turbine's flow limits
    pub fn with_reynolds(value: f64, reynolds: f64, turbine: Arc<Turbine>) -> Result<Self> {
        let mut flow = Self::unset_with_reynolds(reynolds, turbine)?;
        flow.set_value(value)?;
        Ok(flow)
    }

    /// A placeholder with no value yet; it must be assigned before
    /// evaluation.
    pub fn unset(turbine: Arc<Turbine>) -> Self {
        Self {
            value: None,
            reynolds: STANDARD_REYNOLDS,
            turbine,
        }
    }

    /// A flow at the standard Reynolds number, with `value` clamped into
    /// the turbine's limits.
    ///
    /// `value` must not be NaN.
    pub(crate) fn clamped(value: f64, turbine: Arc<Turbine>) -> Self {
        let limits = turbine.flow_limits();
        Self {
            value: Some(value.clamp(limits.min, limits.max)),
            reynolds: STANDARD_REYNOLDS,
            turbine,
        }
    }

    fn unset_with_reynolds(reynolds: f64, turbine: Arc<Turbine>) -> Result<Self> {
        if reynolds.is_nan() || reynolds < 0.0 {
            return Err(DispatchError::invalid(
                "reynolds number",
                format!("must be non-negative, got {reynolds}"),
            ));
        }
        Ok(Self {
            value: None,
            reynolds,
            turbine,
        })
    }

    /// Assigns a new flow value.
    ///
    /// # Errors
    /// `OutOfBounds` if `value` is outside the turbine's flow limits; the
    /// previous value is kept.
    pub fn set_value(&mut self, value: f64) -> Result<()> {
        let limits = self.turbine.flow_limits();
        if !limits.contains(value) {
            return Err(DispatchError::OutOfBounds {
                turbine: self.turbine.id(),
                value,
                min: limits.min,
                max: limits.max,
            });
        }
        self.value = Some(value);
        Ok(())
    }

    pub fn value(&self) -> Option<f64> {
        self.value
    }

    pub fn reynolds(&self) -> f64 {
        self.reynolds
    }

    pub fn turbine(&self) -> &Arc<Turbine> {
        &self.turbine
    }

    /// Rate and Reynolds number for the loss model.
    ///
    /// # Errors
    /// `FlowUnset` on a placeholder.
    pub fn discharge(&self) -> Result<Discharge> {
        let rate = self.value.ok_or(DispatchError::FlowUnset {
            turbine: self.turbine.id(),
        })?;
        Ok(Discharge {
            rate,
            reynolds: self.reynolds,
        })
    }

    /// Power the bound turbine produces at this flow.
    pub fn power(&self) -> Result<f64> {
        self.turbine.power(self)
    }
}
