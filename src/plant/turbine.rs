//! Turbine model: operating limits, efficiency polynomial and power output.

use super::flow::Flow;
use super::source::{TurbineParams, COEFFICIENT_COUNT};
use crate::error::{DispatchError, Result};
use crate::hydraulics::{Conduit, Discharge};

/// Conversion constant of `P = k · η · H · Q`.
pub const POWER_CONSTANT: f64 = 9.8e-3;

/// Closed operating range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Limits {
    pub min: f64,
    pub max: f64,
}

impl Limits {
    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// Gross head and penstock, bound together when the turbine is installed.
#[derive(Debug, Clone, PartialEq)]
struct Installation {
    gross_head: f64,
    conduit: Conduit,
}

/// A generating unit.
///
/// Lifecycle: created disconnected and off, then [`install`](Self::install)ed
/// exactly once (gross head plus conduit), then optionally turned on. Once
/// a plant is assembled its turbines are shared read-only.
#[derive(Debug, Clone, PartialEq)]
pub struct Turbine {
    id: usize,
    power: Limits,
    flow: Limits,
    coefficients: [f64; COEFFICIENT_COUNT],
    installation: Option<Installation>,
    running: bool,
}

impl Turbine {
    /// Creates a disconnected turbine.
    ///
    /// `id` is the turbine's position in its plant.
    ///
    /// # Errors
    /// `InvalidParameter` unless both limits are finite and `min > 0`,
    /// `max >= 0` and `max >= min` hold for both the power and the flow
    /// range.
    pub fn new(id: usize, params: &TurbineParams) -> Result<Self> {
        let power = checked_limits("power limits", params.min_power, params.max_power)?;
        let flow = checked_limits("flow limits", params.min_flow, params.max_flow)?;
        Ok(Self {
            id,
            power,
            flow,
            coefficients: params.coefficients,
            installation: None,
            running: false,
        })
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn power_limits(&self) -> Limits {
        self.power
    }

    pub fn flow_limits(&self) -> Limits {
        self.flow
    }

    pub fn coefficients(&self) -> &[f64; COEFFICIENT_COUNT] {
        &self.coefficients
    }

    /// Sets the gross head and connects the conduit, both exactly once.
    ///
    /// # Errors
    /// - `AlreadyInstalled` on a second call
    /// - `InvalidParameter` if `gross_head < 0`
    /// - `ConduitAlreadyConnected` if `conduit` already feeds a turbine
    pub fn install(&mut self, gross_head: f64, mut conduit: Conduit) -> Result<()> {
        if self.installation.is_some() {
            return Err(DispatchError::AlreadyInstalled { turbine: self.id });
        }
        if gross_head.is_nan() || gross_head < 0.0 {
            return Err(DispatchError::invalid(
                "gross head",
                format!("must be non-negative, got {gross_head}"),
            ));
        }
        conduit.connect_turbine(self.id)?;
        tracing::trace!(turbine = self.id, gross_head, "Turbine installed");
        self.installation = Some(Installation {
            gross_head,
            conduit,
        });
        Ok(())
    }

    pub fn is_installed(&self) -> bool {
        self.installation.is_some()
    }

    pub fn gross_head(&self) -> Option<f64> {
        self.installation.as_ref().map(|i| i.gross_head)
    }

    pub fn conduit(&self) -> Option<&Conduit> {
        self.installation.as_ref().map(|i| &i.conduit)
    }

    /// Turns the unit on.
    ///
    /// # Errors
    /// `NotInstalled` if no conduit is connected.
    pub fn turn_on(&mut self) -> Result<()> {
        if !self.is_installed() {
            return Err(DispatchError::NotInstalled { turbine: self.id });
        }
        self.running = true;
        Ok(())
    }

    pub fn turn_off(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Net head [m]: gross head minus the conduit loss at `discharge`.
    pub fn net_head(&self, discharge: Discharge) -> Result<f64> {
        let installation = self
            .installation
            .as_ref()
            .ok_or(DispatchError::NotInstalled { turbine: self.id })?;
        Ok(installation.gross_head - installation.conduit.total_loss(discharge))
    }

    /// Efficiency polynomial evaluated at the flow's net head and rate.
    pub fn efficiency(&self, flow: &Flow) -> Result<f64> {
        let discharge = flow.discharge()?;
        let head = self.net_head(discharge)?;
        Ok(self.efficiency_at(head, discharge.rate))
    }

    /// Power output `k · η · H · Q` for a flow.
    pub fn power(&self, flow: &Flow) -> Result<f64> {
        let discharge = flow.discharge()?;
        let head = self.net_head(discharge)?;
        let q = discharge.rate;
        Ok(POWER_CONSTANT * self.efficiency_at(head, q) * head * q)
    }

    fn efficiency_at(&self, h: f64, q: f64) -> f64 {
        let c = &self.coefficients;
        c[0] + c[1] * h + c[2] * q + c[3] * h * q + c[4] * h.powi(2) + c[5] * q.powi(2)
    }
}

fn checked_limits(parameter: &'static str, min: f64, max: f64) -> Result<Limits> {
    if !min.is_finite() || !max.is_finite() {
        return Err(DispatchError::invalid(
            parameter,
            format!("limits must be finite, got [{min}, {max}]"),
        ));
    }
    if min <= 0.0 {
        return Err(DispatchError::invalid(
            parameter,
            format!("minimum must be positive, got {min}"),
        ));
    }
    if max < 0.0 {
        return Err(DispatchError::invalid(
            parameter,
            format!("maximum must be non-negative, got {max}"),
        ));
    }
    if max < min {
        return Err(DispatchError::invalid(
            parameter,
            format!("maximum {max} is below minimum {min}"),
        ));
    }
    Ok(Limits { min, max })
}
