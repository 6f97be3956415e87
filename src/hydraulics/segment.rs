//! Pipe segments and their head-loss models.
//!
//! A segment loses head through two independent mechanisms:
//!
//! - **Straight** (friction along the length): `f(Re) · Q² · K`, with
//!   `K = (1/A)² / (2g) · (L/D)`.
//! - **Bend** (change of direction at a connector): `k(θ) / (A² · 2g) · Q²`,
//!   where `k(θ)` comes from the fixed bend table.
//!
//! Each segment kind contributes only through its own mechanism; the other
//! component is exactly zero. All flow-independent terms are computed once
//! at construction.

use super::bend_table::{self, MAX_BEND_ANGLE};
use crate::error::{DispatchError, Result};
use std::f64::consts::PI;

/// Gravitational acceleration [m/s²].
pub const GRAVITY: f64 = 9.81;

/// Reynolds number assumed for a flow unless stated otherwise.
pub const STANDARD_REYNOLDS: f64 = 70_000.0;

/// Flow rate together with the flow regime it runs in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Discharge {
    /// Volumetric flow rate [m³/s].
    pub rate: f64,
    /// Reynolds number of the flow.
    pub reynolds: f64,
}

impl Discharge {
    /// A discharge at the standard Reynolds number.
    pub fn standard(rate: f64) -> Self {
        Self {
            rate,
            reynolds: STANDARD_REYNOLDS,
        }
    }
}

/// Shape of a curved connector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BendShape {
    /// Built from straight mitred pieces; the table factor is corrected
    /// by ×1.03 at 15° and above, ×1.02 below.
    Polygonal,
    /// Continuous curve; the table factor applies as is.
    Smooth,
}

impl BendShape {
    fn correction(self, angle: f64) -> f64 {
        match self {
            BendShape::Polygonal if angle >= 15.0 => 1.03,
            BendShape::Polygonal => 1.02,
            BendShape::Smooth => 1.0,
        }
    }
}

/// Straight cylindrical pipe.
#[derive(Debug, Clone, PartialEq)]
pub struct StraightPipe {
    length: f64,
    diameter: f64,
    roughness: f64,
    area: f64,
    relative_roughness: f64,
    loss_constant: f64,
    standard_friction: f64,
}

impl StraightPipe {
    /// Creates a straight pipe.
    ///
    /// `length` and `diameter` in metres, `roughness` is the absolute
    /// wall roughness in metres.
    pub fn new(length: f64, diameter: f64, roughness: f64) -> Result<Self> {
        if length.is_nan() || length <= 0.0 {
            return Err(DispatchError::invalid(
                "length",
                format!("must be positive, got {length}"),
            ));
        }
        check_diameter(diameter)?;
        if roughness.is_nan() || roughness < 0.0 {
            return Err(DispatchError::invalid(
                "roughness",
                format!("must be non-negative, got {roughness}"),
            ));
        }

        let area = section_area(diameter);
        let relative_roughness = roughness / diameter;
        let loss_constant = (1.0 / area).powi(2) / (2.0 * GRAVITY) * (length / diameter);

        let mut pipe = Self {
            length,
            diameter,
            roughness,
            area,
            relative_roughness,
            loss_constant,
            standard_friction: 0.0,
        };
        pipe.standard_friction = pipe.friction_factor(STANDARD_REYNOLDS);
        Ok(pipe)
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn diameter(&self) -> f64 {
        self.diameter
    }

    pub fn roughness(&self) -> f64 {
        self.roughness
    }

    pub fn area(&self) -> f64 {
        self.area
    }

    pub fn relative_roughness(&self) -> f64 {
        self.relative_roughness
    }

    /// Flow-independent part of the friction loss.
    pub fn loss_constant(&self) -> f64 {
        self.loss_constant
    }

    /// Empirical friction factor for the given Reynolds number.
    ///
    /// `f = ((64/Re)⁸ + 9.5 · (ln(ε/(3.7D) + 5.74/Re^0.9) − (2500/Re)⁶)⁻¹⁶)^(1/8)`
    pub fn friction_factor(&self, reynolds: f64) -> f64 {
        let laminar = (64.0 / reynolds).powi(8);
        let b = self.relative_roughness / (3.7 * self.diameter);
        let c = 5.74 / reynolds.powf(0.9);
        let d = 2500.0 / reynolds;
        let turbulent = 9.5 * ((b + c).ln() - d.powi(6)).powi(-16);
        (laminar + turbulent).powf(0.125)
    }

    /// Friction loss [m] for a discharge.
    pub fn loss(&self, discharge: Discharge) -> f64 {
        let friction = if discharge.reynolds == STANDARD_REYNOLDS {
            self.standard_friction
        } else {
            self.friction_factor(discharge.reynolds)
        };
        friction * discharge.rate.powi(2) * self.loss_constant
    }
}

/// Curved cylindrical connector.
#[derive(Debug, Clone, PartialEq)]
pub struct Bend {
    shape: BendShape,
    diameter: f64,
    angle: f64,
    area: f64,
    loss_factor: f64,
    loss_constant: f64,
}

impl Bend {
    /// Creates a bend of the given shape.
    ///
    /// # Errors
    /// - `InvalidParameter` if `diameter <= 0` or `angle` is outside [0°, 45°]
    /// - `AngleNotInTable` if `angle` is not a tabulated angle
    pub fn new(shape: BendShape, diameter: f64, angle: f64) -> Result<Self> {
        check_diameter(diameter)?;
        if !(0.0..=MAX_BEND_ANGLE).contains(&angle) {
            return Err(DispatchError::invalid(
                "bend angle",
                format!("must be within [0, {MAX_BEND_ANGLE}] degrees, got {angle}"),
            ));
        }

        let area = section_area(diameter);
        let loss_factor = bend_table::loss_factor(angle)? * shape.correction(angle);
        let loss_constant = loss_factor / (area.powi(2) * 2.0 * GRAVITY);

        Ok(Self {
            shape,
            diameter,
            angle,
            area,
            loss_factor,
            loss_constant,
        })
    }

    pub fn shape(&self) -> BendShape {
        self.shape
    }

    pub fn diameter(&self) -> f64 {
        self.diameter
    }

    /// Bend angle [degrees].
    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn area(&self) -> f64 {
        self.area
    }

    /// Table factor after the shape correction.
    pub fn loss_factor(&self) -> f64 {
        self.loss_factor
    }

    /// Direction-change loss [m] for a discharge.
    pub fn loss(&self, discharge: Discharge) -> f64 {
        self.loss_constant * discharge.rate.powi(2)
    }
}

/// One element of a penstock.
#[derive(Debug, Clone, PartialEq)]
pub enum PipeSegment {
    Straight(StraightPipe),
    Bend(Bend),
}

impl PipeSegment {
    /// Straight cylindrical pipe.
    pub fn straight(length: f64, diameter: f64, roughness: f64) -> Result<Self> {
        StraightPipe::new(length, diameter, roughness).map(PipeSegment::Straight)
    }

    /// Polygonal (mitred) curved connector.
    pub fn polygonal_bend(diameter: f64, angle: f64) -> Result<Self> {
        Bend::new(BendShape::Polygonal, diameter, angle).map(PipeSegment::Bend)
    }

    /// Smooth curved connector.
    pub fn smooth_bend(diameter: f64, angle: f64) -> Result<Self> {
        Bend::new(BendShape::Smooth, diameter, angle).map(PipeSegment::Bend)
    }

    pub fn diameter(&self) -> f64 {
        match self {
            PipeSegment::Straight(pipe) => pipe.diameter(),
            PipeSegment::Bend(bend) => bend.diameter(),
        }
    }

    /// Friction loss along the segment; zero for bends.
    pub fn straight_loss(&self, discharge: Discharge) -> f64 {
        match self {
            PipeSegment::Straight(pipe) => pipe.loss(discharge),
            PipeSegment::Bend(_) => 0.0,
        }
    }

    /// Direction-change loss; zero for straight pipes.
    pub fn bend_loss(&self, discharge: Discharge) -> f64 {
        match self {
            PipeSegment::Straight(_) => 0.0,
            PipeSegment::Bend(bend) => bend.loss(discharge),
        }
    }

    /// Total head loss [m]: straight and bend components summed.
    pub fn loss(&self, discharge: Discharge) -> f64 {
        self.straight_loss(discharge) + self.bend_loss(discharge)
    }
}

fn check_diameter(diameter: f64) -> Result<()> {
    if diameter > 0.0 {
        Ok(())
    } else {
        Err(DispatchError::invalid(
            "diameter",
            format!("must be positive, got {diameter}"),
        ))
    }
}

/// Section area used by the plant model: `π · D⁴ / 4`.
fn section_area(diameter: f64) -> f64 {
    PI * diameter.powi(4) / 4.0
}
