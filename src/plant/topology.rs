//! Declarative plant topology and its assembly into a [`Plant`].
//!
//! A [`PlantSpec`] lists one [`UnitSpec`] per turbine: its parameters, the
//! penstock feeding it, its gross head and whether it starts running.
//! [`PlantSpec::build`] validates every value, installs each turbine on its
//! conduit and freezes the result.

use super::source::{TurbineParams, TurbineSource};
use super::station::Plant;
use super::turbine::Turbine;
use crate::error::{DispatchError, Result};
use crate::hydraulics::{BendShape, Conduit, PipeSegment};

/// Declarative form of a [`PipeSegment`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum SegmentSpec {
    Straight {
        length: f64,
        diameter: f64,
        roughness: f64,
    },
    Bend {
        shape: BendShape,
        diameter: f64,
        angle: f64,
    },
}

impl SegmentSpec {
    pub fn build(&self) -> Result<PipeSegment> {
        match *self {
            SegmentSpec::Straight {
                length,
                diameter,
                roughness,
            } => PipeSegment::straight(length, diameter, roughness),
            SegmentSpec::Bend {
                shape: BendShape::Polygonal,
                diameter,
                angle,
            } => PipeSegment::polygonal_bend(diameter, angle),
            SegmentSpec::Bend {
                shape: BendShape::Smooth,
                diameter,
                angle,
            } => PipeSegment::smooth_bend(diameter, angle),
        }
    }
}

/// One turbine and the penstock feeding it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitSpec {
    pub turbine: TurbineParams,
    pub penstock: Vec<SegmentSpec>,
    pub gross_head: f64,
    pub running: bool,
}

/// Complete plant description.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlantSpec {
    pub units: Vec<UnitSpec>,
}

impl PlantSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a unit.
    pub fn with_unit(mut self, unit: UnitSpec) -> Self {
        self.units.push(unit);
        self
    }

    /// Pairs turbine parameters from a source with one penstock each.
    ///
    /// Every unit gets the same gross head and starts running.
    ///
    /// # Errors
    /// Propagates source errors; `InvalidParameter` if the number of
    /// penstocks differs from the number of turbines.
    pub fn from_source(
        source: &impl TurbineSource,
        penstocks: Vec<Vec<SegmentSpec>>,
        gross_head: f64,
    ) -> Result<Self> {
        let params = source.load()?;
        if params.len() != penstocks.len() {
            return Err(DispatchError::invalid(
                "penstocks",
                format!("{} penstocks for {} turbines", penstocks.len(), params.len()),
            ));
        }
        let units = params
            .into_iter()
            .zip(penstocks)
            .map(|(turbine, penstock)| UnitSpec {
                turbine,
                penstock,
                gross_head,
                running: true,
            })
            .collect();
        Ok(Self { units })
    }

    /// The Três Marias plant: six identical units under 54 m of gross head.
    pub fn tres_marias() -> Self {
        let turbine = TurbineParams {
            min_power: 35.0,
            max_power: 66.0,
            min_flow: 70.0,
            max_flow: 140.0,
            coefficients: [0.1463, 0.018076, 0.0050502, -3.5254e-05, -0.00012337, -1.4507e-05],
        };
        // (first bend, middle length, second bend) per penstock
        let layouts = [
            (28.0, 91.6, 30.0),
            (22.0, 86.26, 21.0),
            (16.0, 82.54, 12.0),
            (4.0, 80.58, 3.0),
            (4.0, 80.58, 3.0),
            (16.0, 82.54, 12.0),
        ];
        let units = layouts
            .iter()
            .map(|&(first, middle, second)| UnitSpec {
                turbine: turbine.clone(),
                penstock: vec![
                    straight(160.0, 6.6),
                    polygonal(6.6, first),
                    straight(middle, 6.6),
                    polygonal(6.6, second),
                    straight(13.4, 6.2),
                ],
                gross_head: 54.0,
                running: true,
            })
            .collect();
        Self { units }
    }

    /// Builds, installs and freezes every unit.
    pub fn build(&self) -> Result<Plant> {
        let mut turbines = Vec::with_capacity(self.units.len());
        for (id, unit) in self.units.iter().enumerate() {
            let segments = unit
                .penstock
                .iter()
                .map(SegmentSpec::build)
                .collect::<Result<Vec<_>>>()?;
            let mut turbine = Turbine::new(id, &unit.turbine)?;
            turbine.install(unit.gross_head, Conduit::new(segments))?;
            if unit.running {
                turbine.turn_on()?;
            }
            turbines.push(turbine);
        }
        tracing::debug!(turbines = turbines.len(), "Plant assembled");
        Plant::new(turbines)
    }
}

const PENSTOCK_ROUGHNESS: f64 = 0.2;

fn straight(length: f64, diameter: f64) -> SegmentSpec {
    SegmentSpec::Straight {
        length,
        diameter,
        roughness: PENSTOCK_ROUGHNESS,
    }
}

fn polygonal(diameter: f64, angle: f64) -> SegmentSpec {
    SegmentSpec::Bend {
        shape: BendShape::Polygonal,
        diameter,
        angle,
    }
}
