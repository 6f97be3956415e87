//! Plant model: turbines, flows, distributions and fitness.
//!
//! # Key Types
//!
//! - [`Turbine`]: operating limits, efficiency polynomial, one-time
//!   installation on a conduit
//! - [`Flow`]: flow value bounded by one turbine's limits
//! - [`Distribution`]: one flow per turbine; the candidate solution
//! - [`Plant`]: frozen set of installed turbines plus a target demand;
//!   scores distributions
//! - [`PlantSpec`]: declarative topology, built into a [`Plant`]
//!
//! Turbine parameters can come from any [`TurbineSource`], including the
//! legacy semicolon files read by [`CsvTurbineSource`].

mod distribution;
mod flow;
mod source;
mod station;
mod topology;
mod turbine;

pub use distribution::{Distribution, UnitOutput};
pub use flow::Flow;
pub use source::{CsvTurbineSource, TurbineParams, TurbineSource, COEFFICIENT_COUNT};
pub use station::{Plant, DEMAND_PENALTY, DEMAND_TOLERANCE};
pub use topology::{PlantSpec, SegmentSpec, UnitSpec};
pub use turbine::{Limits, Turbine, POWER_CONSTANT};
