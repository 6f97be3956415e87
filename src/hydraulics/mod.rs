//! Penstock hydraulics.
//!
//! Head loss of the pipe network between the reservoir and each turbine.
//!
//! # Key Types
//!
//! - [`PipeSegment`]: straight pipe or curved connector, with cached
//!   flow-independent loss terms
//! - [`Conduit`]: ordered chain of segments feeding one turbine
//! - [`Discharge`]: flow rate plus Reynolds number, the input of every loss
//!
//! Bend losses come from a fixed angle table ([`bend_table`]); angles
//! missing from the table are rejected when the connector is built.

pub mod bend_table;
mod conduit;
mod segment;

pub use conduit::Conduit;
pub use segment::{
    Bend, BendShape, Discharge, PipeSegment, StraightPipe, GRAVITY, STANDARD_REYNOLDS,
};
