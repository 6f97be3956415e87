//! Penstock feeding a single turbine.

use super::segment::{Discharge, PipeSegment};
use crate::error::{DispatchError, Result};

/// Ordered chain of pipe segments feeding exactly one turbine.
///
/// The turbine binding is set once, when the turbine is installed, and
/// never changes afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Conduit {
    segments: Vec<PipeSegment>,
    turbine: Option<usize>,
}

impl Conduit {
    /// Creates an unconnected conduit from its segments, upstream first.
    pub fn new(segments: Vec<PipeSegment>) -> Self {
        Self {
            segments,
            turbine: None,
        }
    }

    /// Appends a segment downstream of the existing ones.
    pub fn push(&mut self, segment: PipeSegment) {
        self.segments.push(segment);
    }

    pub fn segments(&self) -> &[PipeSegment] {
        &self.segments
    }

    /// Id of the turbine this conduit feeds, if connected.
    pub fn turbine(&self) -> Option<usize> {
        self.turbine
    }

    pub fn is_connected(&self) -> bool {
        self.turbine.is_some()
    }

    /// Binds this conduit to a turbine.
    ///
    /// # Errors
    /// [`DispatchError::ConduitAlreadyConnected`] if a turbine is already bound.
    pub fn connect_turbine(&mut self, turbine: usize) -> Result<()> {
        if let Some(existing) = self.turbine {
            return Err(DispatchError::ConduitAlreadyConnected { turbine: existing });
        }
        self.turbine = Some(turbine);
        Ok(())
    }

    /// Total head loss [m]: the sum of every segment's loss at `discharge`.
    pub fn total_loss(&self, discharge: Discharge) -> f64 {
        self.segments.iter().map(|s| s.loss(discharge)).sum()
    }
}
