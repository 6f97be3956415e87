//! Error taxonomy for the dispatch model.
//!
//! Every failure is fatal to the caller: nothing here is retried. The
//! [`ErrorKind`] grouping lets an outer driver decide how to report a
//! failure without matching every variant.

use std::path::PathBuf;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, DispatchError>;

/// Broad category of a [`DispatchError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Invalid physical parameter supplied at construction.
    Configuration,
    /// Operation called in the wrong lifecycle order.
    State,
    /// Flow value outside a turbine's limits.
    Bounds,
    /// Bend angle missing from the loss-factor table.
    Lookup,
    /// Turbine-parameter source could not be read or parsed.
    Source,
}

/// Errors raised by the hydraulic model, the plant and the search operators.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// A construction parameter violates a physical constraint.
    #[error("invalid {parameter}: {detail}")]
    InvalidParameter {
        parameter: &'static str,
        detail: String,
    },

    /// The turbine already has a gross head and a conduit.
    #[error("turbine {turbine} is already installed")]
    AlreadyInstalled { turbine: usize },

    /// The conduit already feeds a turbine.
    #[error("conduit already feeds turbine {turbine}")]
    ConduitAlreadyConnected { turbine: usize },

    /// The turbine has no conduit, so it cannot run or be evaluated.
    #[error("turbine {turbine} is not installed")]
    NotInstalled { turbine: usize },

    /// Fitness was requested before a target demand was set.
    #[error("no target demand has been set")]
    TargetNotSet,

    /// A template locus was evaluated before receiving a flow value.
    #[error("flow for turbine {turbine} has no value")]
    FlowUnset { turbine: usize },

    /// A distribution does not line up with the plant's turbines.
    #[error("distribution does not match plant: {detail}")]
    DistributionMismatch { detail: String },

    /// A flow value lies outside the bound turbine's limits.
    #[error("flow {value} outside [{min}, {max}] for turbine {turbine}")]
    OutOfBounds {
        turbine: usize,
        value: f64,
        min: f64,
        max: f64,
    },

    /// The bend angle is not a key of the loss-factor table.
    #[error("bend angle {angle} is not defined in the loss-factor table")]
    AngleNotInTable { angle: f64 },

    /// A parameter file is malformed.
    #[error("malformed turbine parameters in {file}: {detail}")]
    Source { file: PathBuf, detail: String },

    /// A parameter file could not be read.
    #[error("cannot read {file}: {source}")]
    Io {
        file: PathBuf,
        source: std::io::Error,
    },
}

impl DispatchError {
    /// Returns the taxonomy group of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            DispatchError::InvalidParameter { .. } => ErrorKind::Configuration,
            DispatchError::AlreadyInstalled { .. }
            | DispatchError::ConduitAlreadyConnected { .. }
            | DispatchError::NotInstalled { .. }
            | DispatchError::TargetNotSet
            | DispatchError::FlowUnset { .. }
            | DispatchError::DistributionMismatch { .. } => ErrorKind::State,
            DispatchError::OutOfBounds { .. } => ErrorKind::Bounds,
            DispatchError::AngleNotInTable { .. } => ErrorKind::Lookup,
            DispatchError::Source { .. } | DispatchError::Io { .. } => ErrorKind::Source,
        }
    }

    pub(crate) fn invalid(parameter: &'static str, detail: impl Into<String>) -> Self {
        DispatchError::InvalidParameter {
            parameter,
            detail: detail.into(),
        }
    }
}
