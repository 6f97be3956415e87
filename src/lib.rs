//! Hydroelectric dispatch model and evolutionary search operators.
//!
//! Models a plant's penstock network and turbines, and scores candidate
//! flow distributions by energy efficiency against a power demand:
//!
//! - **Hydraulics**: head loss of straight pipes (friction) and curved
//!   connectors (tabulated bend factors), summed along each conduit.
//! - **Plant**: turbine efficiency polynomial and power output on the net
//!   head, bounded per-turbine flows, and the plant fitness
//!   `power / flow`, penalized ×0.9 when power misses the target by more
//!   than 0.1%.
//! - **Search**: random/template generation, whole-arithmetic
//!   recombination and tournament/elitist selection for an external
//!   evolutionary engine.
//!
//! # Example
//!
//! ```
//! use hydro_dispatch::plant::PlantSpec;
//! use hydro_dispatch::search::{Generator, SearchConfig, SearchOperators};
//!
//! let mut plant = PlantSpec::tres_marias().build()?;
//! let config = SearchConfig::default().with_target_demand(320.0).with_seed(42);
//! let ops = SearchOperators::prepare(&mut plant, &config)?;
//!
//! let mut rng = config.rng();
//! let candidate = ops.generator.random(&mut rng);
//! let fitness = plant.fitness(&candidate)?;
//! assert!(fitness > 0.0);
//! # Ok::<(), hydro_dispatch::DispatchError>(())
//! ```
//!
//! # Architecture
//!
//! The crate holds no evolutionary loop of its own. Termination, mutation
//! strategies and experiment repetition belong to the engine that calls
//! into [`search`] and [`plant::Plant::fitness`].

pub mod error;
pub mod hydraulics;
pub mod plant;
pub mod random;
pub mod search;

pub use error::{DispatchError, ErrorKind, Result};
