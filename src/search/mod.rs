//! Evolutionary search operators for flow distributions.
//!
//! The evolutionary engine itself (population bookkeeping, iteration and
//! termination, mutation strategies) lives outside this crate. It drives
//! the operators here through a small set of traits:
//!
//! - [`Generator`]: random and template distributions ([`FlowGenerator`])
//! - [`Recombiner`]: whole-arithmetic blending ([`ArithmeticRecombination`])
//! - [`Selector`]: tournament parents, elitist survivors
//!   ([`TournamentSelection`])
//! - [`Environment`]: fitness, implemented by [`Plant`](crate::plant::Plant)
//!
//! Every operator preserves the flow-limit invariant: no distribution it
//! produces holds a flow outside its turbine's limits.
//!
//! # References
//!
//! - Eiben & Smith (2015), *Introduction to Evolutionary Computing*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*

mod config;
mod generator;
mod operators;
pub mod recombination;
mod selection;
mod types;

pub use config::SearchConfig;
pub use generator::FlowGenerator;
pub use operators::SearchOperators;
pub use recombination::ArithmeticRecombination;
pub use selection::TournamentSelection;
pub use types::{Environment, Fitness, Generator, Individual, Recombiner, Selector};
