//! Stochastic inputs of the simulation: who arrives, and how much they need.

/// Tick-of-day arrival probabilities.
pub mod arrival;
/// Discrete distance-based charging demand.
pub mod demand;

pub use arrival::ArrivalModel;
pub use demand::{DemandBucket, DemandModel};
