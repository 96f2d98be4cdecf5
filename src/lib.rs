//! One-year stochastic simulation of EV arrivals and charging sessions at a charging station.

pub mod config;
pub mod io;
/// Arrival and demand models.
pub mod models;
/// Simulation engine, calendar, aggregation, and result types.
pub mod sim;
pub mod station;

pub use sim::engine::{Engine, simulate, simulate_with_entropy};
pub use sim::types::{SimulationResult, StationConfig};
