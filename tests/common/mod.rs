//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use evcs_sim::models::{ArrivalModel, DemandModel};
use evcs_sim::sim::engine::Engine;
use evcs_sim::sim::types::StationConfig;

/// Seed shared by tests that do not care about the exact stream.
pub const SEED: u64 = 42;

/// Station with default consumption (18 kWh/100 km) and power (11 kW).
pub fn station(points: usize, multiplier: f64) -> StationConfig {
    StationConfig::new(points, multiplier, 18.0, 11.0)
        .unwrap_or_else(|e| panic!("fixture station should be valid: {e}"))
}

/// Station with explicit consumption and power.
pub fn station_with(points: usize, consumption: f64, power_kw: f64) -> StationConfig {
    StationConfig::new(points, 1.0, consumption, power_kw)
        .unwrap_or_else(|e| panic!("fixture station should be valid: {e}"))
}

/// Engine where every idle point receives a vehicle every tick and
/// every vehicle wants `distance_km`.
pub fn saturated_engine(config: StationConfig, distance_km: f64) -> Engine {
    Engine::with_models(
        config,
        ArrivalModel::constant(1.0),
        DemandModel::fixed(distance_km),
        SEED,
    )
}
