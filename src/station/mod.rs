//! Charging station hardware state.

/// Per-socket occupancy state machine.
pub mod charge_point;

pub use charge_point::{ChargePoint, ChargePointState};
