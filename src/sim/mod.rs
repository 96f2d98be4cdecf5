/// Running reduction of tick samples into the yearly result.
pub mod aggregator;
/// Tick constants and calendar lookups.
pub mod calendar;
/// Simulation clock for tick management.
pub mod clock;
pub mod engine;
/// Session counters per year, month, week and day.
pub mod events;
pub mod types;
