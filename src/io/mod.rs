/// CSV and JSON export of simulation results.
pub mod export;
