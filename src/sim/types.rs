//! Core simulation types: station configuration, per-tick samples, and the run result.

use std::fmt;

use serde::Serialize;

use super::calendar::TickTime;
use crate::config::ConfigError;

/// Lowest accepted arrival probability multiplier.
pub const MIN_ARRIVAL_MULTIPLIER: f64 = 0.2;
/// Highest accepted arrival probability multiplier.
pub const MAX_ARRIVAL_MULTIPLIER: f64 = 2.0;
/// Multiplier used when none is given.
pub const DEFAULT_ARRIVAL_MULTIPLIER: f64 = 1.0;
/// Vehicle consumption used when none is given (kWh per 100 km).
pub const DEFAULT_EV_CONSUMPTION_KWH_PER_100KM: f64 = 18.0;
/// Per-point charging power used when none is given (kW).
pub const DEFAULT_CHARGING_POWER_KW: f64 = 11.0;

/// Validated, immutable description of one charging station.
///
/// Fields are private: the only way to obtain a `StationConfig` is
/// [`StationConfig::new`], so the engine never sees an invalid one.
///
/// # Examples
///
/// ```
/// use evcs_sim::sim::types::StationConfig;
///
/// let cfg = StationConfig::new(20, 1.0, 18.0, 11.0).unwrap();
/// assert_eq!(cfg.theoretical_max_power_demand_kw(), 220.0);
/// assert!(StationConfig::new(20, 3.0, 18.0, 11.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StationConfig {
    charge_point_count: usize,
    arrival_probability_multiplier: f64,
    ev_consumption_kwh_per_100km: f64,
    charging_power_per_point_kw: f64,
}

impl StationConfig {
    /// Creates a station configuration after checking every field.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint as a `ConfigError`.
    pub fn new(
        charge_point_count: usize,
        arrival_probability_multiplier: f64,
        ev_consumption_kwh_per_100km: f64,
        charging_power_per_point_kw: f64,
    ) -> Result<Self, ConfigError> {
        let violations = Self::violations(
            charge_point_count,
            arrival_probability_multiplier,
            ev_consumption_kwh_per_100km,
            charging_power_per_point_kw,
        );
        if let Some(first) = violations.into_iter().next() {
            return Err(first);
        }
        Ok(Self {
            charge_point_count,
            arrival_probability_multiplier,
            ev_consumption_kwh_per_100km,
            charging_power_per_point_kw,
        })
    }

    /// A station of `charge_point_count` points with default parameters.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if `charge_point_count` is zero.
    pub fn with_defaults(charge_point_count: usize) -> Result<Self, ConfigError> {
        Self::new(
            charge_point_count,
            DEFAULT_ARRIVAL_MULTIPLIER,
            DEFAULT_EV_CONSUMPTION_KWH_PER_100KM,
            DEFAULT_CHARGING_POWER_KW,
        )
    }

    /// Lists every constraint the given values violate.
    ///
    /// Field names are unqualified (e.g. `"charge_point_count"`).
    pub fn violations(
        charge_point_count: usize,
        arrival_probability_multiplier: f64,
        ev_consumption_kwh_per_100km: f64,
        charging_power_per_point_kw: f64,
    ) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if charge_point_count == 0 {
            errors.push(ConfigError::new("charge_point_count", "must be >= 1"));
        }
        if !(MIN_ARRIVAL_MULTIPLIER..=MAX_ARRIVAL_MULTIPLIER)
            .contains(&arrival_probability_multiplier)
        {
            errors.push(ConfigError::new(
                "arrival_probability_multiplier",
                format!(
                    "must be in [{MIN_ARRIVAL_MULTIPLIER}, {MAX_ARRIVAL_MULTIPLIER}], got {arrival_probability_multiplier}"
                ),
            ));
        }
        if !(ev_consumption_kwh_per_100km.is_finite() && ev_consumption_kwh_per_100km > 0.0) {
            errors.push(ConfigError::new(
                "ev_consumption_kwh_per_100km",
                format!("must be a finite value > 0, got {ev_consumption_kwh_per_100km}"),
            ));
        }
        if !(charging_power_per_point_kw.is_finite() && charging_power_per_point_kw > 0.0) {
            errors.push(ConfigError::new(
                "charging_power_per_point_kw",
                format!("must be a finite value > 0, got {charging_power_per_point_kw}"),
            ));
        }

        errors
    }

    pub fn charge_point_count(&self) -> usize {
        self.charge_point_count
    }

    pub fn arrival_probability_multiplier(&self) -> f64 {
        self.arrival_probability_multiplier
    }

    pub fn ev_consumption_kwh_per_100km(&self) -> f64 {
        self.ev_consumption_kwh_per_100km
    }

    pub fn charging_power_per_point_kw(&self) -> f64 {
        self.charging_power_per_point_kw
    }

    /// Station power if every point charged at full rated power at once (kW).
    pub fn theoretical_max_power_demand_kw(&self) -> f64 {
        self.charge_point_count as f64 * self.charging_power_per_point_kw
    }
}

/// Power drawn by every charge point during one tick.
#[derive(Debug, Clone, PartialEq)]
pub struct TickSample {
    /// Calendar position of the tick.
    pub time: TickTime,
    /// Power per charge point (kW), indexed by charge point id.
    pub power_kw: Vec<f64>,
    /// Sessions started during this tick.
    pub sessions_started: u32,
}

impl TickSample {
    /// Summed station power during this tick (kW).
    pub fn station_kw(&self) -> f64 {
        self.power_kw.iter().sum()
    }
}

/// Aggregate outcome of one simulated year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationResult {
    /// Energy delivered across all points (kWh).
    pub total_energy_charged_kwh: f64,
    /// Highest summed station power seen in any tick (kW).
    pub actual_max_power_demand_kw: f64,
    /// `charge_point_count * charging_power_per_point_kw` (kW).
    pub theoretical_max_power_demand_kw: f64,
    /// Actual over theoretical max power demand; 0 if theoretical is 0.
    pub concurrency_factor: f64,
    /// Mean station power per tick-of-day over the year (96 values, kW).
    pub exemplary_day: Vec<f64>,
    /// Share of ticks each point spent charging.
    pub utilization_rates: Vec<f64>,
    /// Mean power of each point over its charging ticks (kW).
    pub average_powers: Vec<f64>,
    /// Charging sessions started during the year.
    pub events_per_year: u32,
    /// Sessions per month (12 values).
    pub events_per_month: Vec<u32>,
    /// Sessions per week (52 values; the last day of the year folds into week 52).
    pub events_per_week: Vec<u32>,
    /// Sessions per day (365 values).
    pub events_per_day: Vec<u32>,
}

impl fmt::Display for SimulationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Simulation Report ---")?;
        writeln!(
            f,
            "Total energy charged:    {:.2} kWh",
            self.total_energy_charged_kwh
        )?;
        writeln!(f, "Charging events:         {} per year", self.events_per_year)?;
        writeln!(
            f,
            "Actual max demand:       {:.2} kW",
            self.actual_max_power_demand_kw
        )?;
        writeln!(
            f,
            "Theoretical max demand:  {:.2} kW",
            self.theoretical_max_power_demand_kw
        )?;
        writeln!(
            f,
            "Concurrency factor:      {:.1}%",
            self.concurrency_factor * 100.0
        )?;
        write!(f, "Charge point  utilization  avg power")?;
        for (i, (u, p)) in self
            .utilization_rates
            .iter()
            .zip(&self.average_powers)
            .enumerate()
        {
            write!(f, "\n{i:>12}  {:>10.1}%  {p:>6.2} kW", u * 100.0)?;
        }
        Ok(())
    }
}
