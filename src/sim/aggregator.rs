//! Reduction of per-tick samples into the yearly result.

use super::calendar::{DAYS_PER_YEAR, TICK_HOURS, TICKS_PER_DAY, TICKS_PER_YEAR};
use super::events::EventCounts;
use super::types::{SimulationResult, StationConfig, TickSample};

/// Running accumulators fed one [`TickSample`] at a time.
///
/// Samples are folded in as they arrive and never stored, so memory use is
/// independent of the number of ticks.
#[derive(Debug, Clone)]
pub struct Aggregator {
    total_energy_kwh: f64,
    peak_station_kw: f64,
    tick_of_day_kw_sum: Vec<f64>,
    point_power_sum_kw: Vec<f64>,
    point_active_ticks: Vec<u64>,
    ticks_recorded: usize,
}

impl Aggregator {
    /// Creates empty accumulators for a station of `charge_point_count` points.
    pub fn new(charge_point_count: usize) -> Self {
        Self {
            total_energy_kwh: 0.0,
            peak_station_kw: 0.0,
            tick_of_day_kw_sum: vec![0.0; TICKS_PER_DAY],
            point_power_sum_kw: vec![0.0; charge_point_count],
            point_active_ticks: vec![0; charge_point_count],
            ticks_recorded: 0,
        }
    }

    /// Folds one tick into the accumulators.
    ///
    /// # Panics
    ///
    /// Panics if the sample does not carry one power value per charge point.
    pub fn record(&mut self, sample: &TickSample) {
        assert_eq!(
            sample.power_kw.len(),
            self.point_power_sum_kw.len(),
            "tick {} sampled {} charge points, expected {}",
            sample.time.tick,
            sample.power_kw.len(),
            self.point_power_sum_kw.len()
        );

        let station_kw = sample.station_kw();
        self.total_energy_kwh += station_kw * TICK_HOURS;
        self.peak_station_kw = self.peak_station_kw.max(station_kw);
        self.tick_of_day_kw_sum[sample.time.tick_of_day] += station_kw;

        for (i, &kw) in sample.power_kw.iter().enumerate() {
            if kw > 0.0 {
                self.point_power_sum_kw[i] += kw;
                self.point_active_ticks[i] += 1;
            }
        }
        self.ticks_recorded += 1;
    }

    /// Energy delivered so far (kWh).
    pub fn total_energy_kwh(&self) -> f64 {
        self.total_energy_kwh
    }

    pub fn ticks_recorded(&self) -> usize {
        self.ticks_recorded
    }

    /// Produces the final result.
    ///
    /// # Arguments
    ///
    /// * `config` - Station the samples came from
    /// * `events` - Session counters kept by the tick driver
    pub fn finish(self, config: &StationConfig, events: EventCounts) -> SimulationResult {
        let theoretical_kw = config.theoretical_max_power_demand_kw();
        let concurrency_factor = if theoretical_kw > 0.0 {
            self.peak_station_kw / theoretical_kw
        } else {
            0.0
        };

        let exemplary_day = self
            .tick_of_day_kw_sum
            .iter()
            .map(|sum| sum / DAYS_PER_YEAR as f64)
            .collect();

        let utilization_rates = self
            .point_active_ticks
            .iter()
            .map(|&n| n as f64 / TICKS_PER_YEAR as f64)
            .collect();

        let average_powers = self
            .point_power_sum_kw
            .iter()
            .zip(&self.point_active_ticks)
            .map(|(&sum, &n)| if n > 0 { sum / n as f64 } else { 0.0 })
            .collect();

        let (events_per_year, events_per_month, events_per_week, events_per_day) =
            events.into_parts();

        SimulationResult {
            total_energy_charged_kwh: self.total_energy_kwh,
            actual_max_power_demand_kw: self.peak_station_kw,
            theoretical_max_power_demand_kw: theoretical_kw,
            concurrency_factor,
            exemplary_day,
            utilization_rates,
            average_powers,
            events_per_year,
            events_per_month,
            events_per_week,
            events_per_day,
        }
    }
}
