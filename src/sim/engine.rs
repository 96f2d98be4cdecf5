//! Simulation engine: drives every charge point through the simulated year.

use rand::{SeedableRng, rngs::StdRng};
use tracing::{debug, info, trace};

use crate::models::{ArrivalModel, DemandModel};
use crate::station::ChargePoint;

use super::aggregator::Aggregator;
use super::calendar::{TICK_HOURS, TICKS_PER_DAY, TICKS_PER_YEAR, TickTime};
use super::clock::Clock;
use super::events::EventCounts;
use super::types::{SimulationResult, StationConfig, TickSample};

/// Simulation engine owning the charge points, models, and random stream of one run.
///
/// Nothing is shared between engines, so independent runs may execute on
/// separate threads without coordination.
pub struct Engine {
    config: StationConfig,
    arrivals: ArrivalModel,
    demand: DemandModel,
    charge_points: Vec<ChargePoint>,
    clock: Clock,
    rng: StdRng,
    seed: u64,
    events: EventCounts,
    aggregator: Aggregator,
}

impl Engine {
    /// Creates an engine with the default arrival and demand tables.
    ///
    /// # Arguments
    ///
    /// * `config` - Validated station configuration
    /// * `seed` - Seed for the run's random stream
    pub fn new(config: StationConfig, seed: u64) -> Self {
        Self::with_models(config, ArrivalModel::default(), DemandModel::default(), seed)
    }

    /// Creates an engine with explicit arrival and demand models.
    pub fn with_models(
        config: StationConfig,
        arrivals: ArrivalModel,
        demand: DemandModel,
        seed: u64,
    ) -> Self {
        let n = config.charge_point_count();
        Self {
            config,
            arrivals,
            demand,
            charge_points: (0..n).map(ChargePoint::new).collect(),
            clock: Clock::new(TICKS_PER_YEAR),
            rng: StdRng::seed_from_u64(seed),
            seed,
            events: EventCounts::new(),
            aggregator: Aggregator::new(n),
        }
    }

    /// Executes the next tick and returns its sample.
    ///
    /// Idle points draw once for an arrival and, on arrival, once for the
    /// demand; a point that starts a session charges in the same tick.
    ///
    /// # Returns
    ///
    /// `None` once the whole year has been simulated.
    pub fn step(&mut self) -> Option<TickSample> {
        let time = TickTime::from_tick(self.clock.tick()?);
        let multiplier = self.config.arrival_probability_multiplier();
        let consumption = self.config.ev_consumption_kwh_per_100km();
        let max_kw = self.config.charging_power_per_point_kw();

        let mut power_kw = Vec::with_capacity(self.charge_points.len());
        let mut sessions_started = 0;

        for cp in &mut self.charge_points {
            if cp.is_idle() && self.arrivals.arrives(&mut self.rng, time.tick_of_day, multiplier) {
                let need_kwh = self.demand.sample_energy_kwh(&mut self.rng, consumption);
                if cp.start_session(need_kwh) {
                    self.events.record_session_start(&time);
                    sessions_started += 1;
                    trace!(
                        tick = time.tick,
                        charge_point = cp.id(),
                        need_kwh,
                        "session started"
                    );
                }
            }
            power_kw.push(cp.advance(max_kw, TICK_HOURS));
        }

        let sample = TickSample {
            time,
            power_kw,
            sessions_started,
        };
        self.aggregator.record(&sample);

        if time.tick_of_day == TICKS_PER_DAY - 1 {
            debug!(
                day = time.day,
                sessions = self.events.per_day()[time.day],
                energy_kwh = self.aggregator.total_energy_kwh(),
                "day complete"
            );
        }

        Some(sample)
    }

    /// Executes every remaining tick and returns the yearly result.
    pub fn run(mut self) -> SimulationResult {
        info!(
            charge_points = self.config.charge_point_count(),
            multiplier = self.config.arrival_probability_multiplier(),
            consumption_kwh_per_100km = self.config.ev_consumption_kwh_per_100km(),
            power_kw = self.config.charging_power_per_point_kw(),
            seed = self.seed,
            "starting simulation"
        );
        while self.step().is_some() {}
        self.finish()
    }

    /// Reduces the ticks executed so far into a result.
    pub fn finish(self) -> SimulationResult {
        let ticks = self.aggregator.ticks_recorded();
        let result = self.aggregator.finish(&self.config, self.events);
        info!(
            ticks,
            total_energy_kwh = result.total_energy_charged_kwh,
            events = result.events_per_year,
            peak_kw = result.actual_max_power_demand_kw,
            concurrency_factor = result.concurrency_factor,
            "simulation finished"
        );
        result
    }

    /// Returns the charge points in id order.
    pub fn charge_points(&self) -> &[ChargePoint] {
        &self.charge_points
    }

    /// Returns a reference to the station configuration.
    pub fn config(&self) -> &StationConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Session counters accumulated so far.
    pub fn events(&self) -> &EventCounts {
        &self.events
    }

    /// Ticks executed so far.
    pub fn elapsed_ticks(&self) -> usize {
        self.clock.elapsed()
    }
}

/// Simulates one year of `config` with the default models.
///
/// # Examples
///
/// ```
/// use evcs_sim::sim::engine::simulate;
/// use evcs_sim::sim::types::StationConfig;
///
/// let config = StationConfig::with_defaults(2).unwrap();
/// let result = simulate(config, 42);
/// assert_eq!(result.exemplary_day.len(), 96);
/// assert_eq!(result.utilization_rates.len(), 2);
/// ```
pub fn simulate(config: StationConfig, seed: u64) -> SimulationResult {
    Engine::new(config, seed).run()
}

/// Simulates one year with a seed drawn from the operating system.
///
/// # Returns
///
/// `(seed, result)`; rerunning [`simulate`] with the returned seed
/// reproduces the result.
pub fn simulate_with_entropy(config: StationConfig) -> (u64, SimulationResult) {
    let seed = rand::random::<u64>();
    (seed, simulate(config, seed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::station::ChargePointState;

    fn station(points: usize, multiplier: f64) -> StationConfig {
        StationConfig::new(points, multiplier, 18.0, 11.0).unwrap_or_else(|e| panic!("{e}"))
    }

    #[test]
    fn step_yields_every_tick_once() {
        let mut engine = Engine::new(station(2, 1.0), 7);
        let mut n = 0;
        while let Some(s) = engine.step() {
            assert_eq!(s.time.tick, n);
            assert_eq!(s.power_kw.len(), 2);
            n += 1;
        }
        assert_eq!(n, TICKS_PER_YEAR);
        assert_eq!(engine.elapsed_ticks(), TICKS_PER_YEAR);
        assert!(engine.step().is_none());
    }

    #[test]
    fn no_arrivals_means_no_energy() {
        let engine = Engine::with_models(
            station(3, 1.0),
            ArrivalModel::constant(0.0),
            DemandModel::default(),
            1,
        );
        let r = engine.run();
        assert_eq!(r.events_per_year, 0);
        assert_eq!(r.total_energy_charged_kwh, 0.0);
        assert_eq!(r.actual_max_power_demand_kw, 0.0);
        assert_eq!(r.concurrency_factor, 0.0);
    }

    #[test]
    fn zero_demand_arrivals_never_occupy_points() {
        let engine = Engine::with_models(
            station(2, 1.0),
            ArrivalModel::constant(1.0),
            DemandModel::fixed(0.0),
            1,
        );
        let r = engine.run();
        assert_eq!(r.events_per_year, 0);
        assert_eq!(r.utilization_rates, vec![0.0, 0.0]);
    }

    #[test]
    fn session_charges_in_its_arrival_tick() {
        let mut engine = Engine::with_models(
            station(1, 1.0),
            ArrivalModel::constant(1.0),
            DemandModel::fixed(10.0), // 1.8 kWh -> 7.2 kW for one tick
            3,
        );
        let first = engine.step();
        assert_eq!(first.as_ref().map(|s| s.sessions_started), Some(1));
        let kw = first.map(|s| s.power_kw[0]).unwrap_or_default();
        assert!((kw - 7.2).abs() < 1e-9);
        assert_eq!(engine.charge_points()[0].state(), ChargePointState::Idle);
    }

    #[test]
    fn long_session_blocks_new_arrivals() {
        let mut engine = Engine::with_models(
            station(1, 1.0),
            ArrivalModel::constant(1.0),
            DemandModel::fixed(100.0), // 18 kWh -> 7 ticks at 11 kW
            3,
        );
        let started: u32 = (0..7)
            .filter_map(|_| engine.step())
            .map(|s| s.sessions_started)
            .sum();
        assert_eq!(started, 1);
        assert_eq!(engine.step().map(|s| s.sessions_started), Some(1));
    }

    #[test]
    fn charge_point_counters_match_result() {
        let mut engine = Engine::new(station(4, 1.5), 99);
        while engine.step().is_some() {}
        let ticks: Vec<u64> = engine
            .charge_points()
            .iter()
            .map(ChargePoint::ticks_charging)
            .collect();
        let sessions: u64 = engine
            .charge_points()
            .iter()
            .map(ChargePoint::sessions_started)
            .sum();

        let r = engine.finish();
        for (rate, n) in r.utilization_rates.iter().zip(&ticks) {
            assert_eq!(*rate, *n as f64 / TICKS_PER_YEAR as f64);
        }
        assert_eq!(u64::from(r.events_per_year), sessions);
    }

    #[test]
    fn entropy_seed_reproduces() {
        let cfg = station(1, 1.0);
        let (seed, r1) = simulate_with_entropy(cfg);
        assert_eq!(simulate(cfg, seed), r1);
    }
}
