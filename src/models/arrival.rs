//! Per-tick vehicle arrival probabilities for a single idle charge point.

use rand::{Rng, rngs::StdRng};

use crate::sim::calendar::{TICKS_PER_DAY, TICK_MINUTES};

/// Hourly arrival probability for one idle charge point during one tick.
///
/// Every tick within an hour shares the hour's value. Traffic is quiet
/// overnight, picks up through the morning and peaks in the late afternoon.
pub const DEFAULT_HOURLY_ARRIVAL_PROBABILITIES: [f64; 24] = [
    0.0094, 0.0094, 0.0094, 0.0094, 0.0094, 0.0094, 0.0094, 0.0094, // 00-08
    0.0283, 0.0283, 0.0566, 0.0566, 0.0566, 0.0755, 0.0755, 0.0755, // 08-16
    0.1038, 0.1038, 0.1038, 0.0472, 0.0472, 0.0472, 0.0094, 0.0094, // 16-24
];

/// Arrival model backed by a fixed tick-of-day probability table.
#[derive(Debug, Clone)]
pub struct ArrivalModel {
    base: [f64; TICKS_PER_DAY],
}

impl ArrivalModel {
    /// Creates an arrival model from a full tick-of-day table.
    ///
    /// # Panics
    ///
    /// Panics if any entry is outside `[0.0, 1.0]` or not finite.
    pub fn new(base: [f64; TICKS_PER_DAY]) -> Self {
        for (tick_of_day, p) in base.iter().enumerate() {
            assert!(
                (0.0..=1.0).contains(p),
                "arrival probability {p} at tick-of-day {tick_of_day} outside [0, 1]"
            );
        }
        Self { base }
    }

    /// Expands an hourly table to tick resolution.
    pub fn from_hourly(hourly: [f64; 24]) -> Self {
        let ticks_per_hour = 60 / TICK_MINUTES;
        Self::new(std::array::from_fn(|s| hourly[s / ticks_per_hour]))
    }

    /// Uses the same probability for every tick of the day.
    pub fn constant(probability: f64) -> Self {
        Self::new([probability; TICKS_PER_DAY])
    }

    /// Unscaled probability for the given tick-of-day.
    pub fn base_probability(&self, tick_of_day: usize) -> f64 {
        self.base[tick_of_day]
    }

    /// Probability after applying the station's multiplier, clamped to 1.
    ///
    /// # Panics
    ///
    /// Panics if the scaled probability falls outside `[0.0, 1.0]`, which
    /// only happens for a negative or non-finite multiplier.
    pub fn effective_probability(&self, tick_of_day: usize, multiplier: f64) -> f64 {
        let p = (self.base[tick_of_day] * multiplier).min(1.0);
        assert!(
            (0.0..=1.0).contains(&p),
            "effective arrival probability {p} outside [0, 1] (multiplier {multiplier})"
        );
        p
    }

    /// Draws once from `rng` and reports whether a vehicle arrives.
    pub fn arrives(&self, rng: &mut StdRng, tick_of_day: usize, multiplier: f64) -> bool {
        let p = self.effective_probability(tick_of_day, multiplier);
        rng.random::<f64>() < p
    }

    /// Expected arrivals per idle point over one full day.
    pub fn expected_daily_arrivals(&self, multiplier: f64) -> f64 {
        (0..TICKS_PER_DAY)
            .map(|s| self.effective_probability(s, multiplier))
            .sum()
    }
}

impl Default for ArrivalModel {
    fn default() -> Self {
        Self::from_hourly(DEFAULT_HOURLY_ARRIVAL_PROBABILITIES)
    }
}
