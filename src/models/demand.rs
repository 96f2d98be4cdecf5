//! Charging demand drawn on vehicle arrival.

use rand::{Rng, rngs::StdRng};

/// Tolerance for the bucket probabilities summing to one.
const PROBABILITY_SUM_TOLERANCE: f64 = 1e-9;

/// One outcome of the demand distribution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DemandBucket {
    /// Human-readable bucket name.
    pub label: &'static str,
    /// Distance the vehicle wants to recharge for (km). Zero means no charging needed.
    pub distance_km: f64,
    /// Probability of this bucket.
    pub probability: f64,
}

impl DemandBucket {
    pub const fn new(label: &'static str, distance_km: f64, probability: f64) -> Self {
        Self {
            label,
            distance_km,
            probability,
        }
    }
}

/// Distance-range demand of an arriving vehicle.
pub const DEFAULT_DEMAND_BUCKETS: [DemandBucket; 9] = [
    DemandBucket::new("none", 0.0, 0.3434),
    DemandBucket::new("5 km", 5.0, 0.0490),
    DemandBucket::new("10 km", 10.0, 0.0980),
    DemandBucket::new("20 km", 20.0, 0.1176),
    DemandBucket::new("30 km", 30.0, 0.0882),
    DemandBucket::new("50 km", 50.0, 0.1176),
    DemandBucket::new("100 km", 100.0, 0.1078),
    DemandBucket::new("200 km", 200.0, 0.0490),
    DemandBucket::new("300 km", 300.0, 0.0294),
];

/// Converts a distance into energy for a given vehicle consumption.
pub fn energy_for_distance_kwh(distance_km: f64, consumption_kwh_per_100km: f64) -> f64 {
    distance_km * consumption_kwh_per_100km / 100.0
}

/// Discrete demand distribution sampled once per arrival.
#[derive(Debug, Clone)]
pub struct DemandModel {
    buckets: Vec<DemandBucket>,
}

impl DemandModel {
    /// Creates a demand model from explicit buckets.
    ///
    /// # Panics
    ///
    /// Panics if `buckets` is empty, a distance is negative or non-finite,
    /// a probability is outside `[0.0, 1.0]`, or the probabilities do not
    /// sum to one.
    pub fn new(buckets: Vec<DemandBucket>) -> Self {
        assert!(!buckets.is_empty(), "demand distribution needs at least one bucket");
        for b in &buckets {
            assert!(
                b.distance_km.is_finite() && b.distance_km >= 0.0,
                "demand bucket \"{}\" has invalid distance {}",
                b.label,
                b.distance_km
            );
            assert!(
                (0.0..=1.0).contains(&b.probability),
                "demand bucket \"{}\" has probability {} outside [0, 1]",
                b.label,
                b.probability
            );
        }
        let total: f64 = buckets.iter().map(|b| b.probability).sum();
        assert!(
            (total - 1.0).abs() <= PROBABILITY_SUM_TOLERANCE,
            "demand probabilities sum to {total}, expected 1"
        );
        Self { buckets }
    }

    /// Every arrival wants the same distance.
    pub fn fixed(distance_km: f64) -> Self {
        Self::new(vec![DemandBucket::new("fixed", distance_km, 1.0)])
    }

    pub fn buckets(&self) -> &[DemandBucket] {
        &self.buckets
    }

    /// Picks a bucket by inverse-CDF lookup on one uniform draw.
    pub fn sample_bucket(&self, rng: &mut StdRng) -> &DemandBucket {
        let u = rng.random::<f64>();
        let mut cumulative = 0.0;
        for b in &self.buckets {
            cumulative += b.probability;
            if u < cumulative {
                return b;
            }
        }
        // u landed in the rounding gap above the last cumulative sum
        self.buckets
            .iter()
            .rev()
            .find(|b| b.probability > 0.0)
            .unwrap_or(&self.buckets[self.buckets.len() - 1])
    }

    /// Draws the energy need (kWh) of one arriving vehicle.
    pub fn sample_energy_kwh(&self, rng: &mut StdRng, consumption_kwh_per_100km: f64) -> f64 {
        energy_for_distance_kwh(self.sample_bucket(rng).distance_km, consumption_kwh_per_100km)
    }

    /// Mean requested distance per arrival (km).
    pub fn expected_distance_km(&self) -> f64 {
        self.buckets
            .iter()
            .map(|b| b.distance_km * b.probability)
            .sum()
    }

    /// Probability that an arrival needs no charging at all.
    pub fn no_charge_probability(&self) -> f64 {
        self.buckets
            .iter()
            .filter(|b| b.distance_km == 0.0)
            .map(|b| b.probability)
            .sum()
    }
}

impl Default for DemandModel {
    fn default() -> Self {
        Self::new(DEFAULT_DEMAND_BUCKETS.to_vec())
    }
}
