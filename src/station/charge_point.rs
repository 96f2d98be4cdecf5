use std::fmt;

/// Remaining energy below this (kWh) counts as fully charged.
pub const ENERGY_EPSILON_KWH: f64 = 1e-9;

/// Occupancy of a charge point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChargePointState {
    /// Free and eligible for an arrival draw.
    Idle,
    /// Occupied by a vehicle that still needs energy.
    Charging,
}

impl fmt::Display for ChargePointState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Charging => write!(f, "charging"),
        }
    }
}

/// One charging socket and its running session counters.
///
/// A session starts with [`ChargePoint::start_session`] and is then driven
/// tick by tick with [`ChargePoint::advance`]. Each tick delivers at most the
/// rated power; the final tick delivers only what is left, so the energy
/// delivered over a completed session equals the energy requested.
///
/// # Examples
///
/// ```
/// use evcs_sim::station::{ChargePoint, ChargePointState};
///
/// let mut cp = ChargePoint::new(0);
/// assert!(cp.start_session(3.0));
///
/// assert_eq!(cp.advance(11.0, 0.25), 11.0); // 2.75 kWh
/// assert_eq!(cp.advance(11.0, 0.25), 1.0); // last 0.25 kWh
/// assert_eq!(cp.state(), ChargePointState::Idle);
/// ```
#[derive(Debug, Clone)]
pub struct ChargePoint {
    id: usize,
    state: ChargePointState,
    remaining_energy_kwh: f64,
    ticks_charging: u64,
    sessions_started: u64,
    energy_requested_kwh: f64,
    energy_delivered_kwh: f64,
}

impl ChargePoint {
    /// Creates an idle charge point.
    pub fn new(id: usize) -> Self {
        Self {
            id,
            state: ChargePointState::Idle,
            remaining_energy_kwh: 0.0,
            ticks_charging: 0,
            sessions_started: 0,
            energy_requested_kwh: 0.0,
            energy_delivered_kwh: 0.0,
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn state(&self) -> ChargePointState {
        self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state == ChargePointState::Idle
    }

    /// Energy still owed to the current vehicle (kWh); zero while idle.
    pub fn remaining_energy_kwh(&self) -> f64 {
        self.remaining_energy_kwh
    }

    /// Ticks during which this point delivered power.
    pub fn ticks_charging(&self) -> u64 {
        self.ticks_charging
    }

    pub fn sessions_started(&self) -> u64 {
        self.sessions_started
    }

    /// Sum of the energy requested by every session started here (kWh).
    pub fn energy_requested_kwh(&self) -> f64 {
        self.energy_requested_kwh
    }

    /// Sum of the energy delivered by this point (kWh).
    pub fn energy_delivered_kwh(&self) -> f64 {
        self.energy_delivered_kwh
    }

    /// Plugs in a vehicle that needs `energy_kwh`.
    ///
    /// A need of zero leaves the point idle and is not a session.
    ///
    /// # Returns
    ///
    /// `true` if a session started.
    ///
    /// # Panics
    ///
    /// Panics if the point is already charging or `energy_kwh` is negative
    /// or not finite.
    pub fn start_session(&mut self, energy_kwh: f64) -> bool {
        assert!(
            self.is_idle(),
            "charge point {} received a vehicle while charging",
            self.id
        );
        assert!(
            energy_kwh.is_finite() && energy_kwh >= 0.0,
            "charge point {} got invalid energy need {energy_kwh} kWh",
            self.id
        );
        if energy_kwh <= 0.0 {
            return false;
        }

        self.state = ChargePointState::Charging;
        self.remaining_energy_kwh = energy_kwh;
        self.energy_requested_kwh += energy_kwh;
        self.sessions_started += 1;
        true
    }

    /// Delivers one tick of charging and returns the power drawn (kW).
    ///
    /// Idle points draw nothing. The point returns to idle on the tick its
    /// remaining energy reaches zero, and that tick still reports its draw.
    ///
    /// # Panics
    ///
    /// Panics if the remaining energy drops below `-ENERGY_EPSILON_KWH`.
    pub fn advance(&mut self, max_power_kw: f64, tick_hours: f64) -> f64 {
        if self.is_idle() {
            return 0.0;
        }

        let power_kw = max_power_kw.min(self.remaining_energy_kwh / tick_hours);
        let energy_kwh = power_kw * tick_hours;
        self.remaining_energy_kwh -= energy_kwh;
        self.energy_delivered_kwh += energy_kwh;
        self.ticks_charging += 1;

        assert!(
            self.remaining_energy_kwh >= -ENERGY_EPSILON_KWH,
            "charge point {} overdelivered: remaining {} kWh",
            self.id,
            self.remaining_energy_kwh
        );
        if self.remaining_energy_kwh <= ENERGY_EPSILON_KWH {
            self.remaining_energy_kwh = 0.0;
            self.state = ChargePointState::Idle;
        }

        power_kw
    }
}
