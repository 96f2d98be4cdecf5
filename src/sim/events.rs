//! Charging-session counters bucketed by calendar period.

use super::calendar::{DAYS_PER_YEAR, MONTHS_PER_YEAR, TickTime, WEEKS_PER_YEAR};

/// Running totals of session starts per year, month, week and day.
///
/// Each session is counted once, at the tick it starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventCounts {
    year: u32,
    month: Vec<u32>,
    week: Vec<u32>,
    day: Vec<u32>,
}

impl EventCounts {
    pub fn new() -> Self {
        Self {
            year: 0,
            month: vec![0; MONTHS_PER_YEAR],
            week: vec![0; WEEKS_PER_YEAR],
            day: vec![0; DAYS_PER_YEAR],
        }
    }

    /// Counts one session started at `time`.
    pub fn record_session_start(&mut self, time: &TickTime) {
        self.year += 1;
        self.month[time.month] += 1;
        self.week[time.week] += 1;
        self.day[time.day] += 1;
    }

    pub fn per_year(&self) -> u32 {
        self.year
    }

    pub fn per_month(&self) -> &[u32] {
        &self.month
    }

    pub fn per_week(&self) -> &[u32] {
        &self.week
    }

    pub fn per_day(&self) -> &[u32] {
        &self.day
    }

    /// Splits into `(year, month, week, day)` owned buckets.
    pub fn into_parts(self) -> (u32, Vec<u32>, Vec<u32>, Vec<u32>) {
        (self.year, self.month, self.week, self.day)
    }
}

impl Default for EventCounts {
    fn default() -> Self {
        Self::new()
    }
}
