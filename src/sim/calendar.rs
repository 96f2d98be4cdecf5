//! Fixed simulation calendar: 15-minute ticks over one non-leap year.

/// Length of one tick in minutes.
pub const TICK_MINUTES: usize = 15;

/// Length of one tick in hours.
pub const TICK_HOURS: f64 = 0.25;

/// Number of ticks in one simulated day.
pub const TICKS_PER_DAY: usize = 24 * 60 / TICK_MINUTES;

/// Number of days in the simulated (non-leap) year.
pub const DAYS_PER_YEAR: usize = 365;

/// Number of ticks in the simulated year.
pub const TICKS_PER_YEAR: usize = TICKS_PER_DAY * DAYS_PER_YEAR;

/// Number of months in the year.
pub const MONTHS_PER_YEAR: usize = 12;

/// Number of week buckets; day 364 (week 53) folds into the last one.
pub const WEEKS_PER_YEAR: usize = 52;

/// Days per month of a standard non-leap year.
pub const MONTH_LENGTHS: [usize; MONTHS_PER_YEAR] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Calendar position of a single tick.
///
/// All indices are zero-based.
///
/// # Examples
///
/// ```
/// use evcs_sim::sim::calendar::TickTime;
///
/// let t = TickTime::from_tick(96 * 40 + 3);
/// assert_eq!(t.day, 40);
/// assert_eq!(t.tick_of_day, 3);
/// assert_eq!(t.month, 1);
/// assert_eq!(t.week, 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickTime {
    pub tick: usize,
    pub day: usize,
    pub tick_of_day: usize,
    pub month: usize,
    pub week: usize,
}

impl TickTime {
    /// Resolves a tick index into its day, tick-of-day, month and week.
    ///
    /// # Panics
    ///
    /// Panics if `tick` lies outside the simulated year.
    pub fn from_tick(tick: usize) -> Self {
        assert!(
            tick < TICKS_PER_YEAR,
            "tick {tick} outside simulated year (0..{TICKS_PER_YEAR})"
        );
        let day = tick / TICKS_PER_DAY;
        Self {
            tick,
            day,
            tick_of_day: tick % TICKS_PER_DAY,
            month: month_of_day(day),
            week: week_of_day(day),
        }
    }

    /// Wall-clock time of the tick start as `HH:MM`.
    pub fn clock_label(&self) -> String {
        let minutes = self.tick_of_day * TICK_MINUTES;
        format!("{:02}:{:02}", minutes / 60, minutes % 60)
    }
}

/// Zero-based month for a zero-based day-of-year.
pub fn month_of_day(day: usize) -> usize {
    let mut remaining = day;
    for (month, &len) in MONTH_LENGTHS.iter().enumerate() {
        if remaining < len {
            return month;
        }
        remaining -= len;
    }
    MONTHS_PER_YEAR - 1
}

/// Zero-based week for a zero-based day-of-year, capped at the last week.
pub fn week_of_day(day: usize) -> usize {
    (day / 7).min(WEEKS_PER_YEAR - 1)
}
