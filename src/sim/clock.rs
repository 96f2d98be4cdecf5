/// A simulation clock that hands out tick indices in strict order.
///
/// The `Clock` is the only source of tick indices for the engine, so a
/// charge point can never observe tick `t + 1` before tick `t`.
///
/// # Examples
///
/// ```
/// use evcs_sim::sim::clock::Clock;
///
/// let mut clock = Clock::new(3);
/// let mut ticks = Vec::new();
///
/// clock.run(|tick| ticks.push(tick));
/// assert_eq!(ticks, vec![0, 1, 2]);
/// ```
#[derive(Debug, Clone)]
pub struct Clock {
    /// Next tick to hand out
    current: usize,
    /// Total ticks in the run
    total: usize,
}

impl Clock {
    /// Creates a new clock covering `total` ticks.
    pub fn new(total: usize) -> Self {
        Self { current: 0, total }
    }

    /// Advances the clock by one tick.
    ///
    /// # Returns
    ///
    /// * `Some(tick)` - The tick index (starting from 0) before advancing
    /// * `None` - If every tick has been handed out
    pub fn tick(&mut self) -> Option<usize> {
        if self.current < self.total {
            let tick = self.current;
            self.current += 1;
            Some(tick)
        } else {
            None
        }
    }

    /// Number of ticks already handed out.
    pub fn elapsed(&self) -> usize {
        self.current
    }

    /// Whether every tick has been handed out.
    pub fn is_finished(&self) -> bool {
        self.current >= self.total
    }

    /// Runs a function for each remaining tick.
    pub fn run(&mut self, mut f: impl FnMut(usize)) {
        while let Some(tick) = self.tick() {
            f(tick);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_clock() {
        let clock = Clock::new(5);
        assert_eq!(clock.elapsed(), 0);
        assert!(!clock.is_finished());
    }

    #[test]
    fn test_tick() {
        let mut clock = Clock::new(2);
        assert_eq!(clock.tick(), Some(0));
        assert_eq!(clock.tick(), Some(1));
        assert_eq!(clock.tick(), None);
        assert!(clock.is_finished());
        assert_eq!(clock.elapsed(), 2);
    }

    #[test]
    fn test_run_resumes_after_partial_ticks() {
        let mut clock = Clock::new(4);
        clock.tick();
        let mut ticks = Vec::new();

        clock.run(|tick| ticks.push(tick));

        assert_eq!(ticks, vec![1, 2, 3]);
    }

    #[test]
    fn test_empty_clock() {
        let mut clock = Clock::new(0);
        assert_eq!(clock.tick(), None);

        let mut was_called = false;
        clock.run(|_| was_called = true);
        assert!(!was_called);
    }
}
