//! Fixed-period pacing.
//!
//! [`PeriodTimer`] keeps the instant of its last tick and compares it against the
//! instant the caller passes in, so it never reads a clock by itself. In a firmware loop
//! the caller passes `Instant::now()`; in tests any instant will do.
use embassy_time::{Duration, Instant};

use crate::register::cntl2::OperatingMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PeriodTimer {
    period: Duration,
    last_tick: Instant,
}

impl PeriodTimer {
    pub fn new(period: Duration, now: Instant) -> Self {
        Self { period, last_tick: now }
    }

    /// A timer matching the output rate of a continuous mode, [`None`] for the others.
    ///
    /// ```rust
    /// use ak09918_rs::OperatingMode;
    /// use ak09918_rs::timer::PeriodTimer;
    /// use embassy_time::{Duration, Instant};
    ///
    /// let timer = PeriodTimer::for_mode(OperatingMode::Continuous20Hz, Instant::from_millis(0)).unwrap();
    /// assert_eq!(Duration::from_millis(50), timer.period());
    /// ```
    pub fn for_mode(mode: OperatingMode, now: Instant) -> Option<Self> {
        mode.sample_period().map(|period| Self::new(period, now))
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Returns `true` and restarts the period if strictly more than one period has passed
    /// since the last tick. An instant earlier than the last tick never fires.
    pub fn check(&mut self, now: Instant) -> bool {
        match now.checked_duration_since(self.last_tick) {
            Some(elapsed) if elapsed > self.period => {
                self.last_tick = now;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_only_after_period_elapsed() {
        let mut timer = PeriodTimer::new(Duration::from_millis(100), Instant::from_millis(1_000));

        assert!(!timer.check(Instant::from_millis(1_050)));
        assert!(!timer.check(Instant::from_millis(1_100)));
        assert!(timer.check(Instant::from_millis(1_101)));
    }

    #[test]
    fn restarts_from_the_firing_instant() {
        let mut timer = PeriodTimer::new(Duration::from_millis(10), Instant::from_millis(0));

        assert!(timer.check(Instant::from_millis(25)));
        assert!(!timer.check(Instant::from_millis(30)));
        assert!(timer.check(Instant::from_millis(36)));
    }

    #[test]
    fn earlier_instant_does_not_fire() {
        let mut timer = PeriodTimer::new(Duration::from_millis(10), Instant::from_millis(500));

        assert!(!timer.check(Instant::from_millis(0)));
    }

    #[test]
    fn only_continuous_modes_get_a_timer() {
        let now = Instant::from_millis(0);

        assert!(PeriodTimer::for_mode(OperatingMode::Normal, now).is_none());
        assert!(PeriodTimer::for_mode(OperatingMode::PowerDown, now).is_none());
        assert_eq!(
            Some(Duration::from_millis(10)),
            PeriodTimer::for_mode(OperatingMode::Continuous100Hz, now).map(|t| t.period())
        );
    }
}
