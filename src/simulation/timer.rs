use crate::core::clock::Millis;

/// Polled repeating timer.
///
/// Owners call `poll` with the current time and get back how many whole
/// periods have passed since the timer last fired. Dropping the owner is the
/// only teardown needed; nothing fires on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntervalTimer {
    period_ms: Millis,
    next_due: Millis,
}

impl IntervalTimer {
    /// Arm a timer whose first tick is one period after `now`.
    pub fn start(now: Millis, period_ms: Millis) -> Self {
        let period_ms = period_ms.max(1);
        Self {
            period_ms,
            next_due: now.saturating_add(period_ms),
        }
    }

    pub fn next_due(&self) -> Millis {
        self.next_due
    }

    pub fn restart(&mut self, now: Millis) {
        self.next_due = now.saturating_add(self.period_ms);
    }

    pub fn poll(&mut self, now: Millis) -> u64 {
        if now < self.next_due {
            return 0;
        }
        let fired = (now - self.next_due) / self.period_ms + 1;
        self.next_due = self
            .next_due
            .saturating_add(fired.saturating_mul(self.period_ms));
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once_per_period() {
        let mut timer = IntervalTimer::start(0, 1_000);
        assert_eq!(timer.poll(999), 0);
        assert_eq!(timer.poll(1_000), 1);
        assert_eq!(timer.poll(1_500), 0);
        assert_eq!(timer.poll(2_000), 1);
    }

    #[test]
    fn catches_up_after_a_long_gap() {
        let mut timer = IntervalTimer::start(0, 1_000);
        assert_eq!(timer.poll(5_250), 5);
        assert_eq!(timer.next_due(), 6_000);
    }

    #[test]
    fn rewound_clock_does_not_fire() {
        let mut timer = IntervalTimer::start(10_000, 1_000);
        assert_eq!(timer.poll(2_000), 0);
        assert_eq!(timer.poll(11_000), 1);
    }

    #[test]
    fn restart_pushes_next_tick_out() {
        let mut timer = IntervalTimer::start(0, 1_000);
        timer.restart(1_800);
        assert_eq!(timer.poll(2_000), 0);
        assert_eq!(timer.poll(2_800), 1);
    }
}
