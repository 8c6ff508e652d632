//! Edge detection for the audible countdown before a wave.

use std::time::Duration;

/// Length of the audible tail of every countdown.
const COUNTDOWN_WINDOW: Duration = Duration::from_secs(2);
/// Spacing between two beeps inside the window.
const BEEP_INTERVAL: Duration = Duration::from_secs(1);

/// Remembers how far into the window the last beep fired, so each beep fires
/// once no matter how many ticks land inside its interval.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct CountdownBeeper {
    mark: Option<Duration>,
}

impl CountdownBeeper {
    /// Returns `true` when a beep is due for a countdown of length `delay`
    /// that has been running for `elapsed`.
    pub(crate) fn observe(&mut self, delay: Duration, elapsed: Duration) -> bool {
        if elapsed >= delay {
            return false;
        }
        let remaining = delay - elapsed;
        if remaining > COUNTDOWN_WINDOW {
            return false;
        }

        let progressed = COUNTDOWN_WINDOW - remaining;
        let index = beep_index(progressed);
        if self.mark.is_some_and(|mark| index <= beep_index(mark)) {
            return false;
        }
        self.mark = Some(progressed);
        true
    }

    /// Forgets the previous beep; called whenever a window starts or ends.
    pub(crate) fn clear(&mut self) {
        self.mark = None;
    }
}

fn beep_index(progressed: Duration) -> u128 {
    progressed.as_nanos() / BEEP_INTERVAL.as_nanos()
}

#[cfg(test)]
mod tests {
    use super::CountdownBeeper;
    use std::time::Duration;

    fn beeps_for(delay: Duration, tick: Duration) -> usize {
        let mut beeper = CountdownBeeper::default();
        let mut elapsed = Duration::ZERO;
        let mut beeps = 0;
        while elapsed < delay {
            if beeper.observe(delay, elapsed) {
                beeps += 1;
            }
            elapsed += tick;
        }
        beeps
    }

    #[test]
    fn two_beeps_regardless_of_tick_rate() {
        let delay = Duration::from_secs(3);
        assert_eq!(beeps_for(delay, Duration::from_millis(100)), 2);
        assert_eq!(beeps_for(delay, Duration::from_secs(1)), 2);
        assert_eq!(beeps_for(delay, Duration::from_millis(16)), 2);
    }

    #[test]
    fn repeated_samples_do_not_refire() {
        let mut beeper = CountdownBeeper::default();
        let delay = Duration::from_secs(2);
        assert!(beeper.observe(delay, Duration::ZERO));
        assert!(!beeper.observe(delay, Duration::ZERO));
        assert!(!beeper.observe(delay, Duration::from_millis(900)));
        assert!(beeper.observe(delay, Duration::from_millis(1_000)));
        assert!(!beeper.observe(delay, Duration::from_millis(1_999)));
        assert!(!beeper.observe(delay, delay));
    }

    #[test]
    fn silent_before_the_window() {
        let mut beeper = CountdownBeeper::default();
        assert!(!beeper.observe(Duration::from_secs(5), Duration::from_millis(2_500)));
    }

    #[test]
    fn clearing_rearms_the_first_beep() {
        let mut beeper = CountdownBeeper::default();
        let delay = Duration::from_secs(2);
        assert!(beeper.observe(delay, Duration::from_millis(1_500)));
        beeper.clear();
        assert!(beeper.observe(delay, Duration::from_millis(100)));
    }
}
