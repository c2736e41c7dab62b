//! Countdown timer driven by externally scheduled ticks.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimerPhase {
    #[default]
    Idle,
    Running,
    Expired,
}

/// One-second countdown.
///
/// `remaining` only decreases while running. Reaching zero moves the timer
/// to `Expired`, and only that tick reports expiry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Timer {
    remaining: u64,
    phase: TimerPhase,
}

impl Timer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restart the countdown from `seconds`, whatever the current phase.
    ///
    /// `start(0)` runs with nothing left; the next tick expires it.
    pub fn start(&mut self, seconds: u64) {
        self.remaining = seconds;
        self.phase = TimerPhase::Running;
    }

    /// Advance one second. Returns true exactly on the expiring tick.
    pub fn tick(&mut self) -> bool {
        if self.phase != TimerPhase::Running {
            return false;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.phase = TimerPhase::Expired;
            return true;
        }
        false
    }

    pub fn reset(&mut self) {
        self.remaining = 0;
        self.phase = TimerPhase::Idle;
    }

    pub fn phase(&self) -> TimerPhase {
        self.phase
    }

    pub fn remaining(&self) -> u64 {
        self.remaining
    }

    pub fn is_running(&self) -> bool {
        self.phase == TimerPhase::Running
    }

    /// `MM:SS` display; minutes are not capped at 59.
    pub fn label(&self) -> String {
        format!("{:02}:{:02}", self.remaining / 60, self.remaining % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn five_ticks_expire_once() {
        let mut timer = Timer::new();
        timer.start(5);
        let fired: Vec<bool> = (0..5).map(|_| timer.tick()).collect();
        assert_eq!(fired, vec![false, false, false, false, true]);
        assert_eq!(timer.phase(), TimerPhase::Expired);
        assert_eq!(timer.remaining(), 0);

        assert!(!timer.tick());
        assert_eq!(timer.phase(), TimerPhase::Expired);
        assert_eq!(timer.remaining(), 0);
    }

    #[test]
    fn tick_while_idle_is_noop() {
        let mut timer = Timer::new();
        assert!(!timer.tick());
        assert_eq!(timer.phase(), TimerPhase::Idle);
    }

    #[test]
    fn start_zero_expires_on_next_tick() {
        let mut timer = Timer::new();
        timer.start(0);
        assert!(timer.is_running());
        assert!(timer.tick());
        assert_eq!(timer.phase(), TimerPhase::Expired);
    }

    #[test]
    fn restart_while_running_replaces_remaining() {
        let mut timer = Timer::new();
        timer.start(10);
        timer.tick();
        timer.start(3);
        assert_eq!(timer.remaining(), 3);
        assert!(timer.is_running());
    }

    #[test]
    fn reset_returns_to_idle_from_any_phase() {
        let mut timer = Timer::new();
        timer.start(2);
        timer.reset();
        assert_eq!(timer, Timer::new());

        timer.start(1);
        timer.tick();
        timer.reset();
        assert_eq!(timer.phase(), TimerPhase::Idle);
        assert_eq!(timer.remaining(), 0);
    }

    #[test]
    fn label_formats_minutes_and_seconds() {
        let mut timer = Timer::new();
        timer.start(25 * 60 + 7);
        assert_eq!(timer.label(), "25:07");
        timer.start(7200);
        assert_eq!(timer.label(), "120:00");
    }
}
