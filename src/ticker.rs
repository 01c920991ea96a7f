use std::time::{Duration, Instant};

/// Default event-poll interval in milliseconds
pub const DEFAULT_TICK_MS: u64 = 250;

/// Get tick duration
pub fn tick_duration() -> Duration {
    Duration::from_millis(DEFAULT_TICK_MS)
}

/// One-second interval driving the pomodoro countdown.
///
/// Armed while the timer runs and disarmed whenever it stops, so a paused
/// timer never accumulates ticks. Sub-second remainders carry over between
/// polls.
#[derive(Debug, Default)]
pub struct SecondTicker {
    anchor: Option<Instant>,
}

impl SecondTicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start counting from `now`. No-op if already armed.
    pub fn arm(&mut self, now: Instant) {
        if self.anchor.is_none() {
            self.anchor = Some(now);
        }
    }

    pub fn disarm(&mut self) {
        self.anchor = None;
    }

    pub fn is_armed(&self) -> bool {
        self.anchor.is_some()
    }

    /// Whole seconds elapsed since the last call (or since arming)
    pub fn due_seconds(&mut self, now: Instant) -> u32 {
        let Some(anchor) = self.anchor else {
            return 0;
        };

        let whole = now.saturating_duration_since(anchor).as_secs();
        if whole > 0 {
            self.anchor = Some(anchor + Duration::from_secs(whole));
        }
        u32::try_from(whole).unwrap_or(u32::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_duration() {
        let duration = tick_duration();
        assert_eq!(duration, Duration::from_millis(250));
    }

    #[test]
    fn test_disarmed_ticker_yields_nothing() {
        let mut ticker = SecondTicker::new();
        let now = Instant::now();
        assert_eq!(ticker.due_seconds(now + Duration::from_secs(10)), 0);
        assert!(!ticker.is_armed());
    }

    #[test]
    fn test_remainder_carries_over() {
        let mut ticker = SecondTicker::new();
        let start = Instant::now();
        ticker.arm(start);

        assert_eq!(ticker.due_seconds(start + Duration::from_millis(750)), 0);
        assert_eq!(ticker.due_seconds(start + Duration::from_millis(1_500)), 1);
        assert_eq!(ticker.due_seconds(start + Duration::from_millis(1_900)), 0);
        assert_eq!(ticker.due_seconds(start + Duration::from_millis(2_000)), 1);
        assert_eq!(ticker.due_seconds(start + Duration::from_millis(5_250)), 3);
    }

    #[test]
    fn test_rearm_keeps_original_anchor() {
        let mut ticker = SecondTicker::new();
        let start = Instant::now();
        ticker.arm(start);
        ticker.arm(start + Duration::from_secs(5));
        assert_eq!(ticker.due_seconds(start + Duration::from_secs(2)), 2);
    }

    #[test]
    fn test_disarm_drops_pending_time() {
        let mut ticker = SecondTicker::new();
        let start = Instant::now();
        ticker.arm(start);
        ticker.disarm();
        ticker.arm(start + Duration::from_secs(30));
        assert_eq!(ticker.due_seconds(start + Duration::from_secs(31)), 1);
    }
}
