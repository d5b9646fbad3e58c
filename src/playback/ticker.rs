use chrono::{DateTime, Duration, Utc};
use std::time::Duration as StdDuration;

/// Default interval between playback ticks (20 Hz)
pub const DEFAULT_TICK_INTERVAL: StdDuration = StdDuration::from_millis(50);

/// Longest supported interval between playback ticks
pub const MAX_TICK_INTERVAL: StdDuration = StdDuration::from_secs(3_600);

/// Fixed-period ticker driven by wall-clock time
///
/// Fires once immediately when played, then on a fixed grid of
/// `start + n * period`. A late poll fires once and schedules the next fire on
/// the next grid point after `now`, so slow ticks never stack up.
#[derive(Debug, Clone)]
pub struct Ticker {
    period_ms: i64,
    next_fire: Option<DateTime<Utc>>,
}

impl Ticker {
    /// Create a stopped ticker. The period is clamped to 1ms..=`MAX_TICK_INTERVAL`.
    pub fn new(period: StdDuration) -> Self {
        let period = period.min(MAX_TICK_INTERVAL);
        Self {
            period_ms: i64::try_from(period.as_millis()).unwrap_or(i64::MAX).max(1),
            next_fire: None,
        }
    }

    pub fn period(&self) -> StdDuration {
        StdDuration::from_millis(self.period_ms as u64)
    }

    pub fn is_running(&self) -> bool {
        self.next_fire.is_some()
    }

    /// Start (or restart) the ticker with its first fire due at `now`
    pub fn play_from_start(&mut self, now: DateTime<Utc>) {
        self.next_fire = Some(now);
    }

    pub fn stop(&mut self) {
        self.next_fire = None;
    }

    /// Check whether the ticker fires at `now`, advancing the schedule if so
    pub fn poll(&mut self, now: DateTime<Utc>) -> bool {
        let Some(due) = self.next_fire else {
            return false;
        };
        if now < due {
            return false;
        }

        // Skip grid points that passed while we were late
        let behind = (now - due).num_milliseconds();
        let steps = behind / self.period_ms + 1;
        let advance = Duration::try_milliseconds(steps.saturating_mul(self.period_ms));
        self.next_fire = Some(
            advance
                .and_then(|advance| due.checked_add_signed(advance))
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
        );
        true
    }
}

impl Default for Ticker {
    fn default() -> Self {
        Self::new(DEFAULT_TICK_INTERVAL)
    }
}
