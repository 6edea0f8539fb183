//! Elapsed-time tracking for a single puzzle attempt.

#[cfg(not(target_arch = "wasm32"))]
pub use std::time::{Duration, Instant};
#[cfg(target_arch = "wasm32")]
pub use web_time::{Duration, Instant};

/// Starts on the first click of a game and freezes once the puzzle is solved.
///
/// Every method takes the current instant explicitly so the owner decides
/// when time is sampled (once per frame in the app).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameClock {
    #[default]
    Idle,
    Running { since: Instant },
    Stopped { elapsed: Duration },
}

impl GameClock {
    /// No-op unless the clock is idle.
    pub fn start(&mut self, now: Instant) {
        if let GameClock::Idle = self {
            *self = GameClock::Running { since: now };
        }
    }

    pub fn stop(&mut self, now: Instant) {
        if let GameClock::Running { since } = *self {
            *self = GameClock::Stopped {
                elapsed: now.saturating_duration_since(since),
            };
        }
    }

    pub fn reset(&mut self) {
        *self = GameClock::Idle;
    }

    pub fn is_running(&self) -> bool {
        matches!(self, GameClock::Running { .. })
    }

    pub fn has_started(&self) -> bool {
        !matches!(self, GameClock::Idle)
    }

    pub fn elapsed(&self, now: Instant) -> Duration {
        match *self {
            GameClock::Idle => Duration::ZERO,
            GameClock::Running { since } => now.saturating_duration_since(since),
            GameClock::Stopped { elapsed } => elapsed,
        }
    }
}

/// `MM:SS` in whole seconds. Minutes keep counting past 59.
pub fn format_elapsed(elapsed: Duration) -> String {
    let total = elapsed.as_secs();
    format!("{:02}:{:02}", total / 60, total % 60)
}
