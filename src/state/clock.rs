//! Countdown clock state machine.
//!
//! Each platform owns two independent clocks: one timing the current
//! athlete's attempt, one timing breaks between session phases. The clock
//! never ticks itself - remaining time is computed from a monotonic start
//! instant whenever the state is read, so snapshots stay correct at any
//! read frequency without a timer thread.

use std::time::{Duration, Instant};

/// Which of a platform's two clocks a command targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockId {
    /// Times the current athlete's attempt.
    AthleteClock,
    /// Times breaks between session phases.
    BreakClock,
}

impl ClockId {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AthleteClock => "athlete_clock",
            Self::BreakClock => "break_clock",
        }
    }
}

/// Internal clock phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Holding a fixed remaining duration.
    Stopped { remaining: Duration },

    /// Counting down from `duration` since `started_at`.
    Running {
        started_at: Instant,
        duration: Duration,
    },
}

/// Snapshot of a clock at the moment of the read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockState {
    pub remaining: Duration,
    pub running: bool,
}

impl ClockState {
    /// Convert to JSON for sending to display clients.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "remainingMs": self.remaining.as_millis() as u64,
            "running": self.running
        })
    }
}

/// A single countdown clock.
///
/// Two states: stopped (holds a fixed remaining duration) and running
/// (remaining decreases in real time, clamped at zero). Duplicate commands
/// from the external timing system are absorbed as no-ops.
#[derive(Debug, Clone)]
pub struct Clock {
    phase: Phase,
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock {
    /// Create a stopped clock with zero remaining time.
    pub fn new() -> Self {
        Self {
            phase: Phase::Stopped {
                remaining: Duration::ZERO,
            },
        }
    }

    /// Start counting down from the held remaining duration.
    /// No-op if already running.
    pub fn start(&mut self) {
        if let Phase::Stopped { remaining } = self.phase {
            self.phase = Phase::Running {
                started_at: Instant::now(),
                duration: remaining,
            };
        }
    }

    /// Freeze the remaining duration as of this call.
    /// No-op if already stopped.
    pub fn stop(&mut self) {
        if let Phase::Running { .. } = self.phase {
            self.phase = Phase::Stopped {
                remaining: self.remaining(),
            };
        }
    }

    /// Set a new remaining duration, forcing the stopped state.
    pub fn reset(&mut self, duration: Duration) {
        self.phase = Phase::Stopped {
            remaining: duration,
        };
    }

    /// Remaining duration, computed at read time while running.
    /// Never negative - saturates at zero once the countdown elapses.
    pub fn remaining(&self) -> Duration {
        match self.phase {
            Phase::Stopped { remaining } => remaining,
            Phase::Running {
                started_at,
                duration,
            } => duration.saturating_sub(started_at.elapsed()),
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self.phase, Phase::Running { .. })
    }

    /// Project the current state without mutating anything.
    pub fn state(&self) -> ClockState {
        ClockState {
            remaining: self.remaining(),
            running: self.is_running(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    #[test]
    fn test_new_clock_is_stopped_at_zero() {
        let clock = Clock::new();
        let state = clock.state();
        assert!(!state.running);
        assert_eq!(state.remaining, Duration::ZERO);
    }

    #[test]
    fn test_reset_then_snapshot() {
        let mut clock = Clock::new();
        clock.reset(Duration::from_secs(30));

        let state = clock.state();
        assert_eq!(state.remaining, Duration::from_secs(30));
        assert!(!state.running);
    }

    #[test]
    fn test_start_counts_down() {
        let mut clock = Clock::new();
        clock.reset(Duration::from_secs(30));
        clock.start();

        assert!(clock.is_running());
        let remaining = clock.remaining();
        assert!(remaining <= Duration::from_secs(30));
        assert!(remaining > Duration::from_secs(29));
    }

    #[test]
    fn test_stop_freezes_remaining() {
        let mut clock = Clock::new();
        clock.reset(Duration::from_secs(60));
        clock.start();
        clock.stop();

        let frozen = clock.remaining();
        assert!(!clock.is_running());

        sleep(Duration::from_millis(5));
        assert_eq!(clock.remaining(), frozen);
    }

    #[test]
    fn test_remaining_is_monotonic_while_running() {
        let mut clock = Clock::new();
        clock.reset(Duration::from_secs(10));
        clock.start();

        let mut previous = clock.remaining();
        for _ in 0..5 {
            sleep(Duration::from_millis(1));
            let current = clock.remaining();
            assert!(current <= previous);
            previous = current;
        }
    }

    #[test]
    fn test_remaining_clamps_at_zero() {
        let mut clock = Clock::new();
        clock.reset(Duration::from_millis(1));
        clock.start();

        sleep(Duration::from_millis(10));
        assert_eq!(clock.remaining(), Duration::ZERO);
        assert!(clock.is_running());
    }

    #[test]
    fn test_duplicate_commands_are_noops() {
        let mut clock = Clock::new();
        clock.reset(Duration::from_secs(5));

        clock.stop(); // already stopped
        assert_eq!(clock.remaining(), Duration::from_secs(5));

        clock.start();
        sleep(Duration::from_millis(2));
        let before = clock.remaining();
        clock.start(); // must not restart the countdown
        assert!(clock.remaining() <= before);
    }

    #[test]
    fn test_to_json() {
        let mut clock = Clock::new();
        clock.reset(Duration::from_secs(2));

        let json = clock.state().to_json();
        assert_eq!(json["remainingMs"], 2000);
        assert_eq!(json["running"], false);
    }
}
