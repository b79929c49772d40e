//! State management module for liftboard.
//!
//! This module provides the core state types and the registry:
//!
//! - `platform` - Platform aggregate (roster, referee protocol, mode, session)
//! - `athlete` - Athlete entities and the inbound roster payload
//! - `clock` - Countdown clock state machine
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                       PlatformRegistry                         │
//! │                                                                │
//! │   name ──▶ Platform                                            │
//! │            ├── athletes:      start_number ──▶ Athlete         │
//! │            ├── lifting_order: [start_number, ...]              │
//! │            ├── current_athlete (start_number, resolved lazily) │
//! │            ├── referee decisions + down signal                 │
//! │            ├── mode, session                                   │
//! │            └── athlete_clock / break_clock                     │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use liftboard_state::state::PlatformRegistry;
//!
//! let mut registry = PlatformRegistry::new();
//! let platform = registry.get_or_create("Platform A");
//! platform.update_athletes(&roster)?;
//! let snapshot = platform.state();
//! ```

pub mod athlete;
pub mod clock;
pub mod platform;

// Re-export commonly used types
pub use athlete::{
    Athlete, AthleteRecord, AthleteState, InvalidStartNumber, RosterEntry, SpacerMarker,
};
pub use clock::{Clock, ClockId, ClockState};
pub use platform::{Decision, Mode, Platform, PlatformState, RefereeDecisions, Session};

use std::collections::HashMap;

/// Process-wide lookup of platforms by name.
///
/// An explicit object rather than an ambient global, so hosts and tests can
/// run isolated registries. Platforms are created lazily on first reference
/// and live as long as the registry; there is no removal.
#[derive(Debug, Default)]
pub struct PlatformRegistry {
    platforms: HashMap<String, Platform>,
}

impl PlatformRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the platform with this name, creating it in its default state
    /// on first reference. Idempotent.
    pub fn get_or_create(&mut self, name: &str) -> &mut Platform {
        self.platforms
            .entry(name.to_string())
            .or_insert_with(|| Platform::new(name))
    }

    /// Get a platform if it has been referenced before.
    pub fn get(&self, name: &str) -> Option<&Platform> {
        self.platforms.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Platform> {
        self.platforms.get_mut(name)
    }

    /// Names of all platforms referenced so far.
    pub fn names(&self) -> impl Iterator<Item = &String> {
        self.platforms.keys()
    }

    pub fn count(&self) -> usize {
        self.platforms.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_or_create_is_idempotent() {
        let mut registry = PlatformRegistry::new();

        registry.get_or_create("A").set_mode(Mode::Lifting);
        assert_eq!(registry.count(), 1);

        // Second reference returns the same platform, state intact
        let again = registry.get_or_create("A");
        assert_eq!(again.mode(), Mode::Lifting);
        assert_eq!(registry.count(), 1);
    }

    #[test]
    fn test_platforms_are_independent() {
        let mut registry = PlatformRegistry::new();

        registry.get_or_create("A").set_down_signal(true);
        let b = registry.get_or_create("B");

        assert!(!b.down_signal());
        assert_eq!(b.mode(), Mode::BeforeSession);
        assert_eq!(registry.count(), 2);
    }

    #[test]
    fn test_get_before_create() {
        let mut registry = PlatformRegistry::new();
        assert!(registry.get("A").is_none());

        registry.get_or_create("A");
        assert_eq!(registry.get("A").unwrap().name(), "A");
    }
}
