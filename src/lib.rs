//! Liftboard State Library
//!
//! This crate mirrors the live state of a weightlifting competition platform
//! for scoreboards and referee consoles.
//!
//! # Overview
//!
//! The state module provides:
//!
//! - **Platform Aggregate** - One lifting area's mode, session, roster,
//!   lifting order, current athlete, and the three-referee decision and
//!   down-signal protocol.
//!
//! - **Clocks** - Two independent countdown clocks per platform (athlete
//!   attempt timing, break timing), computed from a monotonic reference at
//!   read time.
//!
//! - **Athlete Tracking** - Athletes keyed by start number, updated wholesale
//!   from each roster sync, retained for the platform's lifetime.
//!
//! - **Platform Registry** - Named lookup creating platforms lazily, so
//!   multiple lifting areas coexist without explicit wiring.
//!
//! # Design Principles
//!
//! 1. **Mirror, never authority** - The external competition system owns the
//!    lifting order, mode sequencing, and decisions. This crate stores what
//!    it is given and degrades silently on transient inconsistency rather
//!    than halting a live display.
//!
//! 2. **Snapshots are pure reads** - `Platform::state()` performs no I/O and
//!    no recomputation beyond field copies; it is safe once per animation
//!    frame.
//!
//! 3. **No transport** - This crate is pure state; polling, websockets, and
//!    rendering live elsewhere.
//!
//! 4. **Serialization-ready** - Snapshots convert to JSON for display
//!    clients; inbound payload types deserialize the external system's wire
//!    spellings directly.
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use liftboard_state::state::{Mode, PlatformRegistry, RosterEntry, Session};
//!
//! let mut registry = PlatformRegistry::new();
//! let platform = registry.get_or_create("Platform A");
//!
//! // Roster sync from the external system (spacers are skipped)
//! let roster: Vec<RosterEntry> = serde_json::from_str(
//!     r#"[
//!         {"startNumber": "12", "name": "Ada", "weight": 87},
//!         {"isSpacer": true},
//!         {"startNumber": "7", "name": "Bo", "weight": 103}
//!     ]"#,
//! ).unwrap();
//! platform.update_athletes(&roster).unwrap();
//!
//! platform.set_session(Session {
//!     name: "M81 Group A".to_string(),
//!     description: "Men 81kg, Group A".to_string(),
//! });
//! platform.set_mode(Mode::Lifting);
//! platform.set_current_athlete(12);
//! platform.athlete_clock_mut().reset(Duration::from_secs(60));
//! platform.athlete_clock_mut().start();
//!
//! let snapshot = platform.state();
//! assert_eq!(snapshot.athlete.unwrap().name, "Ada");
//! assert!(snapshot.athlete_clock.running);
//! ```

pub mod state;

// Re-export everything from state module at crate root
pub use state::*;
