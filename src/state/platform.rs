//! Platform state management.
//!
//! A platform is one lifting area of a meet. It reconciles three
//! independently-updating external signals - the athlete roster, the
//! referee panel, and the timing system - into one consistent snapshot a
//! scoreboard or referee console can read at any frequency.
//!
//! Every mutation here is a synchronous in-memory transition; the host is
//! expected to serialize calls into one platform through a single event
//! loop. Distinct platforms share nothing.

use std::collections::HashMap;

use log::debug;
use serde::Deserialize;

use super::athlete::{Athlete, AthleteRecord, AthleteState, InvalidStartNumber, RosterEntry};
use super::clock::{Clock, ClockId, ClockState};

/// Competition phase, stored verbatim from the external system.
///
/// No transition validation is done here - the external protocol is the
/// sequencing authority, and a live mirror that rejected an out-of-order
/// phase would blank the display over a feed hiccup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Mode {
    BeforeIntroduction,
    #[default]
    BeforeSession,
    FirstCj,
    FirstSnatch,
    Introduction,
    Lifting,
    Marshal,
    Technical,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BeforeIntroduction => "BEFORE_INTRODUCTION",
            Self::BeforeSession => "BEFORE_SESSION",
            Self::FirstCj => "FIRST_CJ",
            Self::FirstSnatch => "FIRST_SNATCH",
            Self::Introduction => "INTRODUCTION",
            Self::Lifting => "LIFTING",
            Self::Marshal => "MARSHAL",
            Self::Technical => "TECHNICAL",
        }
    }
}

/// A single referee's call on a lift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Good,
    Bad,
}

impl Decision {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Bad => "bad",
        }
    }
}

/// All three referees' calls, set in one atomic operation.
///
/// The three calls are stored verbatim; majority computation is a display
/// concern, not state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RefereeDecisions {
    pub left: Option<Decision>,
    pub center: Option<Decision>,
    pub right: Option<Decision>,
}

/// The active session (a named block of competition), replaced wholesale
/// whenever a new one begins.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Session {
    pub name: String,
    pub description: String,
}

/// Fully-materialized snapshot of a platform.
#[derive(Debug, Clone, PartialEq)]
pub struct PlatformState {
    pub name: String,
    pub mode: Mode,
    pub session_name: Option<String>,
    pub session_description: Option<String>,
    pub athlete: Option<AthleteState>,
    pub athlete_clock: ClockState,
    pub break_clock: ClockState,
    pub left_referee: Option<Decision>,
    pub center_referee: Option<Decision>,
    pub right_referee: Option<Decision>,
    pub down_signal: bool,
}

impl PlatformState {
    /// Convert to JSON for sending to display clients.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "name": self.name,
            "mode": self.mode.as_str(),
            "sessionName": self.session_name,
            "sessionDescription": self.session_description,
            "athlete": self.athlete.as_ref().map(AthleteState::to_json),
            "athleteClock": self.athlete_clock.to_json(),
            "breakClock": self.break_clock.to_json(),
            "leftReferee": self.left_referee.map(|d| d.as_str()),
            "centerReferee": self.center_referee.map(|d| d.as_str()),
            "rightReferee": self.right_referee.map(|d| d.as_str()),
            "downSignal": self.down_signal
        })
    }
}

/// One lifting area's live state.
#[derive(Debug, Clone)]
pub struct Platform {
    /// Platform name, immutable after construction.
    name: String,

    mode: Mode,

    current_session: Option<Session>,

    /// Athletes by start number. Accumulates for the platform's lifetime;
    /// entries are updated, never removed, so the external system can
    /// re-reference athletes from earlier sessions.
    athletes: HashMap<u32, Athlete>,

    /// Authoritative lifting order from the last roster sync, verbatim.
    lifting_order: Vec<u32>,

    /// Current athlete by start number, resolved against `athletes` lazily
    /// on every read so roster changes can never leave a dangling reference.
    current_athlete: Option<u32>,

    left_referee: Option<Decision>,
    center_referee: Option<Decision>,
    right_referee: Option<Decision>,
    down_signal: bool,

    athlete_clock: Clock,
    break_clock: Clock,

    /// When this platform was first referenced.
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Platform {
    /// Create a platform in its default state: before session, empty
    /// roster, no current athlete, two fresh clocks.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mode: Mode::default(),
            current_session: None,
            athletes: HashMap::new(),
            lifting_order: Vec::new(),
            current_athlete: None,
            left_referee: None,
            center_referee: None,
            right_referee: None,
            down_signal: false,
            athlete_clock: Clock::new(),
            break_clock: Clock::new(),
            created_at: chrono::Utc::now(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn session(&self) -> Option<&Session> {
        self.current_session.as_ref()
    }

    // --- roster synchronization ---

    /// Sync the roster from the external system's ordered list.
    ///
    /// Spacer entries are skipped. Each real record either creates a new
    /// athlete or replaces an existing athlete's attributes wholesale. The
    /// lifting order is replaced with exactly the filtered input sequence -
    /// no merging, the external system is the order authority.
    ///
    /// Start numbers are parsed before anything is mutated, so a malformed
    /// record rejects the whole sync and leaves the previous state intact.
    pub fn update_athletes(&mut self, roster: &[RosterEntry]) -> Result<(), InvalidStartNumber> {
        let parsed: Vec<(u32, &AthleteRecord)> = roster
            .iter()
            .filter_map(RosterEntry::as_athlete)
            .map(|record| record.parse_start_number().map(|n| (n, record)))
            .collect::<Result<_, _>>()?;

        let mut order = Vec::with_capacity(parsed.len());
        for (start_number, record) in parsed {
            match self.athletes.get_mut(&start_number) {
                Some(athlete) => athlete.update(record),
                None => {
                    let athlete = Athlete::from_record(record)?;
                    self.athletes.insert(start_number, athlete);
                }
            }
            order.push(start_number);
        }
        self.lifting_order = order;

        debug!(
            "platform {}: roster synced, {} in lifting order, {} known athletes",
            self.name,
            self.lifting_order.len(),
            self.athletes.len()
        );
        Ok(())
    }

    /// Look up an athlete by start number.
    pub fn athlete(&self, start_number: u32) -> Option<&Athlete> {
        self.athletes.get(&start_number)
    }

    /// Number of athletes ever seen on this platform.
    pub fn athlete_count(&self) -> usize {
        self.athletes.len()
    }

    // --- current athlete ---

    /// Point the platform at the athlete with this start number.
    ///
    /// No membership validation: the external sync is trusted, and an
    /// unknown number simply reads back as no current athlete. Transient
    /// out-of-order updates during live sync are expected and must not
    /// crash the mirror.
    pub fn set_current_athlete(&mut self, start_number: u32) {
        self.current_athlete = Some(start_number);
    }

    pub fn clear_current_athlete(&mut self) {
        self.current_athlete = None;
    }

    /// The currently lifting athlete, resolved at read time.
    pub fn current_athlete(&self) -> Option<&Athlete> {
        self.current_athlete.and_then(|n| self.athletes.get(&n))
    }

    // --- referee decision protocol ---

    /// Set or clear the head referee's down signal.
    ///
    /// Raising the signal clears all three referee decisions: the down
    /// signal always precedes the official calls and must not display a
    /// stale decision from the previous lift.
    pub fn set_down_signal(&mut self, state: bool) {
        self.down_signal = state;

        if state {
            debug!("platform {}: down signal", self.name);
            self.left_referee = None;
            self.center_referee = None;
            self.right_referee = None;
        }
    }

    pub fn down_signal(&self) -> bool {
        self.down_signal
    }

    /// Record all three referees' calls, clearing the down signal.
    pub fn set_decisions(&mut self, decisions: RefereeDecisions) {
        self.down_signal = false;
        self.left_referee = decisions.left;
        self.center_referee = decisions.center;
        self.right_referee = decisions.right;
    }

    pub fn decisions(&self) -> RefereeDecisions {
        RefereeDecisions {
            left: self.left_referee,
            center: self.center_referee,
            right: self.right_referee,
        }
    }

    /// Return to the no-decision state: all three calls and the down
    /// signal cleared. Used when preparing for the next athlete.
    pub fn reset_decisions(&mut self) {
        self.left_referee = None;
        self.center_referee = None;
        self.right_referee = None;
        self.down_signal = false;
    }

    // --- mode and session ---

    pub fn set_mode(&mut self, mode: Mode) {
        debug!("platform {}: mode {}", self.name, mode.as_str());
        self.mode = mode;
    }

    pub fn set_session(&mut self, session: Session) {
        debug!("platform {}: session {}", self.name, session.name);
        self.current_session = Some(session);
    }

    // --- clocks ---

    pub fn athlete_clock(&self) -> &Clock {
        &self.athlete_clock
    }

    pub fn athlete_clock_mut(&mut self) -> &mut Clock {
        &mut self.athlete_clock
    }

    pub fn break_clock(&self) -> &Clock {
        &self.break_clock
    }

    pub fn break_clock_mut(&mut self) -> &mut Clock {
        &mut self.break_clock
    }

    /// Select a clock by ID, for routing commands from the timing feed.
    pub fn clock(&self, id: ClockId) -> &Clock {
        match id {
            ClockId::AthleteClock => &self.athlete_clock,
            ClockId::BreakClock => &self.break_clock,
        }
    }

    pub fn clock_mut(&mut self, id: ClockId) -> &mut Clock {
        match id {
            ClockId::AthleteClock => &mut self.athlete_clock,
            ClockId::BreakClock => &mut self.break_clock,
        }
    }

    // --- projections ---

    /// Project the full platform snapshot.
    ///
    /// Pure read, cheap field copies only - safe to call once per
    /// animation frame.
    pub fn state(&self) -> PlatformState {
        PlatformState {
            name: self.name.clone(),
            mode: self.mode,
            session_name: self.current_session.as_ref().map(|s| s.name.clone()),
            session_description: self
                .current_session
                .as_ref()
                .map(|s| s.description.clone()),
            athlete: self.current_athlete().map(Athlete::state),
            athlete_clock: self.athlete_clock.state(),
            break_clock: self.break_clock.state(),
            left_referee: self.left_referee,
            center_referee: self.center_referee,
            right_referee: self.right_referee,
            down_signal: self.down_signal,
        }
    }

    /// The lifting order resolved to live athletes, in order.
    ///
    /// Derived on every call from the stored start numbers. An order entry
    /// missing from the athlete map is a contract violation by the sync
    /// path; debug builds fail loudly, release builds skip the entry
    /// rather than fabricate an athlete.
    pub fn lifting_order(&self) -> Vec<&Athlete> {
        self.lifting_order
            .iter()
            .filter_map(|n| {
                let athlete = self.athletes.get(n);
                debug_assert!(
                    athlete.is_some(),
                    "lifting order references unknown start number {}",
                    n
                );
                athlete
            })
            .collect()
    }

    /// The raw lifting-order start numbers from the last sync.
    pub fn lifting_order_numbers(&self) -> &[u32] {
        &self.lifting_order
    }
}
