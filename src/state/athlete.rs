//! Athlete entities and the inbound roster payload.
//!
//! The external competition system periodically pushes an ordered roster
//! list. Entries are either real athlete records or spacer markers used by
//! the upstream display for visual grouping; spacers carry no start number
//! and are skipped. Athlete attributes are replaced wholesale on every
//! sync - there is no partial merge, an absent field means absent, not
//! "unchanged".

use std::fmt;

use serde::Deserialize;

/// One athlete record as sent by the external system.
///
/// `start_number` arrives string-encoded; everything else is display
/// material passed through to clients.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AthleteRecord {
    /// String-encoded start number, unique per platform.
    pub start_number: String,

    /// Display name.
    pub name: String,

    /// Body-weight category label.
    #[serde(default)]
    pub category: Option<String>,

    /// Team or club name.
    #[serde(default)]
    pub team: Option<String>,

    /// Current attempt number (1-6 across snatch and clean & jerk).
    #[serde(default)]
    pub attempt: Option<u8>,

    /// Requested barbell weight in kilograms.
    #[serde(default)]
    pub weight: Option<u32>,
}

impl AthleteRecord {
    /// Parse the string-encoded start number.
    ///
    /// A malformed value is a contract violation by the external system,
    /// the one place this crate fails hard.
    pub fn parse_start_number(&self) -> Result<u32, InvalidStartNumber> {
        self.start_number
            .trim()
            .parse()
            .map_err(|_| InvalidStartNumber {
                raw: self.start_number.clone(),
            })
    }
}

/// Spacer marker embedded in roster lists for display grouping.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SpacerMarker {
    #[serde(rename = "isSpacer")]
    pub is_spacer: bool,
}

/// One entry of the inbound roster list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RosterEntry {
    Spacer(SpacerMarker),
    Athlete(AthleteRecord),
}

impl RosterEntry {
    /// The athlete record, if this entry is not a spacer.
    pub fn as_athlete(&self) -> Option<&AthleteRecord> {
        match self {
            Self::Athlete(record) => Some(record),
            Self::Spacer(_) => None,
        }
    }
}

/// Error for a roster record whose start number does not parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidStartNumber {
    pub raw: String,
}

impl fmt::Display for InvalidStartNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid start number {:?} in roster record", self.raw)
    }
}

impl std::error::Error for InvalidStartNumber {}

/// One competitor on a platform.
///
/// Created on first sighting of a start number, updated in place on every
/// later sync, never removed. Identity is the start number; everything else
/// is mutable display state.
#[derive(Debug, Clone)]
pub struct Athlete {
    /// Identity key, immutable after construction.
    start_number: u32,

    pub name: String,
    pub category: Option<String>,
    pub team: Option<String>,
    pub attempt: Option<u8>,
    pub weight: Option<u32>,

    /// When this athlete's attributes were last synced.
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Athlete {
    /// Build a new athlete from its first roster record.
    pub fn from_record(record: &AthleteRecord) -> Result<Self, InvalidStartNumber> {
        Ok(Self {
            start_number: record.parse_start_number()?,
            name: record.name.clone(),
            category: record.category.clone(),
            team: record.team.clone(),
            attempt: record.attempt,
            weight: record.weight,
            updated_at: chrono::Utc::now(),
        })
    }

    pub fn start_number(&self) -> u32 {
        self.start_number
    }

    /// Replace every display attribute with the record's values.
    /// Identity is untouched.
    pub fn update(&mut self, record: &AthleteRecord) {
        self.name = record.name.clone();
        self.category = record.category.clone();
        self.team = record.team.clone();
        self.attempt = record.attempt;
        self.weight = record.weight;
        self.updated_at = chrono::Utc::now();
    }

    /// Project a flat display snapshot.
    pub fn state(&self) -> AthleteState {
        AthleteState {
            start_number: self.start_number,
            name: self.name.clone(),
            category: self.category.clone(),
            team: self.team.clone(),
            attempt: self.attempt,
            weight: self.weight,
        }
    }
}

/// Flat snapshot of one athlete's displayable fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AthleteState {
    pub start_number: u32,
    pub name: String,
    pub category: Option<String>,
    pub team: Option<String>,
    pub attempt: Option<u8>,
    pub weight: Option<u32>,
}

impl AthleteState {
    /// Convert to JSON for sending to display clients.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "startNumber": self.start_number,
            "name": self.name,
            "category": self.category,
            "team": self.team,
            "attempt": self.attempt,
            "weight": self.weight
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn make_record(start_number: &str, name: &str) -> AthleteRecord {
        AthleteRecord {
            start_number: start_number.to_string(),
            name: name.to_string(),
            category: Some("M81".to_string()),
            team: None,
            attempt: Some(1),
            weight: Some(140),
        }
    }

    #[test]
    fn test_parse_start_number() {
        let record = make_record("12", "A");
        assert_eq!(record.parse_start_number(), Ok(12));
    }

    #[test]
    fn test_parse_start_number_malformed() {
        let record = make_record("twelve", "A");
        let err = record.parse_start_number().unwrap_err();
        assert_eq!(err.raw, "twelve");
    }

    #[test]
    fn test_from_record() {
        let athlete = Athlete::from_record(&make_record("7", "B")).unwrap();
        assert_eq!(athlete.start_number(), 7);
        assert_eq!(athlete.name, "B");
        assert_eq!(athlete.weight, Some(140));
    }

    #[test]
    fn test_update_replaces_all_attributes() {
        let mut athlete = Athlete::from_record(&make_record("7", "B")).unwrap();

        // Second sync drops category and team entirely
        let next = AthleteRecord {
            start_number: "7".to_string(),
            name: "B".to_string(),
            category: None,
            team: None,
            attempt: Some(2),
            weight: Some(144),
        };
        athlete.update(&next);

        assert_eq!(athlete.start_number(), 7);
        assert_eq!(athlete.category, None);
        assert_eq!(athlete.attempt, Some(2));
        assert_eq!(athlete.weight, Some(144));
    }

    #[test]
    fn test_roster_entry_deserialization() {
        let raw = r#"[
            {"startNumber": "12", "name": "A"},
            {"isSpacer": true},
            {"startNumber": "7", "name": "B", "weight": 103}
        ]"#;

        let roster: Vec<RosterEntry> = serde_json::from_str(raw).unwrap();
        assert_eq!(roster.len(), 3);
        assert!(roster[0].as_athlete().is_some());
        assert!(roster[1].as_athlete().is_none());
        assert_eq!(roster[2].as_athlete().unwrap().weight, Some(103));
    }

    #[test]
    fn test_state_to_json() {
        let athlete = Athlete::from_record(&make_record("12", "A")).unwrap();
        let json = athlete.state().to_json();

        assert_eq!(json["startNumber"], 12);
        assert_eq!(json["name"], "A");
        assert_eq!(json["category"], "M81");
        assert_eq!(json["team"], serde_json::Value::Null);
    }
}
