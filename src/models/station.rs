use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub type StationId = u32;

/// Map number and branch name of a station on one line.
///
/// Stored as a two-element JSON array `[map_number, branch]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Membership(pub String, pub String);

impl Membership {
    #[must_use]
    pub fn new(map_number: impl Into<String>, branch: impl Into<String>) -> Self {
        Self(map_number.into(), branch.into())
    }

    #[must_use]
    pub fn map_number(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn branch(&self) -> &str {
        &self.1
    }
}

/// category -> line name -> membership
pub type Memberships = IndexMap<String, IndexMap<String, Membership>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StationType {
    #[default]
    #[serde(rename = "station")]
    Plain,
    #[serde(rename = "semi")]
    Semi,
    #[serde(rename = "jct")]
    Junction,
    #[serde(rename = "inter")]
    Interchange,
    #[serde(rename = "elev-we")]
    ElevatorWestEast,
    #[serde(rename = "elev-ew")]
    ElevatorEastWest,
}

impl StationType {
    pub const ALL: [StationType; 6] = [
        StationType::Plain,
        StationType::Semi,
        StationType::Junction,
        StationType::Interchange,
        StationType::ElevatorWestEast,
        StationType::ElevatorEastWest,
    ];

    #[must_use]
    pub fn is_plain(&self) -> bool {
        *self == StationType::Plain
    }

    /// Elevator stations are the only ones whose `y1`/`y2` levels mean anything.
    #[must_use]
    pub fn is_elevator(self) -> bool {
        matches!(self, StationType::ElevatorWestEast | StationType::ElevatorEastWest)
    }

    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            StationType::Plain => "station",
            StationType::Semi => "semi",
            StationType::Junction => "jct",
            StationType::Interchange => "inter",
            StationType::ElevatorWestEast => "elev-we",
            StationType::ElevatorEastWest => "elev-ew",
        }
    }

    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.code() == code)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub id: StationId,
    pub name: String,
    pub x: f64,
    pub z: f64,
    #[serde(rename = "type", default, skip_serializing_if = "StationType::is_plain")]
    pub station_type: StationType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y1: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y2: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub lines: Memberships,
}

impl Station {
    #[must_use]
    pub fn new(id: StationId, name: String, position: (f64, f64)) -> Self {
        Self {
            id,
            name,
            x: position.0,
            z: position.1,
            station_type: StationType::Plain,
            y1: None,
            y2: None,
            notes: None,
            lines: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn position(&self) -> (f64, f64) {
        (self.x, self.z)
    }

    #[must_use]
    pub fn is_member_of(&self, category: &str, line: &str) -> bool {
        self.lines
            .get(category)
            .is_some_and(|lines| lines.contains_key(line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_station_type_codes_round_trip() {
        for station_type in StationType::ALL {
            assert_eq!(StationType::from_code(station_type.code()), Some(station_type));
        }
        assert_eq!(StationType::from_code("tram"), None);
    }

    #[test]
    fn test_only_elevators_use_levels() {
        assert!(StationType::ElevatorWestEast.is_elevator());
        assert!(StationType::ElevatorEastWest.is_elevator());
        assert!(!StationType::Interchange.is_elevator());
        assert!(!StationType::Plain.is_elevator());
    }

    #[test]
    fn test_plain_type_is_omitted_from_json() {
        let station = Station::new(1, "Spawn".to_string(), (1.5, -2.25));
        let json = serde_json::to_string(&station).expect("serialize");
        assert!(!json.contains("\"type\""));
        assert!(!json.contains("notes"));

        let mut junction = station.clone();
        junction.station_type = StationType::Junction;
        let json = serde_json::to_string(&junction).expect("serialize");
        assert!(json.contains("\"type\":\"jct\""));
    }

    #[test]
    fn test_missing_type_defaults_to_plain() {
        let json = r#"{"id":4,"name":"Ice Spike","x":10.0,"z":20.0}"#;
        let station: Station = serde_json::from_str(json).expect("deserialize");
        assert_eq!(station.station_type, StationType::Plain);
        assert!(station.lines.is_empty());
        assert_eq!(station.position(), (10.0, 20.0));
    }

    #[test]
    fn test_membership_lookup() {
        let json = r#"{"id":1,"name":"Mesa","x":0,"z":0,"lines":{"Nether":{"Red":["12","Main line"]}}}"#;
        let station: Station = serde_json::from_str(json).expect("deserialize");
        assert!(station.is_member_of("Nether", "Red"));
        assert!(!station.is_member_of("Nether", "Blue"));
        assert!(!station.is_member_of("Overworld", "Red"));

        let membership = &station.lines["Nether"]["Red"];
        assert_eq!(membership.map_number(), "12");
        assert_eq!(membership.branch(), "Main line");
    }
}
