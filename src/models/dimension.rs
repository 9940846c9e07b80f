//! Dimension (star system) model
//!
//! `DimensionRecord` mirrors the world data on disk. `Dimension` is the
//! loaded, immutable form used during a session: it owns the body records
//! and the station index built from them, and answers coordinate lookups.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::constants::{StationKind, DANGEROUS_MIN_SIZE};
use super::position::{Coordinates, Extent};
use super::station::Station;

/// One dimension as stored in the world definitions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionRecord {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, alias = "properties")]
    pub bodies: BTreeMap<String, BodyRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyRecord {
    #[serde(rename = "type", default = "unknown_type")]
    pub body_type: String,
    #[serde(rename = "Coordinates")]
    pub coordinates: Coordinates,
    #[serde(default)]
    pub size: Option<Extent>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub composition: BTreeMap<String, f64>,
    #[serde(rename = "Moons", default)]
    pub moons: BTreeMap<String, MoonRecord>,
    #[serde(rename = "Stations", default)]
    pub stations: BTreeMap<String, StationRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoonRecord {
    #[serde(rename = "type", default = "moon_type")]
    pub body_type: String,
    #[serde(rename = "Coordinates")]
    pub coordinates: Coordinates,
    #[serde(default)]
    pub size: Option<Extent>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub composition: BTreeMap<String, f64>,
    #[serde(rename = "Stations", default)]
    pub stations: BTreeMap<String, StationRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationRecord {
    #[serde(rename = "type", default = "station_type")]
    pub station_type: String,
    #[serde(rename = "Coordinates", default)]
    pub coordinates: Option<Coordinates>,
    #[serde(default)]
    pub description: Option<String>,
}

fn unknown_type() -> String {
    "Unknown".to_string()
}

fn moon_type() -> String {
    "Moon".to_string()
}

fn station_type() -> String {
    "Station".to_string()
}

impl BodyRecord {
    /// Moons plus stations, shown as the "signals" column of a scan.
    pub fn signal_count(&self) -> usize {
        self.moons.len() + self.stations.len()
    }

    pub fn is_star(&self) -> bool {
        self.body_type.eq_ignore_ascii_case("star")
    }
}

/// A hidden point of interest, such as a derelict probe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HiddenSignal {
    #[serde(flatten)]
    pub coordinates: Coordinates,
    #[serde(default)]
    pub description: Option<String>,
}

/// Something found at a scanned coordinate.
#[derive(Debug, Clone, PartialEq)]
pub struct Contact {
    pub name: String,
    pub kind: String,
    pub parent: Option<String>,
    pub grandparent: Option<String>,
    pub description: String,
}

/// A loaded star system.
#[derive(Debug, Clone)]
pub struct Dimension {
    code: String,
    title: String,
    description: String,
    bodies: BTreeMap<String, BodyRecord>,
    stations: Vec<Station>,
}

impl Dimension {
    pub fn from_record(code: &str, record: DimensionRecord) -> Self {
        let stations = index_stations(code, &record.bodies);
        Dimension {
            code: code.to_string(),
            title: record.title,
            description: record.description,
            bodies: record.bodies,
            stations,
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn bodies(&self) -> &BTreeMap<String, BodyRecord> {
        &self.bodies
    }

    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    /// Case-insensitive body lookup returning the canonical name.
    pub fn body(&self, name: &str) -> Option<(&str, &BodyRecord)> {
        self.bodies
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(n, b)| (n.as_str(), b))
    }

    /// Case-insensitive moon lookup: (parent body, moon name, record).
    pub fn moon(&self, name: &str) -> Option<(&str, &str, &MoonRecord)> {
        self.bodies.iter().find_map(|(parent, body)| {
            body.moons
                .iter()
                .find(|(m, _)| m.eq_ignore_ascii_case(name))
                .map(|(m, rec)| (parent.as_str(), m.as_str(), rec))
        })
    }

    pub fn station(&self, id: &str) -> Option<&Station> {
        self.stations.iter().find(|s| s.id == id)
    }

    pub fn dockable_station_at(&self, at: Coordinates) -> Option<&Station> {
        self.stations
            .iter()
            .find(|s| s.coordinates == at && s.kind.is_dockable())
    }

    pub fn landing_site_at(&self, at: Coordinates) -> Option<&Station> {
        self.stations
            .iter()
            .find(|s| s.coordinates == at && s.kind.is_landing_site())
    }

    /// Stations and beacons within `range` (Euclidean), nearest first.
    pub fn stations_near(&self, at: Coordinates, range: f64) -> Vec<(&Station, f64)> {
        let mut nearby: Vec<(&Station, f64)> = self
            .stations
            .iter()
            .filter(|s| matches!(s.kind, StationKind::Station | StationKind::Beacon))
            .map(|s| (s, s.coordinates.euclidean_distance(at)))
            .filter(|(_, d)| *d <= range)
            .collect();
        nearby.sort_by(|a, b| a.1.total_cmp(&b.1));
        nearby
    }

    /// Name of a body whose centre is exactly at `at`.
    pub fn body_centred_at(&self, at: Coordinates) -> Option<&str> {
        self.bodies
            .iter()
            .find(|(_, b)| b.coordinates == at)
            .map(|(n, _)| n.as_str())
    }

    /// Everything occupying `at`: body and moon footprints, stations on the
    /// exact coordinate, and hidden signals on the exact coordinate.
    pub fn contacts_at(
        &self,
        at: Coordinates,
        dangerous_types: &[String],
        signals: &BTreeMap<String, HiddenSignal>,
    ) -> Vec<Contact> {
        let mut contacts = Vec::new();

        for (name, body) in &self.bodies {
            let mut extent = body.size.unwrap_or_default();
            if dangerous_types
                .iter()
                .any(|t| t.eq_ignore_ascii_case(&body.body_type))
            {
                extent = extent.at_least(DANGEROUS_MIN_SIZE);
            }
            if extent.contains(body.coordinates, at) {
                contacts.push(Contact {
                    name: name.clone(),
                    kind: body.body_type.clone(),
                    parent: None,
                    grandparent: None,
                    description: body
                        .description
                        .clone()
                        .unwrap_or_else(|| format!("A {}", body.body_type.to_lowercase())),
                });
            }

            for (moon_name, moon) in &body.moons {
                if moon.size.unwrap_or_default().contains(moon.coordinates, at) {
                    contacts.push(Contact {
                        name: moon_name.clone(),
                        kind: "Moon".to_string(),
                        parent: Some(name.clone()),
                        grandparent: None,
                        description: moon
                            .description
                            .clone()
                            .unwrap_or_else(|| format!("Moon of {}", name)),
                    });
                }
            }
        }

        for station in self.stations.iter().filter(|s| s.coordinates == at) {
            let (parent, grandparent) = match &station.parent_moon {
                Some(moon) => (moon.clone(), Some(station.parent_body.clone())),
                None => (station.parent_body.clone(), None),
            };
            contacts.push(Contact {
                name: station.name.clone(),
                kind: station.type_label.clone(),
                parent: Some(parent),
                grandparent,
                description: station.description.clone(),
            });
        }

        for (name, signal) in signals {
            if signal.coordinates == at {
                contacts.push(Contact {
                    name: name.clone(),
                    kind: "Special Signal".to_string(),
                    parent: None,
                    grandparent: None,
                    description: signal
                        .description
                        .clone()
                        .unwrap_or_else(|| "An unusual signal of unknown origin".to_string()),
                });
            }
        }

        contacts
    }
}

/// Flatten stations on bodies and moons into one list. A station without
/// its own coordinates sits on its moon, else its body.
fn index_stations(code: &str, bodies: &BTreeMap<String, BodyRecord>) -> Vec<Station> {
    let mut stations = Vec::new();
    for (body_name, body) in bodies {
        for (name, record) in &body.stations {
            stations.push(build_station(
                code,
                body_name,
                None,
                name,
                record,
                body.coordinates,
            ));
        }
        for (moon_name, moon) in &body.moons {
            for (name, record) in &moon.stations {
                stations.push(build_station(
                    code,
                    body_name,
                    Some(moon_name),
                    name,
                    record,
                    moon.coordinates,
                ));
            }
        }
    }
    stations
}

fn build_station(
    code: &str,
    body: &str,
    moon: Option<&str>,
    name: &str,
    record: &StationRecord,
    fallback: Coordinates,
) -> Station {
    let description = record.description.clone().unwrap_or_else(|| match moon {
        Some(moon) => format!("A {} on {}, Moon of {}", record.station_type, moon, body),
        None => format!("A {} on {}", record.station_type, body),
    });
    Station {
        id: Station::make_id(code, body, moon, name),
        name: name.to_string(),
        description,
        type_label: record.station_type.clone(),
        kind: StationKind::from_label(&record.station_type),
        coordinates: record.coordinates.unwrap_or(fallback),
        dimension: code.to_string(),
        parent_body: body.to_string(),
        parent_moon: moon.map(str::to_string),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dimension {
        let json = r#"{
            "title": "Test System",
            "description": "A small test system",
            "bodies": {
                "Sun": { "type": "Star", "Coordinates": { "x": 0, "y": 0 } },
                "Rock": {
                    "type": "Planet",
                    "Coordinates": { "x": 40, "y": 0 },
                    "size": { "width": 3, "height": 3 },
                    "Moons": {
                        "Pebble": {
                            "Coordinates": { "x": 45, "y": 2 },
                            "Stations": { "Outpost": { "type": "Station", "Coordinates": { "x": 46, "y": 2 } } }
                        }
                    },
                    "Stations": {
                        "Dock One": { "type": "Station", "Coordinates": { "x": 41, "y": 1 } },
                        "Rocktown": { "type": "City" }
                    }
                }
            }
        }"#;
        let record: DimensionRecord = serde_json::from_str(json).unwrap();
        Dimension::from_record("T01", record)
    }

    #[test]
    fn stations_are_indexed_from_bodies_and_moons() {
        let dim = sample();
        let ids: Vec<&str> = dim.stations().iter().map(|s| s.id.as_str()).collect();
        assert!(ids.contains(&"t01_rock_dock_one"));
        assert!(ids.contains(&"t01_rock_rocktown"));
        assert!(ids.contains(&"t01_rock_pebble_outpost"));
    }

    #[test]
    fn station_without_coordinates_sits_on_its_body() {
        let dim = sample();
        let city = dim.station("t01_rock_rocktown").unwrap();
        assert_eq!(city.coordinates, Coordinates::new(40, 0));
        assert_eq!(city.kind, StationKind::City);
    }

    #[test]
    fn docking_and_landing_lookups_respect_kind() {
        let dim = sample();
        assert!(dim.dockable_station_at(Coordinates::new(41, 1)).is_some());
        assert!(dim.dockable_station_at(Coordinates::new(40, 0)).is_none());
        assert!(dim.landing_site_at(Coordinates::new(40, 0)).is_some());
        assert!(dim.landing_site_at(Coordinates::new(41, 1)).is_none());
    }

    #[test]
    fn stars_get_a_minimum_footprint() {
        let dim = sample();
        let dangerous = vec!["Star".to_string()];
        let contacts = dim.contacts_at(Coordinates::new(2, -2), &dangerous, &BTreeMap::new());
        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].name, "Sun");
    }

    #[test]
    fn moon_station_reports_parent_and_grandparent() {
        let dim = sample();
        let contacts = dim.contacts_at(Coordinates::new(46, 2), &[], &BTreeMap::new());
        let outpost = contacts.iter().find(|c| c.name == "Outpost").unwrap();
        assert_eq!(outpost.parent.as_deref(), Some("Pebble"));
        assert_eq!(outpost.grandparent.as_deref(), Some("Rock"));
    }

    #[test]
    fn properties_key_is_accepted_for_bodies() {
        let json = r#"{ "title": "Old", "description": "", "properties": {
            "Sun": { "type": "Star", "Coordinates": { "x": 1, "y": 2 } } } }"#;
        let record: DimensionRecord = serde_json::from_str(json).unwrap();
        assert!(record.bodies.contains_key("Sun"));
    }

    #[test]
    fn lookups_ignore_case() {
        let dim = sample();
        assert_eq!(dim.body("rock").map(|(n, _)| n), Some("Rock"));
        assert_eq!(dim.moon("PEBBLE").map(|(p, m, _)| (p, m)), Some(("Rock", "Pebble")));
    }
}
