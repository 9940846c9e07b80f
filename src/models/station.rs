use super::constants::{StationKind, StationOption};
use super::position::Coordinates;

/// A dockable structure or landing site inside one dimension.
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Raw type label from the world data, e.g. "Station" or "City".
    pub type_label: String,
    pub kind: StationKind,
    pub coordinates: Coordinates,
    pub dimension: String,
    pub parent_body: String,
    pub parent_moon: Option<String>,
}

impl Station {
    /// Stable identifier: `<dim>_<body>[_<moon>]_<name>`, lower-case, spaces as underscores.
    pub fn make_id(dimension: &str, body: &str, moon: Option<&str>, name: &str) -> String {
        let raw = match moon {
            Some(moon) => format!("{}_{}_{}_{}", dimension, body, moon, name),
            None => format!("{}_{}_{}", dimension, body, name),
        };
        raw.to_lowercase().replace(' ', "_")
    }

    pub fn options(&self) -> &'static [StationOption] {
        &StationOption::ALL
    }

    /// "Luna (Moon of Earth)" or just "Earth".
    pub fn attached_to(&self) -> String {
        match &self.parent_moon {
            Some(moon) => format!("{} (Moon of {})", moon, self.parent_body),
            None => self.parent_body.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_is_lowercase_with_underscores() {
        assert_eq!(
            Station::make_id("A01", "Earth", None, "Orbital Dock"),
            "a01_earth_orbital_dock"
        );
        assert_eq!(
            Station::make_id("A01", "Earth", Some("Luna"), "Tycho Base"),
            "a01_earth_luna_tycho_base"
        );
    }

    #[test]
    fn attached_to_mentions_moon_parent() {
        let station = Station {
            id: "a01_earth_luna_tycho_base".to_string(),
            name: "Tycho Base".to_string(),
            description: String::new(),
            type_label: "Station".to_string(),
            kind: StationKind::Station,
            coordinates: Coordinates::new(0, 0),
            dimension: "A01".to_string(),
            parent_body: "Earth".to_string(),
            parent_moon: Some("Luna".to_string()),
        };
        assert_eq!(station.attached_to(), "Luna (Moon of Earth)");
    }
}
