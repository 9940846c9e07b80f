use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::constants::{NAME_MAX_LENGTH, NAME_MIN_LENGTH, RESERVED_NAMES};
use super::errors::NameError;
use super::position::Coordinates;
use crate::config::StartConfig;

/// Where the player is relative to stations and surfaces.
///
/// Docked and landed are variants of one enum, so a player can never be both.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Location {
    #[default]
    InSpace,
    Docked {
        station_id: String,
    },
    Landed {
        site: String,
        body: String,
        moon: Option<String>,
    },
}

impl Location {
    /// "Luna (Moon of Earth)" or "Earth" for a landed player.
    pub fn surface_label(&self) -> Option<String> {
        match self {
            Location::Landed { body, moon: Some(moon), .. } => {
                Some(format!("{} (Moon of {})", moon, body))
            }
            Location::Landed { body, moon: None, .. } => Some(body.clone()),
            _ => None,
        }
    }
}

/// A captain and everything the game remembers about them.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub name: String,
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
    pub position: Coordinates,
    pub dimension: String,
    pub location: Location,
    pub is_dead: bool,
    pub known_dimensions: BTreeSet<String>,
    /// Dimension code -> names of catalogued bodies, moons, stations and signals.
    pub known_bodies: BTreeMap<String, BTreeSet<String>>,
    /// Accumulated playtime in whole seconds.
    pub playtime: u64,
}

impl Player {
    /// A brand-new captain placed according to `start`.
    pub fn new(name: &str, start: &StartConfig) -> Self {
        let mut player = Player {
            name: name.to_string(),
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            last_login: None,
            position: Coordinates::default(),
            dimension: String::new(),
            location: Location::InSpace,
            is_dead: false,
            known_dimensions: BTreeSet::new(),
            known_bodies: BTreeMap::new(),
            playtime: 0,
        };
        player.reset_progress(start);
        player
    }

    /// Back to the starting state. Identity (name, id, creation date) and
    /// playtime survive.
    pub fn reset_progress(&mut self, start: &StartConfig) {
        self.position = start.position();
        self.dimension = start.dimension.clone();
        self.location = start.location();
        self.is_dead = false;
        self.known_dimensions = BTreeSet::from([start.dimension.clone()]);
        self.known_bodies = BTreeMap::new();
    }

    pub fn is_docked(&self) -> bool {
        matches!(self.location, Location::Docked { .. })
    }

    pub fn is_landed(&self) -> bool {
        matches!(self.location, Location::Landed { .. })
    }

    pub fn in_space(&self) -> bool {
        self.location == Location::InSpace
    }

    pub fn docked_at(&self) -> Option<&str> {
        match &self.location {
            Location::Docked { station_id } => Some(station_id),
            _ => None,
        }
    }

    pub fn kill(&mut self) {
        self.is_dead = true;
    }

    pub fn knows_body(&self, dimension: &str, name: &str) -> bool {
        self.known_bodies
            .get(dimension)
            .is_some_and(|names| names.iter().any(|n| n.eq_ignore_ascii_case(name)))
    }

    /// Record a discovery. Returns true when the name was new.
    pub fn record_discovery(&mut self, dimension: &str, name: &str) -> bool {
        if self.knows_body(dimension, name) {
            return false;
        }
        self.known_bodies
            .entry(dimension.to_string())
            .or_default()
            .insert(name.to_string())
    }

    pub fn discovery_count(&self) -> usize {
        self.known_bodies.values().map(BTreeSet::len).sum()
    }
}

/// Check a captain name: 3-15 characters of `[a-zA-Z0-9_]`, not a reserved word.
pub fn validate_player_name(name: &str) -> Result<(), NameError> {
    let len = name.chars().count();
    let well_formed = (NAME_MIN_LENGTH..=NAME_MAX_LENGTH).contains(&len)
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if !well_formed {
        return Err(NameError::InvalidFormat);
    }
    let lower = name.to_lowercase();
    if RESERVED_NAMES.contains(&lower.as_str()) {
        return Err(NameError::Reserved(name.to_string()));
    }
    Ok(())
}
