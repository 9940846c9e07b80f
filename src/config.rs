//! Configuration loading and typed config structures.
//!
//! The optional `spacer.json` in the working directory overrides any of the
//! defaults below; missing fields keep their default values.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::models::constants::{
    ARRIVAL_X, ARRIVAL_Y, DANGEROUS_BODY_TYPES, DEFAULT_SCAN_RANGE, DEFAULT_START_BODY,
    DEFAULT_START_CITY, DEFAULT_START_DIMENSION, DEFAULT_START_X, DEFAULT_START_Y,
    HIDDEN_SIGNAL_RANGE,
};
use crate::models::dimension::HiddenSignal;
use crate::models::player::Location;
use crate::models::position::Coordinates;
use crate::models::warp::default_warp_paths;

/// Default name of the configuration file.
pub const CONFIG_FILE: &str = "spacer.json";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Top-level game configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Where new (and restarted) captains begin.
    pub start: StartConfig,
    /// Chebyshev range within which a system scan identifies bodies.
    pub scan_range: i32,
    /// Range at which hidden signals appear on a system scan.
    pub hidden_signal_range: i32,
    /// Where a jump drops the player in the target system.
    pub arrival: Coordinates,
    /// Directory holding one save file per captain.
    pub save_directory: PathBuf,
    /// World definitions; the built-in galaxy is used when absent.
    pub world_file: Option<PathBuf>,
    /// Seed for surface exploration results.
    pub seed: u64,
    pub warp_paths: BTreeMap<String, Vec<String>>,
    /// Dimension code -> signal name -> signal.
    pub hidden_signals: BTreeMap<String, BTreeMap<String, HiddenSignal>>,
    pub dangerous_body_types: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StartConfig {
    pub dimension: String,
    pub x: i32,
    pub y: i32,
    /// Landing site the captain wakes up in; `None` starts in space.
    pub landed: Option<StartSite>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StartSite {
    pub site: String,
    pub body: String,
    #[serde(default)]
    pub moon: Option<String>,
}

impl Default for GameConfig {
    fn default() -> Self {
        let mut voyager = BTreeMap::new();
        voyager.insert(
            "Voyager 1".to_string(),
            HiddenSignal {
                coordinates: Coordinates::new(2345, -1477),
                description: Some(
                    "Ancient Earth probe, requires close proximity for identification".to_string(),
                ),
            },
        );
        let mut hidden_signals = BTreeMap::new();
        hidden_signals.insert("A01".to_string(), voyager);

        GameConfig {
            start: StartConfig::default(),
            scan_range: DEFAULT_SCAN_RANGE,
            hidden_signal_range: HIDDEN_SIGNAL_RANGE,
            arrival: Coordinates::new(ARRIVAL_X, ARRIVAL_Y),
            save_directory: PathBuf::from("saves"),
            world_file: None,
            seed: 0,
            warp_paths: default_warp_paths(),
            hidden_signals,
            dangerous_body_types: DANGEROUS_BODY_TYPES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Default for StartConfig {
    fn default() -> Self {
        StartConfig {
            dimension: DEFAULT_START_DIMENSION.to_string(),
            x: DEFAULT_START_X,
            y: DEFAULT_START_Y,
            landed: Some(StartSite {
                site: DEFAULT_START_CITY.to_string(),
                body: DEFAULT_START_BODY.to_string(),
                moon: None,
            }),
        }
    }
}

impl StartConfig {
    pub fn position(&self) -> Coordinates {
        Coordinates::new(self.x, self.y)
    }

    pub fn location(&self) -> Location {
        match &self.landed {
            Some(site) => Location::Landed {
                site: site.site.clone(),
                body: site.body.clone(),
                moon: site.moon.clone(),
            },
            None => Location::InSpace,
        }
    }
}

impl GameConfig {
    /// Read and parse a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn from_json(contents: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(contents)?)
    }

    /// Load `path` when it exists, defaults otherwise.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            let config = Self::from_file(path)?;
            tracing::info!(path = %path.display(), "configuration loaded");
            Ok(config)
        } else {
            tracing::info!("config file not found, using defaults");
            Ok(Self::default())
        }
    }

    pub fn signals_in(&self, dimension: &str) -> BTreeMap<String, HiddenSignal> {
        self.hidden_signals.get(dimension).cloned().unwrap_or_default()
    }
}
