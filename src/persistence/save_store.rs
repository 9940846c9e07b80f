//! Player persistence
//!
//! `SaveStore` is the only way the engine touches saved games. Two stores
//! are provided: `JsonSaveStore` keeps one pretty-printed JSON file per
//! captain (named by UUID, so renames never move files) and
//! `MemorySaveStore` keeps everything in a map.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::models::errors::{GameError, GameResult, NameError};
use crate::models::player::{validate_player_name, Location, Player};
use crate::models::position::Coordinates;

/// Persistence collaborator used by the engine.
pub trait SaveStore {
    /// Persist the player, replacing any earlier save with the same id.
    fn save(&mut self, player: &Player) -> GameResult<()>;

    /// Find a captain by name, case-insensitively.
    fn load(&self, name: &str) -> GameResult<Option<Player>>;

    fn load_by_id(&self, id: Uuid) -> GameResult<Option<Player>>;

    /// Names of saved captains, optionally including the dead.
    fn list_players(&self, include_dead: bool) -> GameResult<Vec<String>>;

    fn player_exists(&self, name: &str) -> GameResult<bool> {
        Ok(self.load(name)?.is_some())
    }

    /// Rename `player` and persist the result. On a failed save the old
    /// name is restored.
    fn change_name(&mut self, player: &mut Player, new_name: &str) -> Result<(), NameError> {
        validate_player_name(new_name)?;
        match self.load(new_name) {
            Ok(Some(existing)) if existing.id != player.id => return Err(NameError::Taken),
            Ok(_) => {}
            Err(err) => {
                warn!(%err, "could not check name availability");
                return Err(NameError::SaveFailed);
            }
        }

        let old_name = std::mem::replace(&mut player.name, new_name.to_string());
        if let Err(err) = self.save(player) {
            warn!(%err, "rename save failed, reverting");
            player.name = old_name;
            return Err(NameError::SaveFailed);
        }
        Ok(())
    }

    fn format_playtime(&self, seconds: u64) -> String {
        format_playtime(seconds)
    }

    fn format_date(&self, timestamp: &DateTime<Utc>) -> String {
        format_date(timestamp)
    }
}

/// `DD:HH:MM:SS` with leading zeros.
pub fn format_playtime(seconds: u64) -> String {
    let days = seconds / 86_400;
    let hours = (seconds % 86_400) / 3_600;
    let minutes = (seconds % 3_600) / 60;
    let secs = seconds % 60;
    format!("{:02}:{:02}:{:02}:{:02}", days, hours, minutes, secs)
}

/// Inverse of [`format_playtime`]. Also accepts raw seconds and the older
/// `Days:X, Hours:Y, Minutes:Z, Seconds:W` form; anything else is zero.
pub fn parse_playtime(text: &str) -> u64 {
    let text = text.trim();
    let parts: Vec<&str> = text.split(':').collect();
    if parts.len() == 4 {
        if let Ok(values) = parts
            .iter()
            .map(|p| p.trim().parse::<u64>())
            .collect::<Result<Vec<u64>, _>>()
        {
            return seconds_from_parts(values[0], values[1], values[2], values[3]);
        }
    }
    if text.starts_with("Days:") {
        let values: Vec<u64> = text
            .split(", ")
            .filter_map(|part| part.split(':').nth(1))
            .filter_map(|v| v.trim().parse().ok())
            .collect();
        if let [d, h, m, s] = values[..] {
            return seconds_from_parts(d, h, m, s);
        }
    }
    text.parse::<f64>().map(|s| s.max(0.0) as u64).unwrap_or(0)
}

/// Overflowing values come from corrupt saves and count as zero.
fn seconds_from_parts(days: u64, hours: u64, minutes: u64, seconds: u64) -> u64 {
    days.checked_mul(86_400)
        .and_then(|t| t.checked_add(hours.checked_mul(3_600)?))
        .and_then(|t| t.checked_add(minutes.checked_mul(60)?))
        .and_then(|t| t.checked_add(seconds))
        .unwrap_or(0)
}

/// `DD.MM.YY - HH:MM` in Central European Time (UTC+1).
pub fn format_date(timestamp: &DateTime<Utc>) -> String {
    const FORMAT: &str = "%d.%m.%y - %H:%M";
    match FixedOffset::east_opt(3_600) {
        Some(cet) => timestamp.with_timezone(&cet).format(FORMAT).to_string(),
        None => timestamp.format(FORMAT).to_string(),
    }
}

/// On-disk layout of one captain.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SaveFile {
    name: String,
    uuid: Uuid,
    position: SavedPosition,
    discoveries: SavedDiscoveries,
    creation_date: DateTime<Utc>,
    #[serde(default)]
    last_login: Option<DateTime<Utc>>,
    #[serde(
        default,
        serialize_with = "playtime_to_save",
        deserialize_with = "playtime_from_save"
    )]
    playtime: u64,
    #[serde(default)]
    is_dead: bool,
    #[serde(default)]
    location: Location,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SavedPosition {
    x: i32,
    y: i32,
    dimension: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct SavedDiscoveries {
    #[serde(default)]
    known_dimensions: BTreeSet<String>,
    #[serde(default)]
    known_bodies: BTreeMap<String, BTreeSet<String>>,
}

fn playtime_to_save<S: Serializer>(seconds: &u64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_playtime(*seconds))
}

fn playtime_from_save<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(n) => n.as_f64().map(|s| s.max(0.0) as u64).unwrap_or(0),
        serde_json::Value::String(s) => parse_playtime(&s),
        _ => 0,
    })
}

impl SaveFile {
    fn from_player(player: &Player, saved_at: DateTime<Utc>) -> Self {
        SaveFile {
            name: player.name.clone(),
            uuid: player.id,
            position: SavedPosition {
                x: player.position.x,
                y: player.position.y,
                dimension: player.dimension.clone(),
            },
            discoveries: SavedDiscoveries {
                known_dimensions: player.known_dimensions.clone(),
                known_bodies: player.known_bodies.clone(),
            },
            creation_date: player.created_at,
            last_login: Some(saved_at),
            playtime: player.playtime,
            is_dead: player.is_dead,
            location: player.location.clone(),
        }
    }

    fn into_player(self) -> Player {
        Player {
            name: self.name,
            id: self.uuid,
            created_at: self.creation_date,
            last_login: self.last_login,
            position: Coordinates::new(self.position.x, self.position.y),
            dimension: self.position.dimension,
            location: self.location,
            is_dead: self.is_dead,
            known_dimensions: self.discoveries.known_dimensions,
            known_bodies: self.discoveries.known_bodies,
            playtime: self.playtime,
        }
    }
}

/// One JSON file per captain inside a directory.
pub struct JsonSaveStore {
    directory: PathBuf,
}

impl JsonSaveStore {
    /// Open (and create if needed) the save directory.
    pub fn open(directory: impl Into<PathBuf>) -> GameResult<Self> {
        let directory = directory.into();
        fs::create_dir_all(&directory)?;
        Ok(JsonSaveStore { directory })
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn path_for(&self, id: Uuid) -> PathBuf {
        self.directory.join(format!("{}.json", id))
    }

    /// Every readable save in the directory. Unreadable files are skipped.
    fn read_all(&self) -> GameResult<Vec<SaveFile>> {
        let mut saves = Vec::new();
        for entry in fs::read_dir(&self.directory)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            match fs::read_to_string(&path)
                .map_err(GameError::from)
                .and_then(|text| serde_json::from_str::<SaveFile>(&text).map_err(GameError::from))
            {
                Ok(save) => saves.push(save),
                Err(err) => warn!(path = %path.display(), %err, "skipping unreadable save"),
            }
        }
        Ok(saves)
    }
}

impl SaveStore for JsonSaveStore {
    fn save(&mut self, player: &Player) -> GameResult<()> {
        let file = SaveFile::from_player(player, Utc::now());
        let text = serde_json::to_string_pretty(&file)?;
        let path = self.path_for(player.id);
        fs::write(&path, text).map_err(|err| GameError::Save(err.to_string()))?;
        debug!(player = %player.name, path = %path.display(), "game saved");
        Ok(())
    }

    fn load(&self, name: &str) -> GameResult<Option<Player>> {
        Ok(self
            .read_all()?
            .into_iter()
            .find(|s| s.name.eq_ignore_ascii_case(name))
            .map(SaveFile::into_player))
    }

    fn load_by_id(&self, id: Uuid) -> GameResult<Option<Player>> {
        let path = self.path_for(id);
        if !path.exists() {
            return Ok(None);
        }
        let text = fs::read_to_string(path)?;
        let file: SaveFile = serde_json::from_str(&text)?;
        Ok(Some(file.into_player()))
    }

    fn list_players(&self, include_dead: bool) -> GameResult<Vec<String>> {
        let mut names: Vec<String> = self
            .read_all()?
            .into_iter()
            .filter(|s| include_dead || !s.is_dead)
            .map(|s| s.name)
            .collect();
        names.sort();
        Ok(names)
    }
}

/// In-memory store, also usable as a test double.
#[derive(Debug, Default)]
pub struct MemorySaveStore {
    players: HashMap<Uuid, Player>,
    saves: usize,
    fail_saves: bool,
}

impl MemorySaveStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful saves so far.
    pub fn save_count(&self) -> usize {
        self.saves
    }

    /// Make every following save fail.
    pub fn fail_saves(&mut self, fail: bool) {
        self.fail_saves = fail;
    }
}

impl SaveStore for MemorySaveStore {
    fn save(&mut self, player: &Player) -> GameResult<()> {
        if self.fail_saves {
            return Err(GameError::Save("storage unavailable".to_string()));
        }
        let mut stored = player.clone();
        stored.last_login = Some(Utc::now());
        self.players.insert(player.id, stored);
        self.saves += 1;
        Ok(())
    }

    fn load(&self, name: &str) -> GameResult<Option<Player>> {
        Ok(self
            .players
            .values()
            .find(|p| p.name.eq_ignore_ascii_case(name))
            .cloned())
    }

    fn load_by_id(&self, id: Uuid) -> GameResult<Option<Player>> {
        Ok(self.players.get(&id).cloned())
    }

    fn list_players(&self, include_dead: bool) -> GameResult<Vec<String>> {
        let mut names: Vec<String> = self
            .players
            .values()
            .filter(|p| include_dead || !p.is_dead)
            .map(|p| p.name.clone())
            .collect();
        names.sort();
        Ok(names)
    }
}
