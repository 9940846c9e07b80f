//! Sensor scans
//!
//! The system scan only looks; it never adds to the discovery log. Detail
//! scans of a named body and coordinate scans do record what they find.

use crate::config::GameConfig;
use crate::io::OutputWriter;
use crate::models::errors::{GameError, GameResult};
use crate::models::player::Player;
use crate::models::position::Coordinates;
use crate::models::world::World;
use crate::ui::presenters::ScanPresenter;

/// One row of a system scan.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanEntry {
    pub name: String,
    pub body_type: String,
    pub coordinates: Coordinates,
    pub distance: i64,
    pub signals: usize,
    pub identified: bool,
}

/// Every body in the current dimension, nearest first. Bodies beyond
/// scan range that the player has not catalogued stay unidentified.
pub fn system_scan_entries(
    player: &Player,
    world: &mut World,
    config: &GameConfig,
) -> GameResult<Vec<ScanEntry>> {
    let dimension = world.dimension(&player.dimension)?;
    let mut entries: Vec<ScanEntry> = dimension
        .bodies()
        .iter()
        .map(|(name, body)| {
            let distance = player.position.chebyshev_distance(body.coordinates);
            ScanEntry {
                name: name.clone(),
                body_type: body.body_type.clone(),
                coordinates: body.coordinates,
                distance,
                signals: body.signal_count(),
                identified: distance <= i64::from(config.scan_range)
                    || player.knows_body(&player.dimension, name),
            }
        })
        .collect();

    for (name, signal) in config.signals_in(&player.dimension) {
        let distance = player.position.chebyshev_distance(signal.coordinates);
        if distance <= i64::from(config.hidden_signal_range) {
            entries.push(ScanEntry {
                name,
                body_type: "Special Signal".to_string(),
                coordinates: signal.coordinates,
                distance,
                signals: 0,
                identified: true,
            });
        }
    }

    entries.sort_by(|a, b| a.distance.cmp(&b.distance).then_with(|| a.name.cmp(&b.name)));
    Ok(entries)
}

pub fn system_scan(
    player: &Player,
    world: &mut World,
    config: &GameConfig,
    output: &mut dyn OutputWriter,
) -> GameResult<()> {
    let entries = system_scan_entries(player, world, config)?;
    let title = world.dimension(&player.dimension)?.title().to_string();
    ScanPresenter::show_system_scan(&player.dimension, &title, player.position, &entries, output);
    Ok(())
}

/// Detailed scan of a catalogued body or moon. Stars can always be scanned.
pub fn body_scan(
    player: &mut Player,
    name: &str,
    world: &mut World,
    output: &mut dyn OutputWriter,
) -> GameResult<()> {
    let dimension = world.dimension(&player.dimension)?;
    let refused = |reason: &str| GameError::ScanRefused {
        name: name.to_string(),
        reason: reason.to_string(),
    };

    if let Some((body_name, body)) = dimension.body(name) {
        if !body.is_star() && !player.knows_body(&player.dimension, body_name) {
            return Err(refused(
                "not yet catalogued. Use 'scancoords' from a station or surface first.",
            ));
        }
        let distance = player.position.chebyshev_distance(body.coordinates);
        ScanPresenter::show_body(body_name, body, distance, dimension.stations(), output);
        let body_name = body_name.to_string();
        let dim = player.dimension.clone();
        player.record_discovery(&dim, &body_name);
        return Ok(());
    }

    if let Some((parent, moon_name, moon)) = dimension.moon(name) {
        if !player.knows_body(&player.dimension, moon_name) {
            return Err(refused(
                "not yet catalogued. Use 'scancoords' from a station or surface first.",
            ));
        }
        let distance = player.position.chebyshev_distance(moon.coordinates);
        ScanPresenter::show_moon(moon_name, parent, moon, distance, output);
        let (parent, moon_name) = (parent.to_string(), moon_name.to_string());
        let dim = player.dimension.clone();
        player.record_discovery(&dim, &moon_name);
        player.record_discovery(&dim, &parent);
        return Ok(());
    }

    Err(refused("no such object in this system."))
}

/// Check one coordinate against every body footprint, moon, station and
/// hidden signal. Each match is added to the discovery log. Returns the
/// names that were new.
pub fn coordinate_scan(
    player: &mut Player,
    target: Coordinates,
    world: &mut World,
    config: &GameConfig,
    output: &mut dyn OutputWriter,
) -> GameResult<Vec<String>> {
    let dimension = world.dimension(&player.dimension)?;
    let contacts = dimension.contacts_at(
        target,
        &config.dangerous_body_types,
        &config.signals_in(&player.dimension),
    );

    let dim = player.dimension.clone();
    let mut discovered = Vec::new();
    let mut flags = Vec::with_capacity(contacts.len());
    for contact in &contacts {
        let is_new = player.record_discovery(&dim, &contact.name);
        if is_new {
            discovered.push(contact.name.clone());
        }
        flags.push(is_new);
    }
    ScanPresenter::show_coordinate_scan(target, &contacts, &flags, output);
    Ok(discovered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StartConfig;
    use crate::io::test_utils::MockOutput;
    use crate::models::warp::{default_warp_paths, WarpGraph};
    use crate::persistence::JsonWorldSource;

    fn world() -> World {
        World::new(
            Box::new(JsonWorldSource::builtin()),
            WarpGraph::new(default_warp_paths()),
        )
    }

    fn at(x: i32, y: i32) -> Player {
        Player::new(
            "Pilot",
            &StartConfig {
                dimension: "A01".to_string(),
                x,
                y,
                landed: None,
            },
        )
    }

    #[test]
    fn system_scan_sorts_by_distance_and_hides_far_bodies() {
        let mut world = world();
        let player = at(0, 0);
        let entries = system_scan_entries(&player, &mut world, &GameConfig::default()).unwrap();
        assert_eq!(entries[0].name, "Sun");
        assert!(entries.windows(2).all(|w| w[0].distance <= w[1].distance));

        let mercury = entries.iter().find(|e| e.name == "Mercury").unwrap();
        assert!(mercury.identified);
        let pluto = entries.iter().find(|e| e.name == "Pluto").unwrap();
        assert!(!pluto.identified);
        assert_eq!(pluto.distance, 1200);
    }

    #[test]
    fn system_scan_does_not_record_discoveries() {
        let mut world = world();
        let player = at(0, 0);
        let mut output = MockOutput::new();
        system_scan(&player, &mut world, &GameConfig::default(), &mut output).unwrap();
        assert_eq!(player.discovery_count(), 0);
        assert!(output.contains("Unknown"));
    }

    #[test]
    fn known_bodies_are_identified_at_any_range() {
        let mut world = world();
        let mut player = at(0, 0);
        player.record_discovery("A01", "Pluto");
        let entries = system_scan_entries(&player, &mut world, &GameConfig::default()).unwrap();
        assert!(entries.iter().find(|e| e.name == "Pluto").unwrap().identified);
    }

    #[test]
    fn hidden_signal_appears_only_when_close() {
        let mut world = world();
        let config = GameConfig::default();
        let far = system_scan_entries(&at(0, 0), &mut world, &config).unwrap();
        assert!(far.iter().all(|e| e.name != "Voyager 1"));
        let near = system_scan_entries(&at(2340, -1470), &mut world, &config).unwrap();
        assert!(near.iter().any(|e| e.name == "Voyager 1"));
    }

    #[test]
    fn coordinate_scan_records_once() {
        let mut world = world();
        let config = GameConfig::default();
        let mut player = at(60, -59);
        let mut output = MockOutput::new();

        let first = coordinate_scan(&mut player, Coordinates::new(61, -59), &mut world, &config, &mut output)
            .unwrap();
        assert!(first.contains(&"ISS".to_string()));
        assert!(first.contains(&"Earth".to_string()));
        let count = player.discovery_count();

        let second = coordinate_scan(&mut player, Coordinates::new(61, -59), &mut world, &config, &mut output)
            .unwrap();
        assert!(second.is_empty());
        assert_eq!(player.discovery_count(), count);
    }

    #[test]
    fn coordinate_scan_of_empty_space() {
        let mut world = world();
        let mut player = at(60, -59);
        let mut output = MockOutput::new();
        let found = coordinate_scan(
            &mut player,
            Coordinates::new(-500, 500),
            &mut world,
            &GameConfig::default(),
            &mut output,
        )
        .unwrap();
        assert!(found.is_empty());
        assert!(output.contains("Nothing detected"));
    }

    #[test]
    fn body_scan_requires_catalogue_entry() {
        let mut world = world();
        let mut player = at(0, 0);
        let mut output = MockOutput::new();
        assert!(matches!(
            body_scan(&mut player, "Mars", &mut world, &mut output),
            Err(GameError::ScanRefused { .. })
        ));
        body_scan(&mut player, "sun", &mut world, &mut output).unwrap();
        assert!(player.knows_body("A01", "Sun"));
    }

    #[test]
    fn moon_scan_records_parent() {
        let mut world = world();
        let mut player = at(0, 0);
        player.record_discovery("A01", "Phobos");
        let mut output = MockOutput::new();
        body_scan(&mut player, "phobos", &mut world, &mut output).unwrap();
        assert!(player.knows_body("A01", "Mars"));
    }
}
