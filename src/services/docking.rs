//! Docking and landing transitions
//!
//! `InSpace -> Docked` needs a dockable station on the exact coordinate,
//! `InSpace -> Landed` a landing site. `launch` always returns to space.

use tracing::{info, warn};

use crate::io::OutputWriter;
use crate::models::constants::DOCKING_HINT_RANGE;
use crate::models::errors::{GameError, GameResult};
use crate::models::player::{Location, Player};
use crate::models::station::Station;
use crate::models::world::World;
use crate::ui::presenters::LocationPresenter;

pub fn dock(player: &mut Player, world: &mut World, output: &mut dyn OutputWriter) -> GameResult<()> {
    let dimension = world.dimension(&player.dimension)?;
    let Some(station) = dimension.dockable_station_at(player.position) else {
        let nearby = dimension.stations_near(player.position, DOCKING_HINT_RANGE);
        if !nearby.is_empty() {
            output.writeln("Nearby stations:");
            for (station, distance) in nearby {
                output.writeln(&format!(
                    "  {} ({}) at {} - {:.1} units away",
                    station.name, station.type_label, station.coordinates, distance
                ));
            }
        }
        return Err(GameError::NoStation);
    };

    output.writeln(&format!("Docking with {}...", station.name));
    output.writeln(&format!("Successfully docked at {}.", station.name));
    output.writeln("Type 'options' to see what this station offers.");
    info!(player = %player.name, station = %station.id, "docked");
    player.location = Location::Docked {
        station_id: station.id.clone(),
    };
    Ok(())
}

pub fn land(player: &mut Player, world: &mut World, output: &mut dyn OutputWriter) -> GameResult<()> {
    let dimension = world.dimension(&player.dimension)?;
    let site = dimension
        .landing_site_at(player.position)
        .ok_or(GameError::NoLandingSite)?;

    output.writeln(&format!(
        "Descending to {} on {}...",
        site.name,
        site.attached_to()
    ));
    output.writeln(&format!("Touchdown. Welcome to {}.", site.name));
    output.writeln("Type 'help' to see what you can do here.");
    info!(player = %player.name, site = %site.name, "landed");
    player.location = Location::Landed {
        site: site.name.clone(),
        body: site.parent_body.clone(),
        moon: site.parent_moon.clone(),
    };
    Ok(())
}

pub fn launch(player: &mut Player, world: &mut World, output: &mut dyn OutputWriter) {
    match &player.location {
        Location::InSpace => {
            output.writeln("You are already in space.");
            return;
        }
        Location::Docked { station_id } => {
            let name = world
                .dimension(&player.dimension)
                .ok()
                .and_then(|d| d.station(station_id))
                .map(|s| s.name.clone())
                .unwrap_or_else(|| "the station".to_string());
            output.writeln(&format!("Undocking from {}...", name));
        }
        Location::Landed { site, .. } => {
            output.writeln(&format!("Lifting off from {}...", site));
        }
    }
    player.location = Location::InSpace;
    output.writeln(&format!("You are now in space at {}.", player.position));
}

/// The station a docked player is attached to. A station that no longer
/// exists in the world sends the player back to space.
pub fn docked_station(
    player: &mut Player,
    world: &mut World,
    output: &mut dyn OutputWriter,
) -> Option<Station> {
    let station_id = player.docked_at()?.to_string();
    let found = world
        .dimension(&player.dimension)
        .ok()
        .and_then(|d| d.station(&station_id))
        .cloned();
    if found.is_none() {
        warn!(player = %player.name, station = %station_id, "docked station no longer exists");
        output.writeln("Warning: your docking station could not be found. Returning to space.");
        player.location = Location::InSpace;
    }
    found
}

/// Human-readable location, naming the docked station when it exists.
pub fn describe_location(player: &Player, world: &mut World) -> String {
    let station_name = player.docked_at().and_then(|id| {
        world
            .dimension(&player.dimension)
            .ok()
            .and_then(|d| d.station(id))
            .map(|s| s.name.clone())
    });
    LocationPresenter::describe(&player.location, station_name.as_deref())
}
