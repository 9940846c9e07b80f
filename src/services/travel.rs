//! In-system movement and inter-dimension jumps.

use tracing::info;

use crate::io::OutputWriter;
use crate::models::constants::StationKind;
use crate::models::errors::{GameError, GameResult, WorldError};
use crate::models::player::Player;
use crate::models::position::Coordinates;
use crate::models::world::World;
use crate::ui::presenters::LocationPresenter;

/// Parse exactly two integers.
pub fn parse_coordinates(args: &str, usage: &str) -> GameResult<Coordinates> {
    let parts: Vec<&str> = args.split_whitespace().collect();
    let invalid = || GameError::InvalidInput(format!("Invalid coordinates. Usage: {}", usage));
    if parts.len() != 2 {
        return Err(invalid());
    }
    let x = parts[0].parse::<i32>().map_err(|_| invalid())?;
    let y = parts[1].parse::<i32>().map_err(|_| invalid())?;
    Ok(Coordinates::new(x, y))
}

/// Move within the current dimension. There is no collision or fuel model,
/// so the position is always set to `target`.
pub fn move_player(
    player: &mut Player,
    target: Coordinates,
    world: &mut World,
    output: &mut dyn OutputWriter,
) -> GameResult<()> {
    if player.position == target {
        output.writeln(&format!("Already at {}.", target));
        return Ok(());
    }

    let distance = player.position.chebyshev_distance(target);
    output.writeln(&format!(
        "Navigating to {} in {} (distance: {} units)...",
        target, player.dimension, distance
    ));
    player.position = target;
    output.writeln(&format!("Arrived at {}.", target));

    let Ok(dimension) = world.dimension(&player.dimension) else {
        return Ok(());
    };
    for station in dimension.stations().iter().filter(|s| s.coordinates == target) {
        match station.kind {
            StationKind::Station => output.writeln(&format!(
                "{} is here. Type 'dock' to board.",
                station.name
            )),
            StationKind::City => output.writeln(&format!(
                "You are above {} on {}. Type 'land' to touch down.",
                station.name,
                station.attached_to()
            )),
            _ => output.writeln(&format!("{} ({}) is here.", station.name, station.type_label)),
        }
    }
    if let Some(body) = dimension.body_centred_at(target) {
        output.writeln(&format!("You are in orbit of {}.", body));
    }
    Ok(())
}

/// Jump to another dimension along the warp graph. Nothing changes unless
/// every check passes and the target loads.
pub fn jump(
    player: &mut Player,
    code: &str,
    world: &mut World,
    arrival: Coordinates,
    output: &mut dyn OutputWriter,
) -> GameResult<()> {
    let target = code.trim().to_uppercase();
    if target.is_empty() {
        return Err(GameError::InvalidInput(
            "Please specify a dimension code. Usage: jump <code>".to_string(),
        ));
    }
    if target == player.dimension {
        return Err(GameError::AlreadyInDimension(target));
    }

    let destinations: Vec<String> = match world.warp().destinations(&player.dimension) {
        Some(list) if !list.is_empty() => list.to_vec(),
        _ => return Err(GameError::NoWarpRoutes(player.dimension.clone())),
    };
    if !destinations.contains(&target) {
        return Err(GameError::Unreachable {
            from: player.dimension.clone(),
            to: target,
            destinations: destinations.join(", "),
        });
    }

    let title = world
        .dimension(&target)
        .map_err(|err| match err {
            WorldError::UnknownDimension(code) => GameError::UnknownDimension(code),
            other => other.into(),
        })?
        .title()
        .to_string();

    output.writeln(&format!(
        "Initiating warp jump from {} to {}...",
        player.dimension, target
    ));
    let first_visit = player.known_dimensions.insert(target.clone());
    info!(player = %player.name, from = %player.dimension, to = %target, "warp jump");
    player.dimension = target.clone();
    player.position = arrival;

    output.writeln(&format!("Jump complete. Welcome to {} ({}).", title, target));
    output.writeln(&format!("Arrival coordinates: {}", arrival));
    if first_visit {
        output.writeln(&format!("New dimension discovered: {}", target));
    }
    Ok(())
}

/// Warp destinations from the current dimension and every dimension in the
/// world data, marked discovered or not.
pub fn list_dimensions(
    player: &Player,
    world: &mut World,
    output: &mut dyn OutputWriter,
) -> GameResult<()> {
    let destinations: Vec<String> = world
        .warp()
        .destinations(&player.dimension)
        .map(<[String]>::to_vec)
        .unwrap_or_default();

    let mut systems = Vec::new();
    for code in world.available_dimensions() {
        let title = world.dimension(&code)?.title().to_string();
        let discovered = player.known_dimensions.contains(&code);
        systems.push((code, title, discovered));
    }
    LocationPresenter::show_dimensions(&player.dimension, &destinations, &systems, output);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StartConfig;
    use crate::io::test_utils::MockOutput;
    use crate::models::warp::{default_warp_paths, WarpGraph};
    use crate::persistence::JsonWorldSource;
    use std::collections::BTreeMap;

    fn world() -> World {
        World::new(
            Box::new(JsonWorldSource::builtin()),
            WarpGraph::new(default_warp_paths()),
        )
    }

    fn pilot() -> Player {
        Player::new(
            "Pilot",
            &StartConfig {
                dimension: "A01".to_string(),
                x: 0,
                y: 0,
                landed: None,
            },
        )
    }

    #[test]
    fn coordinates_need_exactly_two_integers() {
        assert_eq!(parse_coordinates("10 -4", "move <x> <y>").unwrap(), Coordinates::new(10, -4));
        assert!(parse_coordinates("10", "move <x> <y>").is_err());
        assert!(parse_coordinates("1 2 3", "move <x> <y>").is_err());
        assert!(parse_coordinates("a b", "move <x> <y>").is_err());
        assert!(parse_coordinates("1.5 2", "move <x> <y>").is_err());
    }

    #[test]
    fn move_sets_position_and_reports_distance() {
        let mut world = world();
        let mut player = pilot();
        let mut output = MockOutput::new();
        move_player(&mut player, Coordinates::new(30, -10), &mut world, &mut output).unwrap();
        assert_eq!(player.position, Coordinates::new(30, -10));
        assert!(output.contains("distance: 30 units"));
    }

    #[test]
    fn move_to_current_position_changes_nothing() {
        let mut world = world();
        let mut player = pilot();
        let before = player.clone();
        let mut output = MockOutput::new();
        move_player(&mut player, Coordinates::new(0, 0), &mut world, &mut output).unwrap();
        assert_eq!(player, before);
        assert!(output.contains("Already at"));
    }

    #[test]
    fn arriving_at_a_station_suggests_docking() {
        let mut world = world();
        let mut player = pilot();
        let mut output = MockOutput::new();
        move_player(&mut player, Coordinates::new(61, -59), &mut world, &mut output).unwrap();
        assert!(output.contains("ISS is here"));
    }

    #[test]
    fn jump_along_an_edge() {
        let mut world = world();
        let mut player = pilot();
        let mut output = MockOutput::new();
        jump(&mut player, "c12", &mut world, Coordinates::new(10, 10), &mut output).unwrap();
        assert_eq!(player.dimension, "C12");
        assert_eq!(player.position, Coordinates::new(10, 10));
        assert!(player.known_dimensions.contains("C12"));
        assert!(output.contains("Alpha Centauri"));
    }

    #[test]
    fn jump_without_edge_is_refused() {
        let mut world = world();
        let mut player = pilot();
        let before = player.clone();
        let mut output = MockOutput::new();
        let err = jump(&mut player, "E15", &mut world, Coordinates::new(10, 10), &mut output)
            .unwrap_err();
        assert!(matches!(err, GameError::Unreachable { .. }));
        assert_eq!(player, before);
    }

    #[test]
    fn jump_to_current_dimension_is_refused() {
        let mut world = world();
        let mut player = pilot();
        let mut output = MockOutput::new();
        assert!(matches!(
            jump(&mut player, "A01", &mut world, Coordinates::new(10, 10), &mut output),
            Err(GameError::AlreadyInDimension(_))
        ));
    }

    #[test]
    fn jump_from_dimension_without_routes() {
        let mut world = World::new(Box::new(JsonWorldSource::builtin()), WarpGraph::new(BTreeMap::new()));
        let mut player = pilot();
        let mut output = MockOutput::new();
        assert!(matches!(
            jump(&mut player, "C12", &mut world, Coordinates::new(10, 10), &mut output),
            Err(GameError::NoWarpRoutes(_))
        ));
        assert_eq!(player.dimension, "A01");
    }

    #[test]
    fn jump_to_edge_missing_from_world_data_is_all_or_nothing() {
        let mut edges = BTreeMap::new();
        edges.insert("A01".to_string(), vec!["Z99".to_string()]);
        let mut world = World::new(Box::new(JsonWorldSource::builtin()), WarpGraph::new(edges));
        let mut player = pilot();
        let before = player.clone();
        let mut output = MockOutput::new();
        assert!(matches!(
            jump(&mut player, "Z99", &mut world, Coordinates::new(10, 10), &mut output),
            Err(GameError::UnknownDimension(_))
        ));
        assert_eq!(player, before);
    }

    #[test]
    fn dimension_listing_marks_discoveries() {
        let mut world = world();
        let player = pilot();
        let mut output = MockOutput::new();
        list_dimensions(&player, &mut world, &mut output).unwrap();
        assert!(output.contains("Warp destinations from A01: C12, D14, N09, F27"));
        assert!(output.contains("Sol System"));
        assert!(output.contains("UNDISCOVERED"));
    }
}
