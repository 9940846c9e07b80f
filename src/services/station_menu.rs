//! Input handlers for docked and landed players.
//!
//! Both run before the global dispatcher and claim only their own keywords;
//! everything else falls through.

use std::collections::BTreeMap;

use rand::Rng;

use super::docking;
use crate::commands::registry::split_command;
use crate::commands::Session;
use crate::models::constants::{StationOption, SurfaceAction, EXPLORATION_FINDINGS};
use crate::models::player::{Location, Player};
use crate::ui::presenters::{StationPresenter, SurfacePresenter};

/// Whether an interceptor consumed the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interception {
    Handled,
    PassThrough,
}

/// Station menu: `launch`, `quests`, `trade`, `repair`, `info`, `options`, bare `help`.
pub fn handle_docked(player: &mut Player, raw_input: &str, session: &mut Session<'_>) -> Interception {
    let Some(station) = docking::docked_station(player, session.world, session.output) else {
        return Interception::PassThrough;
    };
    let Some((token, args)) = split_command(raw_input) else {
        return Interception::PassThrough;
    };

    // `help <command>` belongs to the global help
    if token == "options" || (token == "help" && args.is_empty()) {
        StationPresenter::show_menu(&station, session.output);
        return Interception::Handled;
    }
    let Some(option) = StationOption::parse(&token) else {
        return Interception::PassThrough;
    };

    match option {
        StationOption::Launch => docking::launch(player, session.world, session.output),
        StationOption::Quests => session.output.writeln(&format!(
            "The mission board at {} is empty. Check back later.",
            station.name
        )),
        StationOption::Trade => session.output.writeln(&format!(
            "The traders of {} have nothing to offer right now.",
            station.name
        )),
        StationOption::Repair => session
            .output
            .writeln("Your ship is already in perfect condition."),
        StationOption::Info => StationPresenter::show_info(&station, session.output),
    }
    Interception::Handled
}

/// Surface table: `explore`, `launch`, `analyze`, `info`, bare `help`.
pub fn handle_landed(player: &mut Player, raw_input: &str, session: &mut Session<'_>) -> Interception {
    let Location::Landed { site, body, moon } = player.location.clone() else {
        return Interception::PassThrough;
    };
    let Some((token, args)) = split_command(raw_input) else {
        return Interception::PassThrough;
    };

    if token == "help" && args.is_empty() {
        SurfacePresenter::show_menu(&site, session.output);
        return Interception::Handled;
    }
    let Some(action) = SurfaceAction::parse(&token) else {
        return Interception::PassThrough;
    };

    let label = player.location.surface_label().unwrap_or_else(|| body.clone());
    match action {
        SurfaceAction::Explore => {
            let finding = EXPLORATION_FINDINGS[session.rng.gen_range(0..EXPLORATION_FINDINGS.len())];
            session.output.writeln(&format!("You explore the area around {}...", site));
            session.output.writeln(finding);
        }
        SurfaceAction::Launch => docking::launch(player, session.world, session.output),
        SurfaceAction::Analyze => {
            let composition = surface_record(player, &body, moon.as_deref(), session)
                .map(|(composition, _)| composition)
                .unwrap_or_default();
            SurfacePresenter::show_analysis(&label, &composition, session.output);
        }
        SurfaceAction::Info => {
            let description = surface_record(player, &body, moon.as_deref(), session)
                .and_then(|(_, description)| description);
            SurfacePresenter::show_info(&site, &label, description.as_deref(), session.output);
        }
    }
    Interception::Handled
}

/// Composition and description of the body or moon the player stands on.
fn surface_record(
    player: &Player,
    body: &str,
    moon: Option<&str>,
    session: &mut Session<'_>,
) -> Option<(BTreeMap<String, f64>, Option<String>)> {
    let dimension = session.world.dimension(&player.dimension).ok()?;
    match moon {
        Some(moon) => dimension
            .moon(moon)
            .map(|(_, _, m)| (m.composition.clone(), m.description.clone())),
        None => dimension
            .body(body)
            .map(|(_, b)| (b.composition.clone(), b.description.clone())),
    }
}
